//! Shared types and enums used across SARSEL.
//! Includes `SampleType`, `QuicklookBand`, `AutoscaleStrategy`, `OutputFormat`,
//! and `BitDepth`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Per-sample numeric encodings the processing service can emit.
/// Serialized names match the service's wire format (`FLOAT32`, `UINT8`, ...).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SampleType {
    Float32,
    Uint8,
    Uint16,
    Int16,
}

impl SampleType {
    /// Wire-format name as the service expects it inside an evalscript.
    pub fn wire_name(&self) -> &'static str {
        match self {
            SampleType::Float32 => "FLOAT32",
            SampleType::Uint8 => "UINT8",
            SampleType::Uint16 => "UINT16",
            SampleType::Int16 => "INT16",
        }
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Which backscatter band a quicklook renders.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum QuicklookBand {
    Vv,
    Vh,
}

impl std::fmt::Display for QuicklookBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuicklookBand::Vv => write!(f, "Vv"),
            QuicklookBand::Vh => write!(f, "Vh"),
        }
    }
}

/// Display scaling strategy for dB quicklooks.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum AutoscaleStrategy {
    /// Fixed dB window from the noise floor up to 0 dB
    Fixed,
    /// Percentile stretch (p02..p98) over valid pixels
    Robust,
}

impl std::fmt::Display for AutoscaleStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutoscaleStrategy::Fixed => write!(f, "Fixed"),
            AutoscaleStrategy::Robust => write!(f, "Robust"),
        }
    }
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum OutputFormat {
    TIFF,
    JPEG, // Lossy, preview only
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum BitDepth {
    U8,
    U16,
}
