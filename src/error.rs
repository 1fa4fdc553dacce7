//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, scene-reader, and JSON errors, and provides semantic
//! variants for setup validation and processing failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene reader error: {0}")]
    Scene(#[from] crate::io::SceneError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Declared output band count {declared} does not match produced tuple length {produced}")]
    BandCountMismatch { declared: usize, produced: usize },

    #[error("Requested input band is not available: {band}")]
    UnknownBand { band: String },

    #[error("Band plane shapes disagree: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }
}
