use serde::{Deserialize, Serialize};

use crate::core::processing::ops::DEFAULT_NOISE_FLOOR_DB;
use crate::types::{AutoscaleStrategy, BitDepth, OutputFormat, QuicklookBand};

/// Quicklook parameters suitable for config files and presets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneParams {
    pub format: OutputFormat,
    pub bit_depth: BitDepth,
    pub band: QuicklookBand,
    pub autoscale: AutoscaleStrategy,
    /// Backscatter below this many dB is masked as noise
    pub noise_floor_db: f32,
    /// If false, only the dataMask is applied and noise pixels stay visible
    pub apply_noise_mask: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            format: OutputFormat::JPEG,
            bit_depth: BitDepth::U8,
            band: QuicklookBand::Vv,
            autoscale: AutoscaleStrategy::Fixed,
            noise_floor_db: DEFAULT_NOISE_FLOOR_DB,
            apply_noise_mask: true,
        }
    }
}
