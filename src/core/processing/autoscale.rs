//! Display scaling of dB planes to U8/U16 quicklook buffers.
//!
//! Two strategies: a fixed dB window (noise floor up to 0 dB, matching the
//! usual Sentinel-1 backscatter display range) and a robust percentile
//! stretch over valid pixels. Invalid pixels always scale to 0.
use ndarray::Array2;
use tracing::debug;

use crate::types::{AutoscaleStrategy, BitDepth};

/// Upper edge of the fixed display window in dB.
pub const WINDOW_MAX_DB: f32 = 0.0;

const ROBUST_LO_PCT: f64 = 0.02;
const ROBUST_HI_PCT: f64 = 0.98;

/// Percentile by sorted-index lookup: idx = floor(n * p), clamped to [0, n-1].
fn percentile(sorted: &[f32], p: f64) -> f32 {
    let mut idx = (p * sorted.len() as f64).floor() as usize;
    if idx >= sorted.len() {
        idx = sorted.len() - 1;
    }
    sorted[idx]
}

/// Pick the dB window for a plane. `Fixed` spans the noise floor up to 0 dB;
/// `Robust` stretches between p02 and p98 of the valid pixels, falling back
/// to the fixed window when no valid pixel exists.
fn display_window(
    db: &Array2<f32>,
    invalid: &Array2<bool>,
    strategy: AutoscaleStrategy,
    floor_db: f32,
) -> (f32, f32) {
    match strategy {
        AutoscaleStrategy::Fixed => (floor_db, WINDOW_MAX_DB),
        AutoscaleStrategy::Robust => {
            let mut valid: Vec<f32> = db
                .iter()
                .zip(invalid.iter())
                .filter_map(|(&v, &inv)| if inv { None } else { Some(v) })
                .collect();
            if valid.is_empty() {
                return (floor_db, WINDOW_MAX_DB);
            }
            valid.sort_by(|a, b| a.total_cmp(b));
            let lo = percentile(&valid, ROBUST_LO_PCT);
            let hi = percentile(&valid, ROBUST_HI_PCT);
            debug!("Robust window: [{:.2}, {:.2}] dB", lo, hi);
            (lo, hi)
        }
    }
}

/// Scale a dB plane into U8 (and optionally U16) display values, row-major.
/// Invalid pixels map to 0; valid pixels map linearly over the window and
/// clamp at its edges. A degenerate window collapses everything to 0.
pub fn scale_db_plane(
    db: &Array2<f32>,
    invalid: &Array2<bool>,
    bit_depth: BitDepth,
    strategy: AutoscaleStrategy,
    floor_db: f32,
) -> (Vec<u8>, Option<Vec<u16>>) {
    let (lo, hi) = display_window(db, invalid, strategy, floor_db);
    let span = hi - lo;

    let normalized: Vec<f32> = db
        .iter()
        .zip(invalid.iter())
        .map(|(&v, &inv)| {
            if inv || span <= f32::EPSILON {
                0.0
            } else {
                ((v - lo) / span).clamp(0.0, 1.0)
            }
        })
        .collect();

    let scaled_u8: Vec<u8> = normalized.iter().map(|&t| (t * 255.0).round() as u8).collect();
    let scaled_u16 = match bit_depth {
        BitDepth::U8 => None,
        BitDepth::U16 => Some(
            normalized
                .iter()
                .map(|&t| (t * 65535.0).round() as u16)
                .collect(),
        ),
    };

    (scaled_u8, scaled_u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn fixed_window_maps_edges_and_clamps() {
        let db = array![[-22.0_f32, 0.0, -11.0, 5.0, -40.0]];
        let invalid = Array2::from_elem(db.dim(), false);
        let (u8s, u16s) =
            scale_db_plane(&db, &invalid, BitDepth::U8, AutoscaleStrategy::Fixed, -22.0);
        assert_eq!(u8s, vec![0, 255, 128, 255, 0]);
        assert!(u16s.is_none());
    }

    #[test]
    fn invalid_pixels_scale_to_zero() {
        let db = array![[0.0_f32, 0.0]];
        let invalid = array![[false, true]];
        let (u8s, _) =
            scale_db_plane(&db, &invalid, BitDepth::U8, AutoscaleStrategy::Fixed, -22.0);
        assert_eq!(u8s, vec![255, 0]);
    }

    #[test]
    fn u16_depth_also_returns_u8_preview() {
        let db = array![[-11.0_f32]];
        let invalid = Array2::from_elem(db.dim(), false);
        let (u8s, u16s) =
            scale_db_plane(&db, &invalid, BitDepth::U16, AutoscaleStrategy::Fixed, -22.0);
        assert_eq!(u8s, vec![128]);
        assert_eq!(u16s.unwrap(), vec![32768]);
    }

    #[test]
    fn robust_window_stretches_valid_range() {
        let db = array![[-30.0_f32, -20.0, -15.0, -10.0, -5.0]];
        let invalid = array![[true, false, false, false, false]];
        let (u8s, _) = scale_db_plane(
            &db,
            &invalid,
            BitDepth::U8,
            AutoscaleStrategy::Robust,
            -22.0,
        );
        // Invalid pixel stays 0; darkest valid pixel sits at the window floor,
        // brightest at the ceiling.
        assert_eq!(u8s[0], 0);
        assert_eq!(u8s[1], 0);
        assert_eq!(u8s[4], 255);
        assert!(u8s[2] < u8s[3]);
    }

    #[test]
    fn all_invalid_plane_is_black() {
        let db = array![[-10.0_f32, -12.0]];
        let invalid = array![[true, true]];
        let (u8s, _) = scale_db_plane(
            &db,
            &invalid,
            BitDepth::U8,
            AutoscaleStrategy::Robust,
            -22.0,
        );
        assert_eq!(u8s, vec![0, 0]);
    }
}
