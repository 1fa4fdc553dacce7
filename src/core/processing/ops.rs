//! Backscatter plane operations: linear power to dB, and the no-data /
//! noise-floor masks consumers apply before display.
use ndarray::{Array2, Zip};

/// Epsilon added before log10 so zero-power pixels stay finite.
pub const DB_EPSILON: f32 = 1e-10;

/// Default noise floor in dB; backscatter below this is treated as noise.
pub const DEFAULT_NOISE_FLOOR_DB: f32 = -22.0;

/// Convert a linear-power plane to dB: `10 * log10(x + epsilon)`.
pub fn linear_to_db(linear: &Array2<f32>) -> Array2<f32> {
    linear.mapv(|v| 10.0 * (v + DB_EPSILON).log10())
}

/// True where the scene has no observation (`dataMask == 0`).
pub fn nodata_mask(data_mask: &Array2<f32>) -> Array2<bool> {
    data_mask.mapv(|v| v == 0.0)
}

/// True where a dB plane falls below the noise floor.
pub fn noise_mask(db: &Array2<f32>, floor_db: f32) -> Array2<bool> {
    db.mapv(|v| v < floor_db)
}

/// Union of the no-data and noise masks: pixels a display should drop.
pub fn invalid_mask(nodata: &Array2<bool>, noise: &Array2<bool>) -> Array2<bool> {
    let mut out = Array2::from_elem(nodata.dim(), false);
    Zip::from(&mut out)
        .and(nodata)
        .and(noise)
        .for_each(|o, &a, &b| *o = a | b);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn db_conversion_uses_epsilon_floor() {
        let linear = array![[1.0_f32, 0.0]];
        let db = linear_to_db(&linear);
        // 10*log10(1 + 1e-10) is within a whisker of 0 dB
        assert!(db[[0, 0]].abs() < 1e-6);
        // Zero power lands on the epsilon floor, -100 dB
        assert!((db[[0, 1]] + 100.0).abs() < 1e-3);
    }

    #[test]
    fn masks_combine_as_union() {
        let data_mask = array![[1.0_f32, 0.0, 1.0]];
        let db = array![[-10.0_f32, -10.0, -30.0]];
        let nodata = nodata_mask(&data_mask);
        let noise = noise_mask(&db, DEFAULT_NOISE_FLOOR_DB);
        let invalid = invalid_mask(&nodata, &noise);
        assert_eq!(nodata, array![[false, true, false]]);
        assert_eq!(noise, array![[false, false, true]]);
        assert_eq!(invalid, array![[false, true, true]]);
    }
}
