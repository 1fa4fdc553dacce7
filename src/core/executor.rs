//! Host-side scene evaluation.
//!
//! Plays the role of the remote processing service: validate the declared
//! configuration once at job setup, then drive the per-pixel transformation
//! over whole band planes. Because the transformation is pure, the plane
//! sweep runs in parallel without any ordering constraint.
use ndarray::{Array2, Zip};
use tracing::debug;

use crate::core::evalscript::{self, BAND_DATA_MASK, BAND_VH, BAND_VV, EvalSetup, Sample};
use crate::error::{Error, Result};

/// Per-band planes for one scene, row-major, all the same shape.
/// Holds either raw input bands (before evaluation) or the passed-through
/// product planes (after evaluation); the contract keeps them value-identical.
#[derive(Debug, Clone)]
pub struct ScenePlanes {
    pub vv: Array2<f32>,
    pub vh: Array2<f32>,
    pub data_mask: Array2<f32>,
}

impl ScenePlanes {
    /// (rows, cols) of the scene.
    pub fn dim(&self) -> (usize, usize) {
        self.vv.dim()
    }

    pub fn width(&self) -> usize {
        self.vv.ncols()
    }

    pub fn height(&self) -> usize {
        self.vv.nrows()
    }

    fn check_shapes(&self) -> Result<()> {
        let expected = self.vv.dim();
        for plane in [&self.vh, &self.data_mask] {
            if plane.dim() != expected {
                return Err(Error::ShapeMismatch {
                    expected,
                    found: plane.dim(),
                });
            }
        }
        Ok(())
    }
}

/// Job-setup validation: the declared output band count must match the tuple
/// length the per-pixel function actually produces, and every declared input
/// band must be one the executor can supply. Runs before any pixel is touched;
/// a mismatch fails the job here, never per-pixel.
pub fn validate_setup(setup: &EvalSetup) -> Result<()> {
    let probe = Sample {
        vv: 0.0,
        vh: 0.0,
        data_mask: 0.0,
    };
    let produced = evalscript::evaluate_pixel(&probe).len();
    if produced != setup.output.bands {
        return Err(Error::BandCountMismatch {
            declared: setup.output.bands,
            produced,
        });
    }

    for band in &setup.input {
        if !matches!(band.as_str(), BAND_VV | BAND_VH | BAND_DATA_MASK) {
            return Err(Error::UnknownBand { band: band.clone() });
        }
    }

    Ok(())
}

/// Run the evalscript over a whole scene, producing `setup.output.bands`
/// output planes positionally mapped to output raster bands.
pub fn evaluate_scene(setup: &EvalSetup, bands: &ScenePlanes) -> Result<Vec<Array2<f32>>> {
    validate_setup(setup)?;
    bands.check_shapes()?;

    let dim = bands.dim();
    debug!("Evaluating scene: {}x{} pixels", dim.1, dim.0);

    let mut out0 = Array2::<f32>::zeros(dim);
    let mut out1 = Array2::<f32>::zeros(dim);
    let mut out2 = Array2::<f32>::zeros(dim);

    Zip::from(&mut out0)
        .and(&mut out1)
        .and(&mut out2)
        .and(&bands.vv)
        .and(&bands.vh)
        .and(&bands.data_mask)
        .par_for_each(|o0, o1, o2, &vv, &vh, &dm| {
            let tuple = evalscript::evaluate_pixel(&Sample {
                vv,
                vh,
                data_mask: dm,
            });
            *o0 = tuple[0];
            *o1 = tuple[1];
            *o2 = tuple[2];
        });

    let planes = vec![out0, out1, out2];
    debug_assert_eq!(planes.len(), setup.output.bands);
    Ok(planes)
}

/// Interleave output planes into a single row-major, pixel-interleaved buffer
/// ready for a multiband raster writer.
pub fn interleave_planes(planes: &[Array2<f32>]) -> Vec<f32> {
    let (rows, cols) = planes[0].dim();
    let mut buf = Vec::with_capacity(rows * cols * planes.len());
    for r in 0..rows {
        for c in 0..cols {
            for plane in planes {
                buf.push(plane[[r, c]]);
            }
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn tiny_scene() -> ScenePlanes {
        ScenePlanes {
            vv: array![[0.0023, 0.5], [0.0, 1.25]],
            vh: array![[0.00041, 0.25], [0.0, 0.75]],
            data_mask: array![[1.0, 1.0], [0.0, 1.0]],
        }
    }

    #[test]
    fn valid_setup_passes() {
        assert!(validate_setup(&evalscript::setup()).is_ok());
    }

    #[test]
    fn band_count_mismatch_fails_at_setup() {
        let mut cfg = evalscript::setup();
        cfg.output.bands = 2;
        match validate_setup(&cfg) {
            Err(Error::BandCountMismatch { declared, produced }) => {
                assert_eq!(declared, 2);
                assert_eq!(produced, 3);
            }
            other => panic!("expected BandCountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn unknown_input_band_fails_at_setup() {
        let mut cfg = evalscript::setup();
        cfg.input.push("HH".to_string());
        assert!(matches!(
            validate_setup(&cfg),
            Err(Error::UnknownBand { .. })
        ));
    }

    #[test]
    fn evaluated_planes_pass_values_through() {
        let scene = tiny_scene();
        let planes = evaluate_scene(&evalscript::setup(), &scene).unwrap();
        assert_eq!(planes.len(), 3);
        assert_eq!(planes[0], scene.vv);
        assert_eq!(planes[1], scene.vh);
        assert_eq!(planes[2], scene.data_mask);
    }

    #[test]
    fn pixel_order_does_not_matter() {
        // Transposing the scene permutes pixel visiting order; each pixel's
        // result must be unchanged because no state is shared between calls.
        let scene = tiny_scene();
        let transposed = ScenePlanes {
            vv: scene.vv.t().to_owned(),
            vh: scene.vh.t().to_owned(),
            data_mask: scene.data_mask.t().to_owned(),
        };
        let direct = evaluate_scene(&evalscript::setup(), &scene).unwrap();
        let permuted = evaluate_scene(&evalscript::setup(), &transposed).unwrap();
        for (a, b) in direct.iter().zip(&permuted) {
            assert_eq!(a.t().to_owned(), *b);
        }
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let mut scene = tiny_scene();
        scene.vh = Array2::zeros((3, 2));
        assert!(matches!(
            evaluate_scene(&evalscript::setup(), &scene),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn interleaving_is_pixel_major() {
        let planes = vec![
            array![[1.0_f32, 2.0]],
            array![[10.0_f32, 20.0]],
            array![[100.0_f32, 200.0]],
        ];
        assert_eq!(
            interleave_planes(&planes),
            vec![1.0, 10.0, 100.0, 2.0, 20.0, 200.0]
        );
    }
}
