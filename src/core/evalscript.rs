//! The band-selection evalscript contract for Sentinel-1 GRD scenes.
//!
//! The remote processing service drives a job in two phases: it reads the
//! declared band configuration once (`setup`), then invokes the per-pixel
//! transformation (`evaluate_pixel`) for every pixel in the scene, in whatever
//! order and on however many workers it likes. The transformation is a pure
//! passthrough of linear-power backscatter plus the validity flag; everything
//! downstream (dB conversion, masking, display) happens in the consumer.
//!
//! `render_evalscript` turns the declared configuration into the JavaScript
//! snippet the service executes, so the Rust record stays the single source
//! of truth for what the job requests.
use serde::{Deserialize, Serialize};

use crate::types::SampleType;

/// VV polarization backscatter, linear power.
pub const BAND_VV: &str = "VV";
/// VH polarization backscatter, linear power.
pub const BAND_VH: &str = "VH";
/// Per-pixel validity flag: 1 = valid observation, 0 = no data.
pub const BAND_DATA_MASK: &str = "dataMask";

/// Number of bands in the declared output raster. Every tuple produced by
/// [`evaluate_pixel`] has exactly this length.
pub const OUTPUT_BANDS: usize = 3;

/// Output raster shape and per-sample encoding, as the service consumes it
/// to allocate the result raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub bands: usize,
    #[serde(rename = "sampleType")]
    pub sample_type: SampleType,
}

/// Immutable per-job band configuration: which source bands the service must
/// fetch before invocation, and how to encode the output raster. Created once
/// at job setup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalSetup {
    pub input: Vec<String>,
    pub output: OutputSpec,
}

/// One pixel's worth of input band values, keyed by the names declared in
/// [`EvalSetup::input`]. Provided fresh by the host for every pixel and
/// discarded after the call returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub vv: f32,
    pub vh: f32,
    pub data_mask: f32,
}

impl Sample {
    /// Look up a band value by its declared name.
    pub fn band(&self, name: &str) -> Option<f32> {
        match name {
            BAND_VV => Some(self.vv),
            BAND_VH => Some(self.vh),
            BAND_DATA_MASK => Some(self.data_mask),
            _ => None,
        }
    }
}

/// Declare the job configuration. Pure and deterministic; the host calls this
/// exactly once per job before any pixel processing begins.
pub fn setup() -> EvalSetup {
    EvalSetup {
        input: vec![
            BAND_VV.to_string(),
            BAND_VH.to_string(),
            BAND_DATA_MASK.to_string(),
        ],
        output: OutputSpec {
            bands: OUTPUT_BANDS,
            sample_type: SampleType::Float32,
        },
    }
}

/// Pure per-pixel passthrough: `[VV, VH, dataMask]`, value-exact, with no
/// rescaling, clamping, or unit conversion. Performs no validation; the host
/// guarantees every declared band is present in `sample`.
#[inline]
pub fn evaluate_pixel(sample: &Sample) -> [f32; OUTPUT_BANDS] {
    [sample.vv, sample.vh, sample.data_mask]
}

/// Render the JavaScript evalscript the remote service executes, generated
/// from the declared configuration so script and record cannot drift apart.
pub fn render_evalscript(setup: &EvalSetup) -> String {
    let inputs = setup
        .input
        .iter()
        .map(|b| format!("\"{}\"", b))
        .collect::<Vec<_>>()
        .join(", ");
    let returns = setup
        .input
        .iter()
        .map(|b| format!("sample.{}", b))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"//VERSION=3
function setup() {{
  return {{
    input: [{inputs}],
    output: {{ bands: {bands}, sampleType: "{sample_type}" }}
  }};
}}

function evaluatePixel(sample) {{
  return [{returns}];
}}
"#,
        bands = setup.output.bands,
        sample_type = setup.output.sample_type.wire_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_declares_three_float32_bands() {
        let cfg = setup();
        assert_eq!(cfg.input, vec!["VV", "VH", "dataMask"]);
        assert_eq!(cfg.output.bands, 3);
        assert_eq!(cfg.output.sample_type, SampleType::Float32);
    }

    #[test]
    fn tuple_length_matches_declared_band_count() {
        let cfg = setup();
        let out = evaluate_pixel(&Sample {
            vv: 0.1,
            vh: 0.2,
            data_mask: 1.0,
        });
        assert_eq!(out.len(), cfg.output.bands);
    }

    #[test]
    fn passthrough_is_value_exact() {
        let out = evaluate_pixel(&Sample {
            vv: 0.0023,
            vh: 0.00041,
            data_mask: 1.0,
        });
        assert_eq!(out, [0.0023, 0.00041, 1.0]);
    }

    #[test]
    fn nodata_pixel_passes_through_untouched() {
        // No substitution for no-data pixels; masking is the consumer's job.
        let out = evaluate_pixel(&Sample {
            vv: 0.0,
            vh: 0.0,
            data_mask: 0.0,
        });
        assert_eq!(out, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let sample = Sample {
            vv: 0.77,
            vh: 0.012,
            data_mask: 1.0,
        };
        assert_eq!(evaluate_pixel(&sample), evaluate_pixel(&sample));
    }

    #[test]
    fn band_lookup_follows_declared_names() {
        let sample = Sample {
            vv: 1.0,
            vh: 2.0,
            data_mask: 1.0,
        };
        assert_eq!(sample.band(BAND_VV), Some(1.0));
        assert_eq!(sample.band(BAND_VH), Some(2.0));
        assert_eq!(sample.band(BAND_DATA_MASK), Some(1.0));
        assert_eq!(sample.band("HH"), None);
    }

    #[test]
    fn setup_serializes_with_wire_field_names() {
        let json = serde_json::to_value(setup()).unwrap();
        assert_eq!(json["input"][2], "dataMask");
        assert_eq!(json["output"]["bands"], 3);
        assert_eq!(json["output"]["sampleType"], "FLOAT32");
    }

    #[test]
    fn rendered_script_matches_configuration() {
        let script = render_evalscript(&setup());
        assert!(script.starts_with("//VERSION=3\n"));
        assert!(script.contains("input: [\"VV\", \"VH\", \"dataMask\"]"));
        assert!(script.contains("output: { bands: 3, sampleType: \"FLOAT32\" }"));
        assert!(script.contains("return [sample.VV, sample.VH, sample.dataMask];"));
    }
}
