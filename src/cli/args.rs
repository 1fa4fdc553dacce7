use clap::Parser;
use std::path::PathBuf;

use sarsel::types::{AutoscaleStrategy, BitDepth, OutputFormat, QuicklookBand};

#[derive(Parser)]
#[command(name = "sarsel", version, about = "SARSEL CLI")]
pub struct CliArgs {
    /// Input scene TIFF: a fetched 3-band FLOAT32 product (quicklook mode)
    /// or raw band planes (--evaluate)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output filename
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quicklook output format (tiff or jpeg)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::JPEG)]
    pub format: OutputFormat,

    /// Quicklook bit depth (8 or 16; JPEG is always 8)
    #[arg(long, value_enum, default_value_t = BitDepth::U8)]
    pub bit_depth: BitDepth,

    /// Which backscatter band the quicklook renders (vv or vh)
    #[arg(long, value_enum, default_value_t = QuicklookBand::Vv)]
    pub band: QuicklookBand,

    /// Display scaling strategy (fixed or robust)
    #[arg(long, value_enum, default_value_t = AutoscaleStrategy::Fixed)]
    pub autoscale: AutoscaleStrategy,

    /// Noise floor in dB; backscatter below this is masked
    #[arg(long, default_value_t = -22.0, allow_hyphen_values = true)]
    pub noise_floor: f32,

    /// Keep noise pixels visible instead of masking them
    #[arg(long, default_value_t = false)]
    pub keep_noise: bool,

    /// Run the evalscript locally over the input band planes and write the
    /// 3-band FLOAT32 product instead of a quicklook
    #[arg(long, default_value_t = false)]
    pub evaluate: bool,

    /// Write the Process API request payload JSON to this path ("-" for stdout)
    #[arg(long)]
    pub emit_request: Option<PathBuf>,

    /// Bounding box in CRS units (request mode)
    #[arg(long, num_args = 4, value_names = ["MINX", "MINY", "MAXX", "MAXY"], allow_hyphen_values = true)]
    pub bbox: Option<Vec<f64>>,

    /// CRS URI for the bounding box (request mode)
    #[arg(long, default_value = sarsel::api::request::DEFAULT_CRS_URI)]
    pub crs: String,

    /// Acquisition time range as RFC3339 `from/to` (request mode)
    #[arg(long)]
    pub time_range: Option<String>,

    /// Output resolution in meters (request mode)
    #[arg(long, default_value_t = 10.0)]
    pub resolution: f64,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
