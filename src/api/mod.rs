//! High-level, ergonomic library API: build Process API request payloads,
//! evaluate scenes locally, and render backscatter quicklooks to files or
//! in-memory buffers. Prefer these entrypoints over the low-level core and
//! io modules when embedding SARSEL.
use std::path::Path;

use tracing::info;

use crate::core::evalscript;
use crate::core::executor::{ScenePlanes, evaluate_scene, interleave_planes};
use crate::core::params::SceneParams;
use crate::core::processing::{autoscale, ops};
use crate::error::{Error, Result};
use crate::io::geotiff::SceneReader;
use crate::io::writers::jpeg::write_gray_jpeg;
use crate::io::writers::tiff::{write_tiff_f32_multiband, write_tiff_u8, write_tiff_u16};
use crate::types::{BitDepth, OutputFormat, QuicklookBand};

pub mod request;

pub use request::{ProcessRequest, TimeRange};

/// Result of in-memory quicklook rendering. `gray` always holds the 8-bit
/// rendering; `gray16` is filled in addition when U16 depth was requested.
#[derive(Debug, Clone)]
pub struct QuicklookImage {
    pub width: usize,
    pub height: usize,
    pub bit_depth: BitDepth,
    pub band: QuicklookBand,
    pub gray: Vec<u8>,
    pub gray16: Option<Vec<u16>>,
}

/// Build a ready-to-send Sentinel-1 GRD request payload for the given bbox,
/// `from/to` RFC3339 time range, CRS URI, and output resolution in meters.
pub fn build_request(
    bbox: [f64; 4],
    time_range: &str,
    crs: &str,
    resolution: f64,
) -> Result<ProcessRequest> {
    let time_range = TimeRange::parse(time_range)?;
    Ok(
        ProcessRequest::sentinel1_grd(bbox, time_range, &evalscript::setup())
            .with_crs(crs)
            .with_resolution(resolution),
    )
}

/// Simulate the remote host: read raw band planes from a 3-band TIFF, run
/// the evalscript over every pixel, and write the FLOAT32 scene product.
pub fn evaluate_scene_to_path(input: &Path, output: &Path) -> Result<()> {
    let reader = SceneReader::from_path(input)?;
    let setup = evalscript::setup();
    let planes = evaluate_scene(&setup, &reader.planes)?;
    let interleaved = interleave_planes(&planes);
    write_tiff_f32_multiband(output, reader.width, reader.height, &interleaved)
        .map_err(Error::external)?;
    info!(
        "Evaluated scene written: {:?} ({}x{}, {} bands)",
        output, reader.width, reader.height, setup.output.bands
    );
    Ok(())
}

/// Render a dB quicklook of one backscatter band into memory: convert the
/// selected band to dB, drop no-data (and optionally noise) pixels, and
/// scale for display.
pub fn quicklook_to_buffer(planes: &ScenePlanes, params: &SceneParams) -> Result<QuicklookImage> {
    let linear = match params.band {
        QuicklookBand::Vv => &planes.vv,
        QuicklookBand::Vh => &planes.vh,
    };
    let db = ops::linear_to_db(linear);
    let nodata = ops::nodata_mask(&planes.data_mask);
    let invalid = if params.apply_noise_mask {
        let noise = ops::noise_mask(&db, params.noise_floor_db);
        ops::invalid_mask(&nodata, &noise)
    } else {
        nodata
    };

    let (gray, gray16) = autoscale::scale_db_plane(
        &db,
        &invalid,
        params.bit_depth,
        params.autoscale,
        params.noise_floor_db,
    );

    Ok(QuicklookImage {
        width: planes.width(),
        height: planes.height(),
        bit_depth: params.bit_depth,
        band: params.band,
        gray,
        gray16,
    })
}

/// Read a fetched 3-band FLOAT32 scene product and write a quicklook to disk
/// in the requested format. JPEG output is always 8-bit.
pub fn quicklook_to_path(input: &Path, output: &Path, params: &SceneParams) -> Result<()> {
    let reader = SceneReader::from_path(input)?;
    let image = quicklook_to_buffer(&reader.planes, params)?;

    match (params.format, params.bit_depth) {
        (OutputFormat::TIFF, BitDepth::U8) => {
            write_tiff_u8(output, image.width, image.height, &image.gray)
                .map_err(Error::external)?;
        }
        (OutputFormat::TIFF, BitDepth::U16) => {
            let gray16 = image.gray16.as_deref().ok_or_else(|| {
                Error::Processing("U16 quicklook buffer missing".to_string())
            })?;
            write_tiff_u16(output, image.width, image.height, gray16)
                .map_err(Error::external)?;
        }
        (OutputFormat::JPEG, _) => {
            write_gray_jpeg(output, image.width, image.height, &image.gray)
                .map_err(Error::external)?;
        }
    }

    info!(
        "Quicklook written: {:?} ({} band, {}x{})",
        output, image.band, image.width, image.height
    );
    Ok(())
}
