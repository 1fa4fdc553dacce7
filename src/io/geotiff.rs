//! Reader for the 3-band FLOAT32 scene product the processing service
//! returns. Decodes from any `Read + Seek` source (the service hands back
//! raw TIFF bytes over the wire) into per-band planes.
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use ndarray::Array2;
use thiserror::Error;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::info;

use crate::core::evalscript::OUTPUT_BANDS;
use crate::core::executor::ScenePlanes;

/// Errors encountered when decoding a scene product
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),
    #[error("Expected a {expected}-band product, found {found} bands")]
    BandCount { expected: usize, found: usize },
    #[error("Unsupported sample format: {0}")]
    SampleFormat(String),
    #[error("Pixel buffer length {len} does not match {width}x{height}x{bands}")]
    TruncatedData {
        len: usize,
        width: usize,
        height: usize,
        bands: usize,
    },
}

/// A decoded scene product: VV, VH, and dataMask planes plus dimensions.
#[derive(Debug, Clone)]
pub struct SceneReader {
    pub planes: ScenePlanes,
    pub width: usize,
    pub height: usize,
}

impl SceneReader {
    /// Decode a 3-band FLOAT32 TIFF from an arbitrary seekable source.
    pub fn from_reader<R: Read + Seek>(source: R) -> Result<Self, SceneError> {
        let mut decoder = Decoder::new(source)?;
        let (width, height) = decoder.dimensions()?;
        let (width, height) = (width as usize, height as usize);

        let colortype = decoder.colortype()?;
        let bands = match colortype {
            ColorType::RGB(32) => 3,
            ColorType::Gray(32) => 1,
            other => return Err(SceneError::SampleFormat(format!("{:?}", other))),
        };
        if bands != OUTPUT_BANDS {
            return Err(SceneError::BandCount {
                expected: OUTPUT_BANDS,
                found: bands,
            });
        }

        let data = match decoder.read_image()? {
            DecodingResult::F32(data) => data,
            _ => {
                return Err(SceneError::SampleFormat(
                    "expected FLOAT32 samples".to_string(),
                ));
            }
        };
        if data.len() != width * height * bands {
            return Err(SceneError::TruncatedData {
                len: data.len(),
                width,
                height,
                bands,
            });
        }

        info!("Decoded scene product: {}x{} pixels, {} bands", width, height, bands);

        // Pixel-interleaved chunky layout: VV, VH, dataMask per pixel
        let mut vv = Array2::<f32>::zeros((height, width));
        let mut vh = Array2::<f32>::zeros((height, width));
        let mut data_mask = Array2::<f32>::zeros((height, width));
        for (i, px) in data.chunks_exact(bands).enumerate() {
            let (r, c) = (i / width, i % width);
            vv[[r, c]] = px[0];
            vh[[r, c]] = px[1];
            data_mask[[r, c]] = px[2];
        }

        Ok(SceneReader {
            planes: ScenePlanes { vv, vh, data_mask },
            width,
            height,
        })
    }

    /// Decode from raw TIFF bytes, e.g. an HTTP response body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneError> {
        Self::from_reader(Cursor::new(bytes))
    }

    pub fn from_path(path: &Path) -> Result<Self, SceneError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::encoder::{TiffEncoder, colortype};

    #[test]
    fn garbage_bytes_are_a_tiff_error() {
        assert!(matches!(
            SceneReader::from_bytes(b"not a tiff"),
            Err(SceneError::Tiff(_))
        ));
    }

    #[test]
    fn single_band_product_is_rejected() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut buffer).unwrap();
            encoder
                .write_image::<colortype::Gray32Float>(2, 2, &[0.0_f32; 4])
                .unwrap();
        }
        let bytes = buffer.into_inner();
        match SceneReader::from_bytes(&bytes) {
            Err(SceneError::BandCount { expected, found }) => {
                assert_eq!(expected, 3);
                assert_eq!(found, 1);
            }
            other => panic!("expected BandCount, got {:?}", other),
        }
    }
}
