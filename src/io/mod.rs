//! I/O layer for scene products: the GeoTIFF scene reader and the TIFF/JPEG
//! writers for evaluated products and quicklooks.
pub mod geotiff;
pub use geotiff::{SceneError, SceneReader};

pub mod writers;
