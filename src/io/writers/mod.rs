pub mod jpeg;
pub mod tiff;
