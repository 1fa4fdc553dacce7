use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};

/// Write the evaluated 3-band FLOAT32 scene product, pixel-interleaved
/// VV/VH/dataMask.
pub fn write_tiff_f32_multiband(
    output: &Path,
    cols: usize,
    rows: usize,
    interleaved: &[f32],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(output)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    encoder.write_image::<colortype::RGB32Float>(cols as u32, rows as u32, interleaved)?;
    Ok(())
}

pub fn write_tiff_u8(
    output: &Path,
    cols: usize,
    rows: usize,
    data: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(output)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    encoder.write_image::<colortype::Gray8>(cols as u32, rows as u32, data)?;
    Ok(())
}

pub fn write_tiff_u16(
    output: &Path,
    cols: usize,
    rows: usize,
    data: &[u16],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(output)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    encoder.write_image::<colortype::Gray16>(cols as u32, rows as u32, data)?;
    Ok(())
}
