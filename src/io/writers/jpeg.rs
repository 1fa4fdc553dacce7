use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const QUICKLOOK_QUALITY: u8 = 95;

pub fn write_gray_jpeg(
    output: &Path,
    cols: usize,
    rows: usize,
    data: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, QUICKLOOK_QUALITY);
    encoder.encode(data, cols as u16, rows as u16, ColorType::Luma)?;
    Ok(())
}
