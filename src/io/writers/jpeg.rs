use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};

pub fn write_rgb_jpeg(output: &Path, canvas: &RgbImage) -> Result<()> {
    let (width, height) = canvas.dimensions();
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(Error::UnsupportedFormat(format!(
                "JPEG cannot hold {}x{} pixels",
                width, height
            )));
        }
    };
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 95);
    encoder.encode(canvas.as_raw(), w, h, ColorType::Rgb)?;
    Ok(())
}
