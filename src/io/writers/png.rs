use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::Result;

pub fn write_rgb_png(output: &Path, canvas: &RgbImage) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);
    let (width, height) = canvas.dimensions();
    PngEncoder::new(writer).write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgb8)?;
    Ok(())
}
