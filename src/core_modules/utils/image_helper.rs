use crate::error::Result;
use image::ImageEncoder;
use image::RgbImage;
use std::io::BufWriter;
use std::path::Path;

/// Writes an RGB image to `path` as PNG.
pub fn save_png(path: &Path, image: &RgbImage) -> Result<()> {
    let output = BufWriter::new(std::fs::File::create(path)?);
    let encoder = image::codecs::png::PngEncoder::new(output);

    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(())
}

/// Writes a mask or intensity map to `path` as PNG.
pub fn save_gray_png(path: &Path, image: &image::GrayImage) -> Result<()> {
    let output = BufWriter::new(std::fs::File::create(path)?);
    let encoder = image::codecs::png::PngEncoder::new(output);

    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::L8,
    )?;

    Ok(())
}
