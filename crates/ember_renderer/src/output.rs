//! Image buffer and file writers.
//!
//! The buffer keeps raw per-pixel sample sums; conversion to 8-bit happens
//! only when writing, through [`write_color`].

use crate::color::write_color;
use ember_math::Color;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// Accumulated render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples summed into each pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Row-major pixel sums, top row first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-corrected 8-bit RGB, three bytes per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| write_color(*color, self.samples_per_pixel))
            .collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Write a plain-text (P3) PPM.
pub fn write_ppm<W: Write>(buffer: &ImageBuffer, mut writer: W) -> Result<(), OutputError> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", buffer.width, buffer.height)?;
    writeln!(writer, "255")?;

    for rgb in buffer.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    writer.flush()?;
    Ok(())
}

/// Encode as PNG.
pub fn save_png(buffer: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), OutputError> {
    image::save_buffer_with_format(
        path.as_ref(),
        &buffer.to_rgb8(),
        buffer.width,
        buffer.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

/// Save using the format implied by the file extension.
///
/// `.ppm` is written as plain text; other extensions go through the `image`
/// crate's encoders.
pub fn save(buffer: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => write_ppm(buffer, BufWriter::new(File::create(path)?)),
        "png" => save_png(buffer, path),
        _ => {
            let format = image::ImageFormat::from_path(path)
                .map_err(|_| OutputError::UnsupportedFormat(path.display().to_string()))?;
            image::save_buffer_with_format(
                path,
                &buffer.to_rgb8(),
                buffer.width,
                buffer.height,
                image::ColorType::Rgb8,
                format,
            )?;
            Ok(())
        }
    }?;

    log::info!("Saved {}", path.display());
    Ok(())
}
