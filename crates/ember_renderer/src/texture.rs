//! Textures: pure functions from surface coordinates to color.

use crate::perlin::Perlin;
use ember_math::{Color, Interval, Point3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building an image texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Anything that can color a surface.
pub trait Texture: Send + Sync {
    /// Color at surface coordinates `(u, v)` and world-space point `p`.
    fn value(&self, u: f32, v: f32, p: Point3) -> Color;
}

/// A constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        self.color
    }
}

/// Solid 3D checker pattern. Depends only on the point, not on UV.
pub struct CheckerTexture {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Color, odd: Color) -> Self {
        Self::new(
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// Marble-like pattern from Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    /// Build with a noise lattice drawn from `rng`.
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }

    /// Build with a lattice seeded from `seed`; same seed, same pattern.
    pub fn with_seed(scale: f32, seed: u64) -> Self {
        Self::new(scale, &mut StdRng::seed_from_u64(seed))
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Point3) -> Color {
        Color::ONE * 0.5 * (1.0 + (self.scale * p.z + 10.0 * self.noise.turb(p, 7)).sin())
    }
}

/// Decoded 8-bit RGB pixels, row-major from the top row.
struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Texture sampled from an image.
///
/// A texture without image data renders as solid cyan so a missing asset is
/// obvious in the output instead of aborting the render.
pub struct ImageTexture {
    data: Option<ImageData>,
}

impl ImageTexture {
    const BYTES_PER_PIXEL: usize = 3;

    /// Color returned when no image data is loaded.
    pub const MISSING: Color = Color::new(0.0, 1.0, 1.0);

    /// A texture with no image data.
    pub fn empty() -> Self {
        Self { data: None }
    }

    /// Build from interleaved RGB bytes.
    pub fn from_rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(TextureError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            data: Some(ImageData {
                width,
                height,
                pixels,
            }),
        })
    }

    /// Decode an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Self::from_rgb8(width, height, rgb.into_raw())
    }

    /// Decode an image file, falling back to the missing-texture color.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("Couldn't load texture image file {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Image dimensions, or `(0, 0)` without data.
    pub fn dimensions(&self) -> (u32, u32) {
        self.data
            .as_ref()
            .map_or((0, 0), |data| (data.width, data.height))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Point3) -> Color {
        let Some(data) = &self.data else {
            return Self::MISSING;
        };

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Image rows run top to bottom
        let v = 1.0 - unit.clamp(v);

        let i = ((u * data.width as f32) as u32).min(data.width - 1) as usize;
        let j = ((v * data.height as f32) as u32).min(data.height - 1) as usize;

        let offset = (j * data.width as usize + i) * Self::BYTES_PER_PIXEL;
        let pixel = &data.pixels[offset..offset + Self::BYTES_PER_PIXEL];

        let color_scale = 1.0 / 255.0;
        Color::new(
            color_scale * pixel[0] as f32,
            color_scale * pixel[1] as f32,
            color_scale * pixel[2] as f32,
        )
    }
}
