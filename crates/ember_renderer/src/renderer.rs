//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with an explicit depth limit
//! - Emission from lights, attenuation from every other bounce
//! - Anti-aliasing via multi-sampling
//! - Parallel bucket rendering with per-bucket seeded generators

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::output::ImageBuffer;
use crate::{Camera, Hittable};
use ember_math::{Color, Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Closest hit distance accepted after a bounce; keeps rays from
/// re-hitting the surface they just left.
const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// What a ray sees when it escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// A constant color.
    Solid(Color),
    /// White at the horizon blending to light blue overhead.
    SkyGradient,
}

impl Background {
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::SkyGradient => sky_gradient(ray),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Color for rays that escape the scene
    pub background: Background,
    /// Seed for the per-bucket random generators
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Background::default(),
            seed: 0,
        }
    }
}

/// Compute the radiance carried back along a ray.
///
/// Each bounce adds the surface's emission and multiplies whatever the
/// scattered ray returns by the material's attenuation. Paths still bouncing
/// after `depth` hits contribute black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
        return background.color(ray);
    };

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, background, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Sum of `config.samples_per_pixel` radiance samples for pixel (x, y).
///
/// The sum is not averaged; [`crate::write_color`] divides by the sample
/// count when converting to 8-bit.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, &config.background, rng);
    }

    pixel_color
}

/// Render the entire scene to an image buffer.
///
/// Buckets are traced in parallel; each one owns a generator derived from
/// `config.seed` and its index, so output does not depend on scheduling.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let (width, height) = (camera.image_width, camera.image_height);
    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {} ({} buckets)",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, world, config))
        .collect();

    let mut image = ImageBuffer::new(width, height, config.samples_per_pixel);
    for result in &results {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let x = bucket.x + i as u32 % bucket.width;
            let y = bucket.y + i as u32 / bucket.width;
            image.set(x, y, *color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
