//! Ember renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer built from three capability traits:
//! [`Hittable`] for geometry, [`Material`] for scattering and emission, and
//! [`Texture`] for surface color. The integrator ([`ray_color`]) only ever
//! talks to those traits, so new primitives, materials and textures plug in
//! without touching it.

mod aa_rect;
mod bucket;
mod bvh;
mod camera;
mod color;
mod constant_medium;
mod hittable;
mod material;
mod moving_sphere;
mod output;
mod perlin;
mod renderer;
mod sampling;
mod sphere;
mod texture;

pub use aa_rect::{AxisRect, Plane};
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use color::write_color;
pub use constant_medium::ConstantMedium;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use moving_sphere::MovingSphere;
pub use output::{save, save_png, write_ppm, ImageBuffer, OutputError};
pub use perlin::Perlin;
pub use renderer::{ray_color, render, render_pixel, Background, RenderConfig};
pub use sampling::{
    gen_f32, gen_range_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture, TextureError};

/// Re-export math types from ember_math
pub use ember_math::{Aabb, Color, Interval, Point3, Ray, Vec3, Vec3Ext};
