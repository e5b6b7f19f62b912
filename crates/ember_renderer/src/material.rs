//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use ember_math::{Color, Point3, Ray, Vec3Ext};
use rand::RngCore;
use std::sync::Arc;

/// Outgoing ray and the color factor applied to whatever it brings back.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

impl ScatterResult {
    fn new(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are fixed at construction and shared between primitives, so
/// both methods take `&self` only.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Light emitted at the given surface coordinates. Black for everything
    /// except lights.
    fn emitted(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        let scattered = Ray::new(rec.p, scatter_direction, ray_in.time());
        let attenuation = self.albedo.value(rec.u, rec.v, rec.p);
        Some(ScatterResult::new(attenuation, scattered))
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = ray_in.direction().normalize().reflect_about(rec.normal);
        let scattered_dir = if self.fuzz > 0.0 {
            reflected + self.fuzz * random_in_unit_sphere(rng)
        } else {
            reflected
        };

        // Fuzz can push the reflection below the surface; that energy is lost
        if scattered_dir.dot(rec.normal) > 0.0 {
            let scattered = Ray::new(rec.p, scattered_dir, ray_in.time());
            Some(ScatterResult::new(self.albedo, scattered))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ratio: f32) -> f32 {
        let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            unit_direction.reflect_about(rec.normal)
        } else {
            unit_direction.refract_through(rec.normal, refraction_ratio)
        };

        let scattered = Ray::new(rec.p, direction, ray_in.time());
        Some(ScatterResult::new(Color::ONE, scattered))
    }
}

/// Diffuse light emitter. The only source of energy in a scene.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }

    pub fn from_color(emit: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(emit)))
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord<'_>,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Point3) -> Color {
        self.emit.value(u, v, p)
    }
}

/// Phase function for participating media: scatters uniformly in all
/// directions.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    pub fn from_color(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let scattered = Ray::new(rec.p, random_in_unit_sphere(rng), ray_in.time());
        let attenuation = self.albedo.value(rec.u, rec.v, rec.p);
        Some(ScatterResult::new(attenuation, scattered))
    }
}
