//! Homogeneous participating medium (smoke, fog).

use crate::hittable::{HitRecord, Hittable};
use crate::sampling::{gen_f32, with_scoped_rng};
use crate::{Isotropic, Material};
use ember_math::{Aabb, Color, Interval, Ray, Vec3};
use std::sync::Arc;

/// Fog of constant density filling a boundary shape.
///
/// The boundary must be closed and convex for the entry/exit logic to hold.
/// A density that is not positive gives a medium that never scatters.
pub struct ConstantMedium {
    boundary: Box<dyn Hittable>,
    /// `None` for an empty medium
    neg_inv_density: Option<f32>,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(
        boundary: Box<dyn Hittable>,
        density: f32,
        phase_function: Arc<dyn Material>,
    ) -> Self {
        Self {
            boundary,
            neg_inv_density: (density > 0.0).then(|| -1.0 / density),
            phase_function,
        }
    }

    /// Medium with an [`Isotropic`] phase function of the given color.
    pub fn from_color(boundary: Box<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self::new(boundary, density, Arc::new(Isotropic::from_color(albedo)))
    }
}

impl Hittable for ConstantMedium {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let neg_inv_density = self.neg_inv_density?;
        let entry = self.boundary.hit(ray, Interval::UNIVERSE)?;
        let exit = self
            .boundary
            .hit(ray, Interval::new(entry.t + 0.0001, f32::INFINITY))?;

        let t_enter = entry.t.max(ray_t.min).max(0.0);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return None;
        }

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        // `hit` has no generator parameter; use the bucket-seeded scoped one
        let xi = with_scoped_rng(|rng| gen_f32(rng));
        let hit_distance = neg_inv_density * (1.0 - xi).ln();

        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = (t_enter + hit_distance / ray_length).min(t_exit);
        Some(HitRecord {
            p: ray.at(t),
            // Arbitrary: isotropic scattering ignores the normal
            normal: Vec3::X,
            material: self.phase_function.as_ref(),
            u: 0.0,
            v: 0.0,
            t,
            front_face: true,
        })
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        self.boundary.bounding_box(time0, time1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};

    fn fog(density: f32) -> ConstantMedium {
        let boundary = Sphere::new(
            Vec3::ZERO,
            1.0,
            Arc::new(Lambertian::from_color(Color::ONE)),
        );
        ConstantMedium::from_color(Box::new(boundary), density, Color::splat(0.5))
    }

    #[test]
    fn test_dense_medium_scatters_inside_boundary() {
        let medium = fog(1e4);
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        for _ in 0..50 {
            let rec = medium
                .hit(&ray, Interval::new(0.001, f32::INFINITY))
                .expect("dense fog always scatters");
            assert!(rec.t >= 4.0 && rec.t <= 6.0);
            assert!(rec.p.length() <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn test_thin_medium_mostly_transmits() {
        let medium = fog(1e-6);
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let hits = (0..100)
            .filter(|_| medium.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_some())
            .count();
        assert!(hits < 5);
    }

    #[test]
    fn test_ray_missing_boundary_misses_medium() {
        let medium = fog(1e4);
        let ray = Ray::new_simple(Vec3::new(0.0, 5.0, -5.0), Vec3::Z);
        assert!(medium.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_ray_starting_inside_medium() {
        let medium = fog(1e4);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);

        let rec = medium
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("dense fog always scatters");
        assert!(rec.t > 0.0 && rec.t <= 1.0);
    }

    #[test]
    fn test_non_positive_density_never_scatters() {
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let forward = Interval::new(0.001, f32::INFINITY);

        for density in [-1.0, 0.0, f32::NAN] {
            let medium = fog(density);
            assert!((0..50).all(|_| medium.hit(&ray, forward).is_none()), "{density}");
        }
    }

    #[test]
    fn test_hit_stays_inside_ray_interval() {
        let medium = fog(0.5);
        let ray = Ray::new_simple(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let ray_t = Interval::new(4.5, 5.5);

        for _ in 0..200 {
            if let Some(rec) = medium.hit(&ray, ray_t) {
                assert!(ray_t.contains(rec.t), "t = {}", rec.t);
            }
        }
    }

    #[test]
    fn test_bounding_box_is_boundary_box() {
        let medium = fog(1.0);
        assert_eq!(medium.bounding_box(0.0, 1.0).x, Interval::new(-1.0, 1.0));
    }
}
