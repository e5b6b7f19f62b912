//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use std::f32::consts::PI;
use std::sync::Arc;

/// A static sphere.
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero, and a sphere
    /// of radius zero is never hit.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// UV coordinates for a point on the unit sphere centered at the origin.
///
/// `u` runs around the Y axis starting at X = -1, `v` from Y = -1 to Y = +1.
pub(crate) fn sphere_uv(p: Vec3) -> (f32, f32) {
    let theta = (-p.y).clamp(-1.0, 1.0).acos();
    let phi = (-p.z).atan2(p.x) + PI;

    (phi / (2.0 * PI), theta / PI)
}

/// Nearest root of the ray/sphere quadratic inside `ray_t`, if any.
///
/// Degenerate spheres have no surface normal, so they are never hit.
pub(crate) fn sphere_root(center: Point3, radius: f32, ray: &Ray, ray_t: Interval) -> Option<f32> {
    if radius.is_nan() || radius <= 0.0 {
        return None;
    }

    let oc = ray.origin() - center;
    let a = ray.direction().length_squared();
    let half_b = oc.dot(ray.direction());
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let root = (-half_b - sqrtd) / a;
    if ray_t.contains(root) {
        return Some(root);
    }
    let root = (-half_b + sqrtd) / a;
    ray_t.contains(root).then_some(root)
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = sphere_root(self.center, self.radius, ray, ray_t)?;

        let outward_normal = (ray.at(t) - self.center) / self.radius;
        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            sphere_uv(outward_normal),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(
            center,
            radius,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        )
    }

    const FORWARD: Interval = Interval::new(0.001, f32::INFINITY);

    #[test]
    fn test_sphere_hit() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, FORWARD).expect("should hit");
        assert!((rec.t - 0.5).abs() < 0.001);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        assert!(sphere.hit(&ray, FORWARD).is_none());
    }

    #[test]
    fn test_ray_pointing_away_never_hits() {
        let mut rng = StdRng::seed_from_u64(11);
        let center = Vec3::new(1.0, -2.0, 3.0);
        let radius = 1.5;
        let sphere = grey_sphere(center, radius);

        for _ in 0..500 {
            let offset = crate::random_unit_vector(&mut rng);
            let distance = radius + 0.01 + 10.0 * crate::gen_f32(&mut rng);
            let origin = center + offset * distance;

            // Any direction with a positive component along the outward offset
            let mut dir = crate::random_unit_vector(&mut rng);
            if dir.dot(offset) <= 0.0 {
                dir -= 2.0 * dir.dot(offset) * offset;
            }
            if dir.dot(offset) <= 1e-4 {
                continue;
            }

            let ray = Ray::new_simple(origin, dir);
            assert!(sphere.hit(&ray, FORWARD).is_none(), "origin {origin:?} dir {dir:?}");
        }
    }

    #[test]
    fn test_hit_normal_is_unit_and_faces_ray() {
        let mut rng = StdRng::seed_from_u64(5);
        let sphere = grey_sphere(Vec3::ZERO, 2.0);

        for i in 0..500 {
            // Alternate between origins outside and inside the sphere
            let outside = i % 2 == 0;
            let distance = if outside { 5.0 } else { 0.5 };
            let origin = crate::random_unit_vector(&mut rng) * distance;
            let target = crate::random_in_unit_sphere(&mut rng);
            let dir = target - origin;
            let ray = Ray::new_simple(origin, dir);

            let rec = sphere.hit(&ray, FORWARD).expect("ray aimed at interior must hit");
            assert!((rec.normal.length() - 1.0).abs() < 1e-4);
            assert!(rec.normal.dot(dir) <= 0.0);
            assert_eq!(rec.front_face, outside);
        }
    }

    #[test]
    fn test_far_root_used_from_inside() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, FORWARD).expect("should hit from inside");
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_radius_is_never_hit() {
        for radius in [0.0, -2.0] {
            let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), radius);
            assert_eq!(sphere.radius(), 0.0);
            assert_eq!(sphere.center(), Vec3::new(0.0, 0.0, -1.0));

            let through_center = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
            assert!(sphere.hit(&through_center, FORWARD).is_none());
        }
    }

    #[test]
    fn test_sphere_uv() {
        let (u, v) = sphere_uv(Vec3::new(1.0, 0.0, 0.0));
        assert!((u - 0.5).abs() < 1e-5);
        assert!((v - 0.5).abs() < 1e-5);

        let (_, v) = sphere_uv(Vec3::new(0.0, 1.0, 0.0));
        assert!((v - 1.0).abs() < 1e-5);

        let (_, v) = sphere_uv(Vec3::new(0.0, -1.0, 0.0));
        assert!(v.abs() < 1e-5);

        let (u, _) = sphere_uv(Vec3::new(0.0, 0.0, 1.0));
        assert!((u - 0.25).abs() < 1e-5);

        let (u, _) = sphere_uv(Vec3::new(0.0, 0.0, -1.0));
        assert!((u - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_bounding_box_ignores_time() {
        let sphere = grey_sphere(Vec3::new(1.0, 2.0, 3.0), 1.0);
        let bbox = sphere.bounding_box(0.0, 1.0);

        assert_eq!(bbox, sphere.bounding_box(5.0, 9.0));
        assert_eq!(bbox.x, Interval::new(0.0, 2.0));
        assert_eq!(bbox.y, Interval::new(1.0, 3.0));
        assert_eq!(bbox.z, Interval::new(2.0, 4.0));
    }
}
