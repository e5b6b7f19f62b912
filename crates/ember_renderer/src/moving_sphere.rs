//! Sphere whose center moves linearly during the shutter interval.

use crate::hittable::{HitRecord, Hittable};
use crate::sphere::{sphere_root, sphere_uv};
use crate::Material;
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use std::sync::Arc;

/// A sphere at `center0` at `time0` and at `center1` at `time1`.
pub struct MovingSphere {
    center0: Point3,
    center1: Point3,
    time0: f32,
    time1: f32,
    radius: f32,
    material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(
        (center0, time0): (Point3, f32),
        (center1, time1): (Point3, f32),
        radius: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Center at `time`, extrapolated outside `[time0, time1]`.
    pub fn center(&self, time: f32) -> Point3 {
        let span = self.time1 - self.time0;
        if span == 0.0 {
            return self.center0;
        }
        self.center0 + ((time - self.time0) / span) * (self.center1 - self.center0)
    }

    fn box_at(&self, time: f32) -> Aabb {
        let c = self.center(time);
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(c - rvec, c + rvec)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let center = self.center(ray.time());
        let t = sphere_root(center, self.radius, ray, ray_t)?;

        let outward_normal = (ray.at(t) - center) / self.radius;
        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            sphere_uv(outward_normal),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        Aabb::surrounding(&self.box_at(time0), &self.box_at(time1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Lambertian;

    fn moving() -> MovingSphere {
        MovingSphere::new(
            (Vec3::new(0.0, 0.0, -2.0), 0.0),
            (Vec3::new(2.0, 0.0, -2.0), 1.0),
            0.5,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_center_interpolates() {
        let sphere = moving();
        assert_eq!(sphere.center(0.0), Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(sphere.center(0.5), Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(sphere.center(1.0), Vec3::new(2.0, 0.0, -2.0));
    }

    #[test]
    fn test_hit_depends_on_ray_time() {
        let sphere = moving();
        let t = Interval::new(0.001, f32::INFINITY);

        let early = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 0.0);
        let late = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 1.0);

        assert!(sphere.hit(&early, t).is_some());
        assert!(sphere.hit(&late, t).is_none());
    }

    #[test]
    fn test_zero_radius_is_never_hit() {
        let sphere = MovingSphere::new(
            (Vec3::new(0.0, 0.0, -2.0), 0.0),
            (Vec3::new(0.0, 0.0, -2.0), 1.0),
            -1.0,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 0.5);

        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_bounding_box_covers_motion() {
        let bbox = moving().bounding_box(0.0, 1.0);
        assert_eq!(bbox.x, Interval::new(-0.5, 2.5));
        assert_eq!(bbox.z, Interval::new(-2.5, -1.5));
    }
}
