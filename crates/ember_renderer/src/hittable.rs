//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Borrows the struck surface's material from the scene; the scene outlives
/// every record produced while tracing it.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f32,
    pub v: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal.
    ///
    /// `outward_normal` must be unit length. The stored normal is flipped when
    /// the ray arrives from inside.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        (u, v): (f32, f32),
        material: &'a dyn Material,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u,
            v,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest intersection with `t` inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Conservative bounds of this object over the shutter interval
    /// `[time0, time1]`.
    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb;
}

/// A list of hittable objects, tested one after another.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Take the objects out, e.g. to build a [`crate::BvhNode`].
    pub fn into_objects(self) -> Vec<Box<dyn Hittable>> {
        self.objects
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        self.objects.iter().fold(Aabb::EMPTY, |acc, object| {
            Aabb::surrounding(&acc, &object.bounding_box(time0, time1))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use std::sync::Arc;

    fn sphere_at(z: f32) -> Box<dyn Hittable> {
        Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, z),
            0.5,
            Arc::new(Lambertian::from_color(Vec3::splat(0.5))),
        ))
    }

    #[test]
    fn test_list_returns_closest_hit() {
        let mut list = HittableList::new();
        list.add(sphere_at(-5.0));
        list.add(sphere_at(-2.0));
        list.add(sphere_at(-8.0));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        let rec = list
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit");

        assert!((rec.t - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_list_respects_interval() {
        let mut list = HittableList::new();
        list.add(sphere_at(-5.0));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::NEG_Z);
        assert!(list.hit(&ray, Interval::new(0.001, 3.0)).is_none());
    }

    #[test]
    fn test_list_bounding_box() {
        let mut list = HittableList::new();
        assert!(list.is_empty());
        assert_eq!(list.bounding_box(0.0, 1.0), Aabb::EMPTY);

        list.add(sphere_at(-5.0));
        list.add(sphere_at(-2.0));
        assert_eq!(list.len(), 2);
        let bbox = list.bounding_box(0.0, 1.0);

        assert_eq!(bbox.z, Interval::new(-5.5, -1.5));
        assert_eq!(bbox.x, Interval::new(-0.5, 0.5));
    }

    #[test]
    fn test_face_normal_flips_inside() {
        let mat = Lambertian::from_color(Vec3::ONE);
        let inward = Ray::new_simple(Vec3::ZERO, Vec3::X);
        let rec = HitRecord::new(&inward, 1.0, Vec3::X, (0.0, 0.0), &mat);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_X);
        assert_eq!(rec.p, Vec3::X);
    }
}
