//! Axis-aligned rectangles, mostly used for walls and area lights.

use crate::hittable::{HitRecord, Hittable};
use crate::Material;
use ember_math::{Aabb, Interval, Point3, Ray, Vec3};
use std::sync::Arc;

/// Padding given to the flat axis of the bounding box.
const THICKNESS: f32 = 0.0001;

/// The plane a rectangle lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// Constant z, spans x and y
    Xy,
    /// Constant y, spans x and z
    Xz,
    /// Constant x, spans y and z
    Yz,
}

impl Plane {
    /// `(a, b, normal)` axis indices: the two in-plane axes then the fixed one.
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }
}

/// Rectangle `a0..a1 × b0..b1` at offset `k` along the plane's normal axis.
///
/// The outward normal points along the positive normal axis.
pub struct AxisRect {
    plane: Plane,
    a: Interval,
    b: Interval,
    k: f32,
    material: Arc<dyn Material>,
    /// Zero area; UVs are undefined so nothing hits it
    degenerate: bool,
}

impl AxisRect {
    pub fn new(
        plane: Plane,
        a: Interval,
        b: Interval,
        k: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        let has_area = a.size() > 0.0 && b.size() > 0.0;
        Self {
            plane,
            a,
            b,
            k,
            material,
            degenerate: !has_area,
        }
    }
}

impl Hittable for AxisRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if self.degenerate {
            return None;
        }

        let (ia, ib, ik) = self.plane.axes();
        let origin = ray.origin().to_array();
        let direction = ray.direction().to_array();

        if direction[ik] == 0.0 {
            return None;
        }
        let t = (self.k - origin[ik]) / direction[ik];
        if !ray_t.contains(t) {
            return None;
        }

        let a = origin[ia] + t * direction[ia];
        let b = origin[ib] + t * direction[ib];
        if !self.a.contains(a) || !self.b.contains(b) {
            return None;
        }

        let u = (a - self.a.min) / self.a.size();
        let v = (b - self.b.min) / self.b.size();

        let mut outward = [0.0; 3];
        outward[ik] = 1.0;

        Some(HitRecord::new(
            ray,
            t,
            Vec3::from_array(outward),
            (u, v),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        let (ia, ib, ik) = self.plane.axes();
        let mut lo = [0.0; 3];
        let mut hi = [0.0; 3];
        lo[ia] = self.a.min;
        hi[ia] = self.a.max;
        lo[ib] = self.b.min;
        hi[ib] = self.b.max;
        lo[ik] = self.k - THICKNESS;
        hi[ik] = self.k + THICKNESS;

        Aabb::from_points(Point3::from_array(lo), Point3::from_array(hi))
    }
}
