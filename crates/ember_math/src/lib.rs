//! Ember math - vectors, rays, intervals and bounding boxes.
//!
//! Vectors come straight from `glam`; points, directions and colors all share
//! the same `Vec3` representation and are told apart only by usage.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod vec_ext;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vec_ext::Vec3Ext;

/// A position in space.
pub type Point3 = Vec3;

/// Linear RGB color, nominally in [0, 1] per channel.
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations_are_componentwise() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_aliases_share_representation() {
        let p: Point3 = Vec3::new(0.5, 0.5, 0.5);
        let c: Color = p;
        assert_eq!(c * 2.0, Vec3::ONE);
    }
}
