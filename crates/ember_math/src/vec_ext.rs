use crate::Vec3;

/// Vector operations the renderer needs on top of what `glam` provides.
pub trait Vec3Ext {
    /// True if every component is within `1e-8` of zero.
    fn near_zero(&self) -> bool;

    /// Mirror this vector about the surface normal `n`.
    fn reflect_about(self, n: Vec3) -> Vec3;

    /// Refract this unit vector through a surface with unit normal `n`
    /// (pointing against the vector), given `eta_i / eta_t`.
    fn refract_through(self, n: Vec3, etai_over_etat: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        const S: f32 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }

    #[inline]
    fn reflect_about(self, n: Vec3) -> Vec3 {
        self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract_through(self, n: Vec3, etai_over_etat: f32) -> Vec3 {
        let cos_theta = (-self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
