//! Perlin gradient noise and turbulence.

use crate::sampling::gen_range_f32;
use ember_math::{Point3, Vec3};
use rand::seq::SliceRandom;
use rand::RngCore;

const POINT_COUNT: usize = 256;

/// Gradient noise over a 256-entry lattice.
///
/// The lattice is drawn once from the generator handed to [`Perlin::new`],
/// so the noise is a deterministic function of that generator's seed.
pub struct Perlin {
    ranvec: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let ranvec = (0..POINT_COUNT)
            .map(|_| {
                Vec3::new(
                    gen_range_f32(rng, -1.0, 1.0),
                    gen_range_f32(rng, -1.0, 1.0),
                    gen_range_f32(rng, -1.0, 1.0),
                )
                .normalize_or_zero()
            })
            .collect();

        Self {
            ranvec,
            perm_x: Self::generate_perm(rng),
            perm_y: Self::generate_perm(rng),
            perm_z: Self::generate_perm(rng),
        }
    }

    /// Smooth noise at `p`, roughly in [-1, 1].
    pub fn noise(&self, p: Point3) -> f32 {
        let floor = p.floor();
        let (u, v, w) = (p.x - floor.x, p.y - floor.y, p.z - floor.z);
        let (i, j, k) = (floor.x as i32, floor.y as i32, floor.z as i32);

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let index = self.perm_x[Self::wrap(i + di as i32)]
                        ^ self.perm_y[Self::wrap(j + dj as i32)]
                        ^ self.perm_z[Self::wrap(k + dk as i32)];
                    *corner = self.ranvec[index];
                }
            }
        }

        Self::perlin_interp(&c, u, v, w)
    }

    /// Sum of `depth` octaves, each at double the frequency and half the
    /// weight of the previous one.
    pub fn turb(&self, p: Point3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }

    #[inline]
    fn wrap(n: i32) -> usize {
        (n & (POINT_COUNT as i32 - 1)) as usize
    }

    fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
        perm.shuffle(rng);
        perm
    }

    fn perlin_interp(c: &[[[Vec3; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
        // Hermite smoothing hides the lattice
        let uu = u * u * (3.0 - 2.0 * u);
        let vv = v * v * (3.0 - 2.0 * v);
        let ww = w * w * (3.0 - 2.0 * w);

        let mut accum = 0.0;
        for (i, plane) in c.iter().enumerate() {
            let fi = i as f32;
            for (j, row) in plane.iter().enumerate() {
                let fj = j as f32;
                for (k, gradient) in row.iter().enumerate() {
                    let fk = k as f32;
                    let weight_v = Vec3::new(u - fi, v - fj, w - fk);
                    accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                        * (fj * vv + (1.0 - fj) * (1.0 - vv))
                        * (fk * ww + (1.0 - fk) * (1.0 - ww))
                        * gradient.dot(weight_v);
                }
            }
        }

        accum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn perlin(seed: u64) -> Perlin {
        Perlin::new(&mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_noise_is_deterministic_for_seed() {
        let a = perlin(1);
        let b = perlin(1);
        let p = Point3::new(1.3, -2.7, 0.4);

        assert_eq!(a.noise(p), b.noise(p));
        assert_eq!(a.turb(p, 7), b.turb(p, 7));
    }

    #[test]
    fn test_noise_vanishes_on_lattice_points() {
        let noise = perlin(2);
        for p in [Point3::ZERO, Point3::new(3.0, -1.0, 7.0), Point3::splat(-12.0)] {
            assert!(noise.noise(p).abs() < 1e-6);
        }
    }

    #[test]
    fn test_noise_is_bounded_and_continuous() {
        let noise = perlin(3);
        for i in 0..500 {
            let p = Point3::new(i as f32 * 0.173, i as f32 * 0.071 - 9.0, i as f32 * -0.029);
            let n = noise.noise(p);
            assert!(n.abs() <= 1.8, "noise {n} at {p:?}");

            let nearby = noise.noise(p + Vec3::splat(1e-3));
            assert!((n - nearby).abs() < 0.05);
        }
    }

    #[test]
    fn test_turbulence_is_non_negative() {
        let noise = perlin(4);
        for i in 0..100 {
            let p = Point3::new(i as f32 * 0.5, 0.25, -(i as f32) * 0.3);
            assert!(noise.turb(p, 7) >= 0.0);
        }
        assert_eq!(noise.turb(Point3::new(0.3, 0.4, 0.5), 0), 0.0);
    }

    #[test]
    fn test_permutations_are_permutations() {
        let noise = perlin(5);
        for perm in [&noise.perm_x, &noise.perm_y, &noise.perm_z] {
            let mut sorted = perm.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..POINT_COUNT).collect::<Vec<_>>());
        }
    }
}
