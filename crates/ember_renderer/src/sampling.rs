//! Random sampling helpers.
//!
//! Every helper takes the generator explicitly so renders stay reproducible
//! for a fixed seed. The one exception is the per-thread generator used by
//! primitives whose `hit` has no generator parameter; [`crate::render_bucket`]
//! reseeds it before tracing each bucket.

use ember_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::RefCell;

thread_local! {
    static SCOPED_RNG: RefCell<StdRng> = RefCell::new(StdRng::seed_from_u64(0));
}

/// Reset this thread's scoped generator.
pub(crate) fn reseed_scoped_rng(seed: u64) {
    SCOPED_RNG.with(|rng| *rng.borrow_mut() = StdRng::seed_from_u64(seed));
}

/// Draw from this thread's scoped generator.
pub(crate) fn with_scoped_rng<R>(f: impl FnOnce(&mut StdRng) -> R) -> R {
    SCOPED_RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [min, max).
#[inline]
pub fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Uniform point inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // Tiny vectors lose precision when normalized
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the unit disk in the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range_f32(rng, -1.0, 1.0),
            gen_range_f32(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
