//! Conversion of accumulated radiance to 8-bit channels.

use ember_math::{Color, Interval};

/// Largest channel value before scaling. Below 1.0 so `256 * x` truncates to
/// at most 255.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Average `samples_per_pixel` summed samples, gamma-correct (gamma 2) and
/// quantize to 8 bits per channel.
///
/// A sample count of zero is treated as one. NaN channels map to 0.
pub fn write_color(pixel_color: Color, samples_per_pixel: u32) -> [u8; 3] {
    let scale = 1.0 / samples_per_pixel.max(1) as f32;

    pixel_color
        .to_array()
        .map(|channel| (256.0 * INTENSITY.clamp(linear_to_gamma(channel * scale))) as u8)
}

/// Gamma 2 transfer. Negative input (which can only come from bad math
/// upstream) maps to 0.
#[inline]
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}
