//! Row to frequency bin mapping. Low frequencies get most of the image height.

use crate::config::FFT_SIZE;

const SKEW: f32 = 0.2;

/// Frequency bin shown on row `y` of an image `height` rows tall.
/// Row 0 (top) is Nyquist, row `height` is DC.
pub fn skewed_bin(y: u32, height: u32) -> usize {
    let proportion = y as f32 / height as f32;
    let skewed_proportion_y = 1.0 - (proportion.ln() * SKEW).exp();
    let half = (FFT_SIZE / 2) as f32;
    // max also maps the NaN of a zero height to bin 0.
    (skewed_proportion_y * half).max(0.0).min(half) as usize
}
