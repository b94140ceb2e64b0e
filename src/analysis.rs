//! Frequency-only forward transform over the renderer's FFT buffer.

use num_complex::Complex32;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use crate::config::FFT_SIZE;
use crate::error::Result;
use crate::fifo::FftBlock;

/// Working buffer of the renderer. The first half holds samples before the
/// transform and magnitudes after it.
pub type FftBuffer = [f32; FFT_SIZE * 2];

pub struct MagnitudeTransform {
    real_to_complex: Arc<dyn RealToComplex<f32>>,
    indata: Vec<f32>,
    spectrum: Vec<Complex32>,
    scratch: Vec<Complex32>,
}

impl MagnitudeTransform {
    pub fn new() -> Self {
        let real_to_complex = RealFftPlanner::<f32>::new().plan_fft_forward(FFT_SIZE);
        let indata = real_to_complex.make_input_vec();
        let spectrum = real_to_complex.make_output_vec();
        let scratch = real_to_complex.make_scratch_vec();
        MagnitudeTransform {
            real_to_complex,
            indata,
            spectrum,
            scratch,
        }
    }

    /// Replaces the first `FFT_SIZE` samples of `data` with the magnitude of
    /// each frequency bin. Bins above Nyquist mirror the ones below it, the
    /// second half of `data` is zeroed.
    pub fn perform_frequency_only_forward_transform(&mut self, data: &mut FftBuffer) -> Result<()> {
        self.indata.copy_from_slice(&data[..FFT_SIZE]);
        self.real_to_complex
            .process_with_scratch(&mut self.indata, &mut self.spectrum, &mut self.scratch)?;

        for (k, value) in self.spectrum.iter().enumerate() {
            let magnitude = value.norm();
            data[k] = magnitude;
            if k > 0 && k < FFT_SIZE / 2 {
                data[FFT_SIZE - k] = magnitude;
            }
        }
        data[FFT_SIZE..].iter_mut().for_each(|x| *x = 0.0);
        Ok(())
    }
}

impl Default for MagnitudeTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Zeroes `data` and copies `block` into its first half.
pub fn load_block(data: &mut FftBuffer, block: &FftBlock) {
    data.iter_mut().for_each(|x| *x = 0.0);
    data[..FFT_SIZE].copy_from_slice(block);
}

/// Largest magnitude among bins `0..FFT_SIZE / 2`.
pub fn max_level(data: &FftBuffer) -> f32 {
    data[..FFT_SIZE / 2].iter().cloned().fold(0.0, f32::max)
}
