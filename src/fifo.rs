//! Fixed-size sample accumulator feeding the FFT window.

use crate::config::FFT_SIZE;

/// One full window of samples.
pub type FftBlock = [f32; FFT_SIZE];

pub struct SampleFifo {
    fifo: FftBlock,
    index: usize,
}

impl SampleFifo {
    pub fn new() -> Self {
        SampleFifo {
            fifo: [0.0; FFT_SIZE],
            index: 0,
        }
    }

    /// Appends a sample. Returns the full window when this sample completes it,
    /// in which case the write index has already wrapped to 0.
    pub fn push(&mut self, sample: f32) -> Option<&FftBlock> {
        self.fifo[self.index] = sample;
        self.index += 1;
        if self.index == FFT_SIZE {
            self.index = 0;
            Some(&self.fifo)
        } else {
            None
        }
    }

    /// Number of samples written since the last full window.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Default for SampleFifo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn index_wraps_every_window() {
        let mut fifo = SampleFifo::new();
        let mut full = 0;
        for n in 1..=(FFT_SIZE * 3 + 17) {
            if fifo.push(n as f32).is_some() {
                full += 1;
            }
            assert_eq!(fifo.index(), n % FFT_SIZE);
        }
        assert_eq!(full, 3);
    }

    #[test]
    fn full_window_holds_samples_in_order() {
        let mut fifo = SampleFifo::new();
        let samples: Vec<f32> = (0..FFT_SIZE).map(|_| random()).collect();
        let (last, rest) = samples.split_last().unwrap();
        for &s in rest {
            assert!(fifo.push(s).is_none());
        }
        let block = fifo.push(*last).expect("window should be full");
        assert_eq!(&block[..], &samples[..]);
    }

    #[test]
    fn random_lengths_complete_expected_windows() {
        for _ in 0..20 {
            let n = random::<usize>() % (FFT_SIZE * 8);
            let mut fifo = SampleFifo::new();
            let full = (0..n).filter(|_| fifo.push(0.5).is_some()).count();
            assert_eq!(full, n / FFT_SIZE);
            assert_eq!(fifo.index(), n % FFT_SIZE);
        }
    }
}
