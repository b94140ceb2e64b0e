//! Render-thread side of the spectrogram: turns ready FFT blocks into image columns.

use crate::analysis::{load_block, max_level, FftBuffer, MagnitudeTransform};
use crate::colour::{level_colour, normalise};
use crate::config::{SpectrogramConfig, FFT_SIZE};
use crate::error::Result;
use crate::handoff::BlockReceiver;
use crate::history::ColumnRing;
use crate::skew::skewed_bin;

pub struct Renderer {
    receiver: BlockReceiver,
    fft_data: Box<FftBuffer>,
    transform: MagnitudeTransform,
    image: ColumnRing,
}

impl Renderer {
    pub fn new(receiver: BlockReceiver, config: &SpectrogramConfig) -> Self {
        Renderer {
            receiver,
            fft_data: Box::new([0.0; FFT_SIZE * 2]),
            transform: MagnitudeTransform::new(),
            image: ColumnRing::new(config.width, config.height),
        }
    }

    /// Timer callback. Draws one line if a block is ready and returns whether
    /// a repaint is needed.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.receiver.is_ready() {
            return Ok(false);
        }
        let block = match self.receiver.take() {
            Some(block) => block,
            None => return Ok(false),
        };
        load_block(&mut self.fft_data, &block);
        self.draw_next_line_of_spectrogram()?;
        Ok(true)
    }

    fn draw_next_line_of_spectrogram(&mut self) -> Result<()> {
        let image_height = self.image.height();

        self.transform
            .perform_frequency_only_forward_transform(&mut self.fft_data)?;
        let max = max_level(&self.fft_data);

        let fft_data = &self.fft_data;
        let column = self.image.next_column();
        for (y, pixel) in column.iter_mut().enumerate() {
            let fft_data_index = skewed_bin(y as u32, image_height);
            let level = normalise(fft_data[fft_data_index], max);
            *pixel = level_colour(level);
        }
        Ok(())
    }

    /// Blocks the audio side had to drop because a line was still pending.
    pub fn dropped_blocks(&self) -> u64 {
        self.receiver.dropped()
    }

    pub fn image(&self) -> &ColumnRing {
        &self.image
    }

    /// Magnitudes of the most recently drawn line.
    pub fn magnitudes(&self) -> &FftBuffer {
        &self.fft_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handoff::block_slot;
    use crate::ingest::SampleIngestor;
    use image::Rgb;
    use std::f32::consts::PI;

    fn small_config() -> SpectrogramConfig {
        SpectrogramConfig {
            width: 16,
            height: 512,
            ..SpectrogramConfig::default()
        }
    }

    fn pipeline(config: &SpectrogramConfig) -> (SampleIngestor, Renderer) {
        let (tx, rx) = block_slot();
        (SampleIngestor::new(tx), Renderer::new(rx, config))
    }

    #[test]
    fn tick_without_block_does_nothing() {
        let (_ingestor, mut renderer) = pipeline(&small_config());
        assert!(!renderer.tick().unwrap());
        assert_eq!(renderer.image().columns_written(), 0);
    }

    #[test]
    fn silence_renders_a_black_column() {
        let config = SpectrogramConfig::default();
        let (mut ingestor, mut renderer) = pipeline(&config);
        for _ in 0..FFT_SIZE {
            ingestor.push_sample(0.0);
        }
        assert!(renderer.receiver.is_ready());
        assert!(renderer.tick().unwrap());
        assert!(!renderer.receiver.is_ready());
        assert!(!renderer.tick().unwrap());

        assert!(renderer.magnitudes().iter().all(|&m| m == 0.0));
        let image = renderer.image();
        assert_eq!(image.columns_written(), 1);
        let right = image.width() - 1;
        assert!(image.column(right).iter().all(|&p| p == Rgb([0, 0, 0])));
    }

    #[test]
    fn sine_draws_a_band_at_its_bin() {
        let config = SpectrogramConfig::default();
        let (mut ingestor, mut renderer) = pipeline(&config);
        let bin = 32;
        for n in 0..FFT_SIZE {
            ingestor.push_sample((2.0 * PI * bin as f32 * n as f32 / FFT_SIZE as f32).sin());
        }
        assert!(renderer.tick().unwrap());

        let image = renderer.image();
        let column = image.column(image.width() - 1);
        let brightest = column.iter().map(|p| p[0]).max().unwrap();
        assert_eq!(brightest, 255);

        for (y, pixel) in column.iter().enumerate() {
            let row_bin = skewed_bin(y as u32, config.height);
            if row_bin == bin {
                assert_eq!(*pixel, Rgb([255, 0, 0]), "row {}", y);
            } else {
                assert!(pixel[0] < 8, "row {} (bin {}) lit: {:?}", y, row_bin, pixel);
            }
        }
        assert!(column.iter().any(|&p| p == Rgb([255, 0, 0])));
    }

    #[test]
    fn columns_scroll_in_chronological_order() {
        let config = small_config();
        let (mut ingestor, mut renderer) = pipeline(&config);
        let amplitudes = [0.0f32, 1.0, 0.0, 1.0, 1.0];
        for &a in &amplitudes {
            for _ in 0..FFT_SIZE {
                ingestor.push_sample(a);
            }
            assert!(renderer.tick().unwrap());
        }

        let image = renderer.image();
        let first = image.width() - amplitudes.len() as u32;
        for (i, &a) in amplitudes.iter().enumerate() {
            // DC shows on the bottom row.
            let bottom = image.pixel(first + i as u32, config.height - 1);
            if a == 0.0 {
                assert_eq!(bottom, Rgb([0, 0, 0]));
            } else {
                assert_eq!(bottom, Rgb([255, 0, 0]));
            }
        }
        assert_eq!(image.pixel(first - 1, config.height - 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn history_keeps_only_image_width_columns() {
        let config = small_config();
        let (mut ingestor, mut renderer) = pipeline(&config);
        for line in 0..(config.width + 4) {
            let a = if line < 4 { 1.0 } else { 0.0 };
            for _ in 0..FFT_SIZE {
                ingestor.push_sample(a);
            }
            renderer.tick().unwrap();
        }
        let image = renderer.image();
        assert_eq!(image.columns_written(), config.width as u64 + 4);
        // The four lit lines have scrolled out.
        assert!((0..config.width).all(|x| image.pixel(x, config.height - 1) == Rgb([0, 0, 0])));
    }
}
