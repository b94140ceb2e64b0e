//! Runtime configuration and command line arguments.

use clap::Parser;
use image::Rgb;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Order of the FFT. The window holds `1 << FFT_ORDER` samples.
pub const FFT_ORDER: usize = 10;
/// Number of samples per FFT window.
pub const FFT_SIZE: usize = 1 << FFT_ORDER;

pub const DEFAULT_IMAGE_WIDTH: u32 = 512;
pub const DEFAULT_IMAGE_HEIGHT: u32 = 512;
pub const DEFAULT_FPS: u32 = 60;
const MAX_FPS: u32 = 1000;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "spectrogram")]
#[command(about = "Live audio spectrogram", long_about = None)]
pub struct Args {
    /// Name of the input device to capture from (default device otherwise)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// List available input devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Render rate of new spectrogram lines
    #[arg(long, value_name = "HZ", default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Width of the spectrogram image (number of history columns)
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_IMAGE_WIDTH)]
    pub width: u32,

    /// Height of the spectrogram image (number of frequency rows)
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_IMAGE_HEIGHT)]
    pub height: u32,

    /// Render a wav file offline instead of capturing live audio
    #[arg(long, value_name = "FILE")]
    pub wav: Option<PathBuf>,

    /// Output png for offline rendering
    #[arg(long, value_name = "FILE", default_value = "spectrogram.png")]
    pub output: PathBuf,
}

impl Args {
    pub fn spectrogram_config(&self) -> Result<SpectrogramConfig> {
        let config = SpectrogramConfig {
            width: self.width,
            height: self.height,
            fps: self.fps,
            ..SpectrogramConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrogramConfig {
    /// Columns of history kept in the image.
    pub width: u32,
    /// Rows of the image, top row is the highest frequency.
    pub height: u32,
    /// Timer rate of the renderer.
    pub fps: u32,
    /// Colour the surface is cleared to before painting.
    pub background: Rgb<u8>,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        SpectrogramConfig {
            width: DEFAULT_IMAGE_WIDTH,
            height: DEFAULT_IMAGE_HEIGHT,
            fps: DEFAULT_FPS,
            background: Rgb([0, 0, 0]),
        }
    }
}

impl SpectrogramConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(Error::InvalidConfig(format!(
                "fps must be within 1..={}, got {}",
                MAX_FPS, self.fps
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SpectrogramConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 512);
        assert_eq!(config.height, 512);
        assert_eq!(config.fps, 60);
        assert_eq!(FFT_SIZE, 1024);
    }

    #[test]
    fn rejects_zero_sizes_and_bad_fps() {
        let zero_width = SpectrogramConfig {
            width: 0,
            ..SpectrogramConfig::default()
        };
        assert!(matches!(zero_width.validate(), Err(Error::InvalidConfig(_))));

        let zero_fps = SpectrogramConfig {
            fps: 0,
            ..SpectrogramConfig::default()
        };
        assert!(zero_fps.validate().is_err());

        let fast = SpectrogramConfig {
            fps: MAX_FPS + 1,
            ..SpectrogramConfig::default()
        };
        assert!(fast.validate().is_err());
    }

    #[test]
    fn args_build_config() {
        let args = Args::parse_from(["spectrogram", "--width", "64", "--height", "32"]);
        let config = args.spectrogram_config().unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 32);
        assert_eq!(config.fps, DEFAULT_FPS);
        assert_eq!(args.output, PathBuf::from("spectrogram.png"));

        let args = Args::parse_from(["spectrogram", "--fps", "0"]);
        assert!(args.spectrogram_config().is_err());
    }
}
