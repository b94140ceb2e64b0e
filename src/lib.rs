//! Live audio spectrogram: a sample FIFO feeds a fixed-size FFT window, each
//! window is drawn as one column of a scrolling image.

pub mod analysis;
pub mod application;
pub mod audio_input;
pub mod colour;
pub mod config;
pub mod error;
pub mod fifo;
pub mod handoff;
pub mod history;
pub mod ingest;
pub mod offline;
pub mod render;
pub mod skew;
pub mod surface;

pub use error::{Error, Result};
