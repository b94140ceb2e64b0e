//! Error type for the fallible edges of the spectrogram: devices, windows and files.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No input device found")]
    NoInputDevice,
    #[error("Input device '{0}' not found")]
    DeviceNotFound(String),
    #[error("Unsupported sample format {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),
    #[error("Error while querying devices: {0}")]
    Devices(#[from] cpal::DevicesError),
    #[error("Error while querying device name: {0}")]
    DeviceName(#[from] cpal::DeviceNameError),
    #[error("Error while querying input config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("Failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("Failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("FFT error: {0}")]
    Fft(#[from] realfft::FftError),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// Window, event loop or surface failure. Platform errors are kept as
    /// text since they are not all `Send + Sync`.
    #[error("Window error: {0}")]
    Window(String),
    #[error("Wav error: {0}")]
    Wav(#[from] hound::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl From<winit::error::EventLoopError> for Error {
    fn from(err: winit::error::EventLoopError) -> Self {
        Error::Window(err.to_string())
    }
}

impl From<winit::error::OsError> for Error {
    fn from(err: winit::error::OsError) -> Self {
        Error::Window(err.to_string())
    }
}

impl From<softbuffer::SoftBufferError> for Error {
    fn from(err: softbuffer::SoftBufferError) -> Self {
        Error::Window(err.to_string())
    }
}
