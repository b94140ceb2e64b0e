use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SizedSample};

use crate::error::{Error, Result};
use crate::ingest::{AudioCallback, SampleIngestor};

/// Live input stream feeding the audio side of the spectrogram. The stream
/// stops when this is dropped.
pub struct InputStream {
    _stream: cpal::Stream,
    device_name: String,
    sample_rate: cpal::SampleRate,
}

impl InputStream {
    /// Opens `device` (or the default input device) and starts streaming into `ingestor`.
    pub fn new(device: Option<&str>, mut ingestor: SampleIngestor) -> Result<InputStream> {
        let host = cpal::default_host();
        let input_device = match device {
            Some(name) => find_input_device(&host, name)?,
            None => host.default_input_device().ok_or(Error::NoInputDevice)?,
        };
        let device_name = input_device.name()?;

        let supported_config = input_device.default_input_config()?;
        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate();
        let config: cpal::StreamConfig = supported_config.into();
        let channels = config.channels as usize;

        log::info!(
            "Input: {} @ {}Hz, {} channel(s), {:?}",
            device_name,
            sample_rate.0,
            channels,
            sample_format
        );

        let samples_per_block = match config.buffer_size {
            cpal::BufferSize::Fixed(frames) => frames as usize,
            cpal::BufferSize::Default => 0,
        };
        ingestor.prepare_to_play(samples_per_block, sample_rate.0 as f64);

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&input_device, &config, ingestor)?,
            SampleFormat::F64 => build_stream::<f64>(&input_device, &config, ingestor)?,
            SampleFormat::I8 => build_stream::<i8>(&input_device, &config, ingestor)?,
            SampleFormat::I16 => build_stream::<i16>(&input_device, &config, ingestor)?,
            SampleFormat::I32 => build_stream::<i32>(&input_device, &config, ingestor)?,
            SampleFormat::I64 => build_stream::<i64>(&input_device, &config, ingestor)?,
            SampleFormat::U8 => build_stream::<u8>(&input_device, &config, ingestor)?,
            SampleFormat::U16 => build_stream::<u16>(&input_device, &config, ingestor)?,
            SampleFormat::U32 => build_stream::<u32>(&input_device, &config, ingestor)?,
            SampleFormat::U64 => build_stream::<u64>(&input_device, &config, ingestor)?,
            other => return Err(Error::UnsupportedSampleFormat(other)),
        };
        stream.play()?;

        Ok(InputStream {
            _stream: stream,
            device_name,
            sample_rate,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.0
    }
}

/// Names of all input devices of the default host.
pub fn input_device_names() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let mut names = Vec::new();
    for device in host.input_devices()? {
        names.push(device.name()?);
    }
    Ok(names)
}

fn find_input_device(host: &cpal::Host, name: &str) -> Result<cpal::Device> {
    for device in host.input_devices()? {
        match device.name() {
            Ok(device_name) if device_name == name => return Ok(device),
            Ok(device_name) => log::debug!("skipping input device '{}'", device_name),
            Err(err) => log::debug!("skipping unnamed input device: {}", err),
        }
    }
    Err(Error::DeviceNotFound(name.to_string()))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut ingestor: SampleIngestor,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: cpal::FromSample<T>,
{
    let channels = config.channels as usize;
    let stream = device.build_input_stream(
        config,
        // Closure pushes channel 0 of the received frames into the fifo.
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            ingestor.push_interleaved(data, channels);
        },
        |err| log::error!("An error occurred on the audio input stream: {}", err),
        None,
    )?;
    Ok(stream)
}
