//! Renders a whole wav file to a png instead of capturing live audio.

use hound::{SampleFormat, WavReader};
use std::io::Read;
use std::path::Path;

use crate::config::SpectrogramConfig;
use crate::error::Result;
use crate::handoff::block_slot;
use crate::ingest::{AudioBlock, AudioCallback, SampleIngestor};
use crate::render::Renderer;

/// Frames handed to the ingestor per callback, like a host audio block.
const BLOCK_FRAMES: usize = 512;

/// Renders `input` and writes the final image to `output`. Returns the number
/// of lines drawn.
pub fn render_wav_file(input: &Path, output: &Path, config: &SpectrogramConfig) -> Result<u64> {
    let reader = WavReader::open(input)?;
    let spec = reader.spec();
    log::info!(
        "Rendering {}: {} Hz, {} channel(s), {} bit {:?}",
        input.display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format
    );

    let renderer = render_wav(reader, config)?;
    renderer.image().to_rgb_image().save(output)?;
    log::info!(
        "Wrote {} ({} lines)",
        output.display(),
        renderer.image().columns_written()
    );
    Ok(renderer.image().columns_written())
}

/// Feeds channel 0 of `reader` through a fresh pipeline. The renderer is
/// drained after every block so no FFT block is dropped.
pub fn render_wav<R: Read>(reader: WavReader<R>, config: &SpectrogramConfig) -> Result<Renderer> {
    let spec = reader.spec();
    let channel_0 = read_first_channel(reader)?;

    let (tx, rx) = block_slot();
    let mut ingestor = SampleIngestor::new(tx);
    let mut renderer = Renderer::new(rx, config);

    ingestor.prepare_to_play(BLOCK_FRAMES, spec.sample_rate as f64);
    for start_sample in (0..channel_0.len()).step_by(BLOCK_FRAMES) {
        let channels = [&channel_0[..]];
        ingestor.next_audio_block(&AudioBlock {
            channels: &channels,
            start_sample,
            num_samples: BLOCK_FRAMES,
        });
        while renderer.tick()? {}
    }
    ingestor.release_resources();

    debug_assert_eq!(ingestor.dropped_blocks(), 0);
    Ok(renderer)
}

fn read_first_channel<R: Read>(mut reader: WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .step_by(channels)
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|s| s as f32 * scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}
