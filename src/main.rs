use anyhow::{Context, Result};
use clap::Parser;

use spectrogram::application::Application;
use spectrogram::audio_input::{self, InputStream};
use spectrogram::config::Args;
use spectrogram::handoff::block_slot;
use spectrogram::ingest::SampleIngestor;
use spectrogram::offline;
use spectrogram::render::Renderer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_devices {
        for name in audio_input::input_device_names().context("failed to list input devices")? {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = args.spectrogram_config()?;

    if let Some(wav) = &args.wav {
        offline::render_wav_file(wav, &args.output, &config)
            .with_context(|| format!("failed to render {}", wav.display()))?;
        return Ok(());
    }

    log::info!(
        "Starting spectrogram: {}x{} image, {} lines per second",
        config.width,
        config.height,
        config.fps
    );
    let (sender, receiver) = block_slot();
    let stream = InputStream::new(args.device.as_deref(), SampleIngestor::new(sender))
        .context("failed to open audio input")?;
    log::debug!("Capturing from {} at {} Hz", stream.device_name(), stream.sample_rate());

    let renderer = Renderer::new(receiver, &config);
    Application::new(renderer, config)
        .run()
        .context("window closed with an error")?;

    drop(stream);
    log::info!("Stopped");
    Ok(())
}
