//! Audio-thread side of the spectrogram: channel 0 of every block goes into the FIFO.

use cpal::{FromSample, Sample};

use crate::fifo::SampleFifo;
use crate::handoff::BlockSender;

/// A block of planar audio as delivered by a host callback.
pub struct AudioBlock<'a> {
    pub channels: &'a [&'a [f32]],
    pub start_sample: usize,
    pub num_samples: usize,
}

impl<'a> AudioBlock<'a> {
    /// The part of `channel` covered by this block, clamped to the channel's length.
    pub fn channel(&self, channel: usize) -> &'a [f32] {
        let data = match self.channels.get(channel) {
            Some(data) => *data,
            None => return &[],
        };
        let start = self.start_sample.min(data.len());
        let end = self.start_sample.saturating_add(self.num_samples).min(data.len());
        &data[start..end]
    }
}

/// Callbacks a host audio framework makes into its audio source.
pub trait AudioCallback {
    fn prepare_to_play(&mut self, samples_per_block: usize, sample_rate: f64);
    fn release_resources(&mut self);
    fn next_audio_block(&mut self, block: &AudioBlock);
}

pub struct SampleIngestor {
    fifo: SampleFifo,
    sender: BlockSender,
}

impl SampleIngestor {
    pub fn new(sender: BlockSender) -> Self {
        SampleIngestor {
            fifo: SampleFifo::new(),
            sender,
        }
    }

    pub fn push_sample(&mut self, sample: f32) {
        // A refused block is counted by the sender.
        if let Some(block) = self.fifo.push(sample) {
            self.sender.offer(block);
        }
    }

    /// Pushes channel 0 of interleaved frames, converting each sample to f32.
    pub fn push_interleaved<T>(&mut self, data: &[T], channels: usize)
    where
        T: Sample,
        f32: FromSample<T>,
    {
        if channels == 0 {
            return;
        }
        for &sample in data.iter().step_by(channels) {
            self.push_sample(f32::from_sample(sample));
        }
    }

    pub fn fifo_index(&self) -> usize {
        self.fifo.index()
    }

    pub fn dropped_blocks(&self) -> u64 {
        self.sender.dropped()
    }
}

impl AudioCallback for SampleIngestor {
    fn prepare_to_play(&mut self, samples_per_block: usize, sample_rate: f64) {
        log::debug!(
            "prepare to play: {} samples per block at {} Hz",
            samples_per_block,
            sample_rate
        );
    }

    fn release_resources(&mut self) {}

    fn next_audio_block(&mut self, block: &AudioBlock) {
        for &sample in block.channel(0) {
            self.push_sample(sample);
        }
    }
}
