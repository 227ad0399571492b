//! Interleaved multi-channel sample buffer.

use crate::error::{AudioError, AudioResult};

/// Interleaved `f32` audio, logically `(frames, channels)`.
///
/// Values are conventionally in `[-1.0, 1.0]` but this is not enforced;
/// accumulated output routinely exceeds it until the gain stage clips.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channels: usize,
}

impl AudioBuffer {
    /// Wraps interleaved samples.
    ///
    /// # Errors
    /// Fails when `channels` is zero or `samples.len()` is not a multiple of
    /// `channels`.
    pub fn new(samples: Vec<f32>, channels: usize) -> AudioResult<Self> {
        if channels == 0 {
            return Err(AudioError::invalid_buffer("channel count must be at least 1"));
        }
        if samples.len() % channels != 0 {
            return Err(AudioError::invalid_buffer(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }
        Ok(Self { samples, channels })
    }

    /// Wraps a single channel.
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            samples,
            channels: 1,
        }
    }

    /// Allocates a zero-filled buffer.
    ///
    /// # Errors
    /// [`AudioError::Allocation`] when `frames * channels` overflows or the
    /// allocator refuses the request.
    pub fn silent(frames: usize, channels: usize) -> AudioResult<Self> {
        let channels = channels.max(1);
        let too_large = || AudioError::Allocation { frames, channels };

        let len = frames.checked_mul(channels).ok_or_else(too_large)?;
        let mut samples = Vec::new();
        samples.try_reserve_exact(len).map_err(|_| too_large())?;
        samples.resize(len, 0.0);
        Ok(Self { samples, channels })
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels
        }
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds at `sample_rate`.
    pub fn duration_seconds(&self, sample_rate: u32) -> f64 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / sample_rate as f64
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Mutable interleaved samples.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Consumes the buffer, returning the interleaved samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Samples of one frame, one per channel.
    ///
    /// # Panics
    /// Panics if `index >= self.frames()`.
    pub fn frame(&self, index: usize) -> &[f32] {
        let start = index * self.channels;
        &self.samples[start..start + self.channels]
    }

    /// Interleaved samples for frames `[start, start + len)`.
    ///
    /// # Panics
    /// Panics if `start + len > self.frames()`.
    pub fn frame_range(&self, start: usize, len: usize) -> &[f32] {
        &self.samples[start * self.channels..(start + len) * self.channels]
    }

    /// Mutable interleaved samples for frames `[start, start + len)`.
    ///
    /// # Panics
    /// Panics if `start + len > self.frames()`.
    pub fn frame_range_mut(&mut self, start: usize, len: usize) -> &mut [f32] {
        &mut self.samples[start * self.channels..(start + len) * self.channels]
    }

    /// Peak absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples
            .iter()
            .map(|s| s.abs())
            .fold(0.0_f32, |a, b| a.max(b))
    }

    /// BLAKE3 hash of the little-endian sample bytes.
    ///
    /// Two buffers hash equal exactly when they are bit-identical.
    pub fn pcm_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for sample in &self.samples {
            hasher.update(&sample.to_le_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}
