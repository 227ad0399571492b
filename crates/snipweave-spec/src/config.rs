//! Sample-domain synthesis configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ParamError, ParamResult};
use crate::params::{SynthesisParams, WindowChoice};
use crate::seed::resolve_seed;

/// Largest interleaved sample count one output buffer may hold.
pub const MAX_OUTPUT_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f32>();

/// Window shape with the parameters its validation rule depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindowKind {
    /// Linear ramps of `overlap` samples at both ends.
    LinearCrossfade {
        /// Ramp length in samples.
        overlap: usize,
    },
    /// Raised cosine across the whole snippet.
    HannCosine,
}

impl WindowKind {
    /// Builds the kind for a user choice and a resolved overlap.
    pub fn from_choice(choice: WindowChoice, overlap: usize) -> Self {
        match choice {
            WindowChoice::LinearCrossfade => WindowKind::LinearCrossfade { overlap },
            WindowChoice::Hann => WindowKind::HannCosine,
        }
    }

    /// Checks the overlap rule for this window against a clip length.
    ///
    /// Linear crossfades need both ramps to fit with room to spare
    /// (`2 * overlap < clip`); Hann only needs a positive hop
    /// (`overlap < clip`).
    pub fn check_overlap(&self, clip_len: usize, overlap_len: usize) -> ParamResult<()> {
        match self {
            WindowKind::LinearCrossfade { .. } => {
                if overlap_len.saturating_mul(2) >= clip_len {
                    return Err(ParamError::overlap(format!(
                        "for Linear, overlap ({} samples) must be less than half the snippet size ({} samples)",
                        overlap_len, clip_len
                    )));
                }
            }
            WindowKind::HannCosine => {
                if overlap_len >= clip_len {
                    return Err(ParamError::overlap(format!(
                        "for Hann, overlap ({} samples) must be less than the snippet size ({} samples)",
                        overlap_len, clip_len
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Validated synthesis configuration in samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Snippet length in samples.
    pub clip_len: usize,
    /// Overlap between consecutive snippets in samples.
    pub overlap_len: usize,
    /// Exact output length in frames.
    pub output_len: usize,
    /// Post-accumulation gain.
    pub gain: f64,
    /// Window shape.
    pub window: WindowKind,
    /// Generator seed; `None` draws one from the environment at run time.
    pub seed: Option<u64>,
}

impl SynthesisConfig {
    /// Converts and validates raw parameters against a source.
    ///
    /// # Arguments
    /// * `params` - Time-domain parameters
    /// * `sample_rate` - Source sample rate in Hz
    /// * `source_frames` - Frames available in the source
    ///
    /// # Errors
    /// Any [`ParamError`]; nothing is allocated before the checks pass.
    pub fn resolve(
        params: &SynthesisParams,
        sample_rate: u32,
        source_frames: usize,
    ) -> ParamResult<Self> {
        params.validate()?;
        let seed = resolve_seed(params.seed.as_ref())?;

        let clip_len = seconds_to_samples(params.clip_ms / 1000.0, sample_rate)
            .ok_or(ParamError::ClipExceedsSource {
                clip_samples: usize::MAX,
                source_frames,
            })?
            .max(1);
        let overlap_len = seconds_to_samples(params.overlap_ms / 1000.0, sample_rate)
            .ok_or_else(|| {
                ParamError::overlap(format!(
                    "{} ms is too long to express in samples",
                    params.overlap_ms
                ))
            })?;
        let output_len = seconds_to_samples(params.output_seconds, sample_rate)
            .ok_or(ParamError::InvalidOutputLength {
                seconds: params.output_seconds,
            })?
            .max(1);

        let config = Self {
            clip_len,
            overlap_len,
            output_len,
            gain: params.gain,
            window: WindowKind::from_choice(params.window, overlap_len),
            seed,
        };
        config.validate(source_frames)?;
        Ok(config)
    }

    /// Checks the sample-domain invariants against a source length.
    pub fn validate(&self, source_frames: usize) -> ParamResult<()> {
        if self.clip_len == 0 {
            return Err(ParamError::InvalidClipLength { clip_ms: 0.0 });
        }
        if self.output_len == 0 {
            return Err(ParamError::InvalidOutputLength { seconds: 0.0 });
        }
        self.output_samples(1)?;
        if !(crate::MIN_GAIN..=crate::MAX_GAIN).contains(&self.gain) {
            return Err(ParamError::InvalidGain { gain: self.gain });
        }
        if self.clip_len > source_frames {
            return Err(ParamError::ClipExceedsSource {
                clip_samples: self.clip_len,
                source_frames,
            });
        }
        if let WindowKind::LinearCrossfade { overlap } = self.window {
            if overlap != self.overlap_len {
                return Err(ParamError::overlap(format!(
                    "linear ramp ({} samples) does not match the overlap ({} samples)",
                    overlap, self.overlap_len
                )));
            }
        }
        self.window.check_overlap(self.clip_len, self.overlap_len)
    }

    /// Interleaved sample count of the output at `channels` channels.
    ///
    /// # Errors
    /// [`ParamError::OutputTooLarge`] when the count overflows or exceeds
    /// [`MAX_OUTPUT_SAMPLES`].
    pub fn output_samples(&self, channels: usize) -> ParamResult<usize> {
        self.output_len
            .checked_mul(channels.max(1))
            .filter(|&samples| samples <= MAX_OUTPUT_SAMPLES)
            .ok_or(ParamError::OutputTooLarge {
                frames: self.output_len,
                channels,
            })
    }

    /// Distance between consecutive snippet placements, never below one.
    pub fn hop(&self) -> usize {
        hop_length(self.clip_len, self.overlap_len)
    }
}

/// Computes `clip - overlap`, forcing at least one sample of progress.
pub fn hop_length(clip_len: usize, overlap_len: usize) -> usize {
    clip_len.saturating_sub(overlap_len).max(1)
}

/// Converts a duration to a sample count at `sample_rate`.
///
/// Uses round-half-to-even so that exact half-sample durations resolve the
/// same way on every platform. Non-positive durations give 0; `None` means
/// the count is NaN or does not fit in a `usize`.
pub fn seconds_to_samples(seconds: f64, sample_rate: u32) -> Option<usize> {
    let samples = (seconds * sample_rate as f64).round_ties_even();
    if samples.is_nan() || samples >= usize::MAX as f64 {
        None
    } else if samples <= 0.0 {
        Some(0)
    } else {
        Some(samples as usize)
    }
}
