//! Error types for parameter validation.

use thiserror::Error;

/// Result type for parameter validation.
pub type ParamResult<T> = Result<T, ParamError>;

/// A rejected synthesis parameter.
///
/// Every variant is raised before any buffer is allocated or any randomness
/// is consumed, so a caller that receives one can adjust the parameters and
/// retry without cleanup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Snippet size is not positive.
    #[error("snippet size must be > 0 ms, got {clip_ms}")]
    InvalidClipLength {
        /// Requested snippet size in milliseconds.
        clip_ms: f64,
    },

    /// Overlap is negative or breaks the window-specific rule.
    #[error("invalid overlap: {message}")]
    InvalidOverlapLength {
        /// Human-readable description of the violated rule.
        message: String,
    },

    /// Output duration is not positive.
    #[error("output length must be a positive duration that fits in memory, got {seconds} s")]
    InvalidOutputLength {
        /// Requested output length in seconds.
        seconds: f64,
    },

    /// Output is too long to hold in one buffer.
    #[error(
        "output of {frames} frames x {channels} channels exceeds the largest buffer ({max} samples)",
        max = crate::MAX_OUTPUT_SAMPLES
    )]
    OutputTooLarge {
        /// Requested output length in frames.
        frames: usize,
        /// Channels per frame.
        channels: usize,
    },

    /// Gain lies outside the accepted range.
    #[error("gain must be between {min} and {max}, got {gain}", min = crate::MIN_GAIN, max = crate::MAX_GAIN)]
    InvalidGain {
        /// Requested gain.
        gain: f64,
    },

    /// Snippet is longer than the source recording.
    #[error("snippet size ({clip_samples} samples) is longer than the source audio ({source_frames} frames)")]
    ClipExceedsSource {
        /// Snippet length in samples.
        clip_samples: usize,
        /// Frames available in the source.
        source_frames: usize,
    },

    /// Reproducible output was requested without a seed token.
    #[error("seed token is empty; enter a repeat code or disable repeatable results")]
    InvalidSeedToken,
}

impl ParamError {
    /// Creates an overlap error.
    pub fn overlap(message: impl Into<String>) -> Self {
        Self::InvalidOverlapLength {
            message: message.into(),
        }
    }

    /// Returns the stable error code (e.g. "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::InvalidClipLength { .. } => "E001",
            ParamError::InvalidOverlapLength { .. } => "E002",
            ParamError::InvalidOutputLength { .. } | ParamError::OutputTooLarge { .. } => "E003",
            ParamError::InvalidGain { .. } => "E004",
            ParamError::ClipExceedsSource { .. } => "E005",
            ParamError::InvalidSeedToken => "E006",
        }
    }

    /// Returns the name of the offending parameter field.
    pub fn field(&self) -> &'static str {
        match self {
            ParamError::InvalidClipLength { .. } | ParamError::ClipExceedsSource { .. } => {
                "clip_ms"
            }
            ParamError::InvalidOverlapLength { .. } => "overlap_ms",
            ParamError::InvalidOutputLength { .. } | ParamError::OutputTooLarge { .. } => {
                "output_seconds"
            }
            ParamError::InvalidGain { .. } => "gain",
            ParamError::InvalidSeedToken => "seed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            ParamError::InvalidClipLength { clip_ms: 0.0 },
            ParamError::overlap("too long"),
            ParamError::InvalidOutputLength { seconds: -1.0 },
            ParamError::InvalidGain { gain: 3.0 },
            ParamError::ClipExceedsSource {
                clip_samples: 10,
                source_frames: 5,
            },
            ParamError::InvalidSeedToken,
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_gain_message_names_range() {
        let err = ParamError::InvalidGain { gain: 2.5 };
        let msg = err.to_string();
        assert!(msg.contains("0.05"));
        assert!(msg.contains("2"));
        assert!(msg.contains("2.5"));
    }

    #[test]
    fn test_overlap_helper() {
        let err = ParamError::overlap("must be less than the snippet size");
        assert_eq!(err.field(), "overlap_ms");
        assert!(err.to_string().contains("less than the snippet size"));
    }
}
