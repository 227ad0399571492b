//! Error types for the synthesis engine.

use snipweave_spec::ParamError;
use thiserror::Error;

/// Result type for engine operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur before or during synthesis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    /// A synthesis parameter failed validation.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Malformed or empty audio buffer.
    #[error("invalid audio buffer: {message}")]
    InvalidBuffer {
        /// Error message.
        message: String,
    },

    /// The output buffer could not be allocated.
    #[error("cannot allocate an output of {frames} frames x {channels} channels")]
    Allocation {
        /// Requested frames.
        frames: usize,
        /// Requested channels.
        channels: usize,
    },
}

impl AudioError {
    /// Creates an invalid buffer error.
    pub fn invalid_buffer(message: impl Into<String>) -> Self {
        Self::InvalidBuffer {
            message: message.into(),
        }
    }

    /// Returns the stable error code.
    ///
    /// Parameter errors keep their own `E0xx` codes.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::Param(err) => err.code(),
            AudioError::InvalidSampleRate { .. } => "AUDIO_001",
            AudioError::InvalidBuffer { .. } => "AUDIO_002",
            AudioError::Allocation { .. } => "AUDIO_003",
        }
    }

    /// Returns the parameter error, if this is one.
    pub fn as_param(&self) -> Option<&ParamError> {
        match self {
            AudioError::Param(err) => Some(err),
            _ => None,
        }
    }
}
