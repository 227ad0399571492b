//! Audio file decoding and encoding.
//!
//! The synthesis engine never touches the filesystem; everything that reads
//! or writes audio files lives here.
//!
//! - [`load_audio`] decodes WAV with `hound` and AIFF/AIFC (and anything else
//!   symphonia can detect) with `symphonia`.
//! - [`encode`] produces WAV bytes with `hound` and AIFF bytes with a small
//!   big-endian chunk writer.
//! - [`save_audio`] encodes in memory, writes a temporary file beside the
//!   destination, then renames it into place.

mod aiff;
mod decode;
mod encode;

pub use decode::{load_audio, DecodedAudio};
pub use encode::{encode, save_audio};

use snipweave_spec::SampleSubtype;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing audio files.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The source path does not exist.
    #[error("audio file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file exists but could not be decoded.
    #[error("could not decode '{}': {message}", path.display())]
    Unreadable {
        /// Path that was requested.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },

    /// The container cannot store the requested sample encoding.
    #[error("{format} cannot store {subtype} samples")]
    UnsupportedSubtype {
        /// Container name.
        format: &'static str,
        /// Requested encoding.
        subtype: SampleSubtype,
    },

    /// Buffer could not be encoded.
    #[error("encoding failed: {message}")]
    Encode {
        /// Encoder message.
        message: String,
    },

    /// Filesystem error while saving.
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Creates an unreadable-file error.
    pub fn unreadable(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Unreadable {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Creates an encode error.
    pub fn encode(message: impl ToString) -> Self {
        Self::Encode {
            message: message.to_string(),
        }
    }
}
