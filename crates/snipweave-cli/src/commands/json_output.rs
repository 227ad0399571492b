//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `generate`, `info`, and `validate`
//! so scripts can consume results without scraping colored text.

use serde::{Deserialize, Serialize};
use snipweave_audio::AudioError;
use snipweave_spec::{ParamError, SynthesisConfig, SynthesisParams};

use crate::codec::CodecError;
use crate::input::InputError;

/// Error codes for CLI operations.
///
/// These codes are stable. Parameter and engine errors pass through their
/// own codes (`E001`..`E006`, `AUDIO_001`..).
pub mod error_codes {
    /// Parameter file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Source audio file does not exist
    pub const AUDIO_NOT_FOUND: &str = "CLI_002";
    /// Parameter file is not valid JSON for the parameter schema
    pub const JSON_PARSE: &str = "CLI_003";
    /// Source audio could not be decoded
    pub const AUDIO_UNREADABLE: &str = "CLI_004";
    /// Container cannot store the requested sample encoding
    pub const UNSUPPORTED_SUBTYPE: &str = "CLI_005";
    /// Output could not be encoded
    pub const ENCODE_FAILED: &str = "CLI_006";
    /// Output could not be written
    pub const WRITE_FAILED: &str = "CLI_007";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Parameter field at fault (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// File path involved (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            file: None,
        }
    }

    /// Sets the parameter field for this error.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Converts a parameter error.
pub fn param_error_to_json(err: &ParamError) -> JsonError {
    JsonError::new(err.code(), err.to_string()).with_field(err.field())
}

/// Converts an engine error.
pub fn audio_error_to_json(err: &AudioError) -> JsonError {
    match err.as_param() {
        Some(param) => param_error_to_json(param),
        None => JsonError::new(err.code(), err.to_string()),
    }
}

/// Converts a codec error.
pub fn codec_error_to_json(err: &CodecError) -> JsonError {
    let (code, file) = match err {
        CodecError::NotFound { path } => (error_codes::AUDIO_NOT_FOUND, Some(path)),
        CodecError::Unreadable { path, .. } => (error_codes::AUDIO_UNREADABLE, Some(path)),
        CodecError::UnsupportedSubtype { .. } => (error_codes::UNSUPPORTED_SUBTYPE, None),
        CodecError::Encode { .. } => (error_codes::ENCODE_FAILED, None),
        CodecError::Io { path, .. } => (error_codes::WRITE_FAILED, Some(path)),
    };
    let json = JsonError::new(code, err.to_string());
    match file {
        Some(path) => json.with_file(path.display().to_string()),
        None => json,
    }
}

/// Converts a parameter-file error.
pub fn input_error_to_json(err: &InputError) -> JsonError {
    let json = JsonError::new(err.code(), err.to_string());
    match err {
        InputError::FileRead { path, .. } | InputError::JsonParse { path, .. } => {
            json.with_file(path.display().to_string())
        }
    }
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether the output file was written
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Run details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
    /// BLAKE3 hash of the parameter file (if one was used)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_hash: Option<String>,
}

/// Details of a completed `generate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    /// Source path
    pub input: String,
    /// Destination path
    pub output: String,
    /// Container written (WAV/AIFF)
    pub format: String,
    /// Sample encoding written
    pub subtype: String,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: usize,
    /// Frames written
    pub frames: usize,
    /// Seed that drove snippet placement
    pub seed: u64,
    /// Snippet length in samples
    pub clip_samples: usize,
    /// Overlap in samples
    pub overlap_samples: usize,
    /// Hop in samples
    pub hop_samples: usize,
    /// Snippets accumulated
    pub snippets: usize,
    /// BLAKE3 hash of the synthesized samples
    pub pcm_hash: String,
    /// Bytes written to the destination
    pub bytes_written: usize,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl GenerateOutput {
    /// Creates a successful generate output.
    pub fn success(result: GenerateResult, params_hash: Option<String>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
            params_hash,
        }
    }

    /// Creates a failed generate output.
    pub fn failure(errors: Vec<JsonError>, params_hash: Option<String>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
            params_hash,
        }
    }
}

/// JSON output for the `info` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoOutput {
    /// Whether the file was decoded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Source details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InfoResult>,
}

/// Source file details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResult {
    /// File name without directories
    pub name: String,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count
    pub channels: usize,
    /// Frame count
    pub frames: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Native sample encoding
    pub subtype: String,
    /// One-line summary
    pub summary: String,
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether the parameters are acceptable
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Validation details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidateResult>,
}

/// Validation result details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResult {
    /// Merged parameters that were checked
    pub params: SynthesisParams,
    /// Resolved seed, when the parameters carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Sample-domain config (only when a source was given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SynthesisConfig>,
    /// Hop in samples (only when a source was given)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hop_samples: Option<usize>,
}

/// Prints any output record as pretty JSON on stdout.
pub fn print_json<T: Serialize>(output: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
