//! Parameter loading for the CLI.
//!
//! Parameters come from an optional JSON file and are then overridden by any
//! flags given on the command line. Output settings (container and sample
//! encoding) are resolved separately from the destination path.

use snipweave_spec::{SampleSubtype, SaveFormat, SeedToken, SynthesisParams, WindowChoice};
use std::path::{Path, PathBuf};

use crate::commands::json_output::error_codes;

/// Per-flag parameter overrides. `None` keeps the file (or default) value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamOverrides {
    pub clip_ms: Option<f64>,
    pub overlap_ms: Option<f64>,
    pub output_seconds: Option<f64>,
    pub gain: Option<f64>,
    pub window: Option<WindowChoice>,
    pub seed: Option<String>,
}

impl ParamOverrides {
    /// Writes every set override into `params`.
    pub fn apply(&self, params: &mut SynthesisParams) {
        if let Some(v) = self.clip_ms {
            params.clip_ms = v;
        }
        if let Some(v) = self.overlap_ms {
            params.overlap_ms = v;
        }
        if let Some(v) = self.output_seconds {
            params.output_seconds = v;
        }
        if let Some(v) = self.gain {
            params.gain = v;
        }
        if let Some(v) = self.window {
            params.window = v;
        }
        if let Some(seed) = &self.seed {
            params.seed = Some(SeedToken::Text(seed.clone()));
        }
    }
}

/// Parameters ready for synthesis, with their provenance.
#[derive(Debug, Clone)]
pub struct LoadedParams {
    /// Merged parameters (not yet validated).
    pub params: SynthesisParams,
    /// BLAKE3 of the parameter file, when one was read.
    pub source_hash: Option<String>,
}

/// Errors that can occur while loading parameters.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    JsonParse { path: PathBuf, message: String },
}

impl InputError {
    /// Stable error code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::FileRead { .. } => error_codes::FILE_READ,
            InputError::JsonParse { .. } => error_codes::JSON_PARSE,
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { path, message } => {
                write!(f, "invalid parameter file '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Loads parameters from an optional JSON file and applies overrides.
///
/// Without a file the defaults are used as the base.
///
/// # Example
/// ```
/// use snipweave_cli::input::{load_params, ParamOverrides};
///
/// let overrides = ParamOverrides {
///     gain: Some(0.5),
///     ..ParamOverrides::default()
/// };
/// let loaded = load_params(None, &overrides).unwrap();
/// assert_eq!(loaded.params.gain, 0.5);
/// assert_eq!(loaded.params.clip_ms, 250.0);
/// ```
pub fn load_params(
    path: Option<&Path>,
    overrides: &ParamOverrides,
) -> Result<LoadedParams, InputError> {
    let (mut params, source_hash) = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
            let params =
                SynthesisParams::from_json(&content).map_err(|e| InputError::JsonParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            (params, Some(source_hash))
        }
        None => (SynthesisParams::default(), None),
    };

    overrides.apply(&mut params);
    Ok(LoadedParams {
        params,
        source_hash,
    })
}

/// Container and encoding for a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: SaveFormat,
    pub subtype: SampleSubtype,
}

impl OutputSettings {
    /// Resolves output settings for a destination.
    ///
    /// The format is the explicit name if given (unknown names fall back to
    /// WAV), else inferred from the destination extension, else WAV. The
    /// subtype is the explicit one, or the source's with `keep_subtype`, or
    /// `PCM_16`. A float subtype is downgraded to `PCM_16` for AIFF.
    pub fn resolve(
        destination: &Path,
        format: Option<&str>,
        subtype: Option<SampleSubtype>,
        keep_subtype: bool,
        source_subtype: SampleSubtype,
    ) -> Self {
        let format = match format {
            Some(name) => SaveFormat::from_name_lossy(name),
            None => SaveFormat::from_path(destination).unwrap_or_default(),
        };

        let mut subtype = match subtype {
            Some(s) => s,
            None if keep_subtype => source_subtype,
            None => SampleSubtype::default(),
        };
        if format == SaveFormat::Aiff && subtype.is_float() {
            tracing::warn!("AIFF cannot store float samples; writing PCM_16");
            subtype = SampleSubtype::Pcm16;
        }

        Self { format, subtype }
    }
}
