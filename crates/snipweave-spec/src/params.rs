//! User-facing synthesis parameters.
//!
//! These are the time-domain values a person enters: milliseconds for the
//! snippet and overlap, seconds for the output. They are converted to sample
//! counts by [`SynthesisConfig::resolve`](crate::SynthesisConfig::resolve)
//! once the source sample rate is known.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ParamError, ParamResult};
use crate::seed::SeedToken;
use crate::{MAX_GAIN, MIN_GAIN};

/// Window shape selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowChoice {
    /// Linear fade-in, flat sustain, linear fade-out.
    #[default]
    LinearCrossfade,
    /// Raised cosine across the whole snippet.
    Hann,
}

impl WindowChoice {
    /// Returns the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowChoice::LinearCrossfade => "Linear crossfade",
            WindowChoice::Hann => "Hann (cosine)",
        }
    }
}

impl fmt::Display for WindowChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "linear_crossfade" | "linear crossfade" => Ok(WindowChoice::LinearCrossfade),
            "hann" | "hann (cosine)" | "cosine" => Ok(WindowChoice::Hann),
            other => Err(format!("unknown window '{}' (expected linear or hann)", other)),
        }
    }
}

/// Raw synthesis parameters in time units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisParams {
    /// Snippet size in milliseconds.
    #[serde(default = "default_clip_ms")]
    pub clip_ms: f64,
    /// Overlap / crossfade length in milliseconds.
    #[serde(default = "default_overlap_ms")]
    pub overlap_ms: f64,
    /// Requested output duration in seconds.
    #[serde(default = "default_output_seconds")]
    pub output_seconds: f64,
    /// Linear gain applied after accumulation.
    #[serde(default = "default_gain")]
    pub gain: f64,
    /// Window shape.
    #[serde(default)]
    pub window: WindowChoice,
    /// Repeat code; `None` gives non-reproducible output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedToken>,
}

fn default_clip_ms() -> f64 {
    250.0
}

fn default_overlap_ms() -> f64 {
    100.0
}

fn default_output_seconds() -> f64 {
    30.0
}

fn default_gain() -> f64 {
    1.0
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            clip_ms: default_clip_ms(),
            overlap_ms: default_overlap_ms(),
            output_seconds: default_output_seconds(),
            gain: default_gain(),
            window: WindowChoice::default(),
            seed: None,
        }
    }
}

impl SynthesisParams {
    /// Parses parameters from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the seed token.
    pub fn with_seed(mut self, seed: impl Into<SeedToken>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Sets the window shape.
    pub fn with_window(mut self, window: WindowChoice) -> Self {
        self.window = window;
        self
    }

    /// Checks the time-domain values.
    ///
    /// Window-specific overlap rules and the source-length check need sample
    /// counts and are applied later by
    /// [`SynthesisConfig::resolve`](crate::SynthesisConfig::resolve).
    pub fn validate(&self) -> ParamResult<()> {
        if !self.clip_ms.is_finite() || self.clip_ms <= 0.0 {
            return Err(ParamError::InvalidClipLength {
                clip_ms: self.clip_ms,
            });
        }
        if !self.overlap_ms.is_finite() || self.overlap_ms < 0.0 {
            return Err(ParamError::overlap(format!(
                "overlap must be >= 0 ms, got {}",
                self.overlap_ms
            )));
        }
        if !self.output_seconds.is_finite() || self.output_seconds <= 0.0 {
            return Err(ParamError::InvalidOutputLength {
                seconds: self.output_seconds,
            });
        }
        if !(MIN_GAIN..=MAX_GAIN).contains(&self.gain) {
            return Err(ParamError::InvalidGain { gain: self.gain });
        }
        if let Some(seed) = &self.seed {
            seed.resolve()?;
        }
        Ok(())
    }
}
