//! Output container and sample-encoding types.
//!
//! The engine never looks at these; they travel from the configuration
//! surface to the codec collaborator untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Container format for the saved output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveFormat {
    /// RIFF WAVE.
    #[default]
    Wav,
    /// Audio Interchange File Format.
    Aiff,
}

impl SaveFormat {
    /// Parses a user-facing format name, falling back to WAV for anything
    /// unrecognized.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Infers the format from a destination path extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "wav" | "wave" => Some(SaveFormat::Wav),
            "aif" | "aiff" | "aifc" => Some(SaveFormat::Aiff),
            _ => None,
        }
    }

    /// Returns the canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Wav => "wav",
            SaveFormat::Aiff => "aiff",
        }
    }

    /// Returns the upper-case display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveFormat::Wav => "WAV",
            SaveFormat::Aiff => "AIFF",
        }
    }
}

impl fmt::Display for SaveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WAV" | "WAVE" => Ok(SaveFormat::Wav),
            "AIFF" | "AIF" => Ok(SaveFormat::Aiff),
            other => Err(format!("unknown save format '{}' (expected WAV or AIFF)", other)),
        }
    }
}

/// Sample encoding hint passed to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SampleSubtype {
    /// Signed 8-bit integer PCM.
    #[serde(rename = "PCM_8")]
    Pcm8,
    /// Signed 16-bit integer PCM.
    #[default]
    #[serde(rename = "PCM_16")]
    Pcm16,
    /// Signed 24-bit integer PCM.
    #[serde(rename = "PCM_24")]
    Pcm24,
    /// Signed 32-bit integer PCM.
    #[serde(rename = "PCM_32")]
    Pcm32,
    /// 32-bit IEEE float.
    #[serde(rename = "FLOAT")]
    Float,
}

impl SampleSubtype {
    /// Bits per sample.
    pub fn bits(&self) -> u16 {
        match self {
            SampleSubtype::Pcm8 => 8,
            SampleSubtype::Pcm16 => 16,
            SampleSubtype::Pcm24 => 24,
            SampleSubtype::Pcm32 | SampleSubtype::Float => 32,
        }
    }

    /// Whether samples are stored as floating point.
    pub fn is_float(&self) -> bool {
        matches!(self, SampleSubtype::Float)
    }

    /// Maps an integer bit depth to its PCM subtype.
    pub fn from_int_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(SampleSubtype::Pcm8),
            16 => Some(SampleSubtype::Pcm16),
            24 => Some(SampleSubtype::Pcm24),
            32 => Some(SampleSubtype::Pcm32),
            _ => None,
        }
    }

    /// Returns the display name (e.g. "PCM_16").
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleSubtype::Pcm8 => "PCM_8",
            SampleSubtype::Pcm16 => "PCM_16",
            SampleSubtype::Pcm24 => "PCM_24",
            SampleSubtype::Pcm32 => "PCM_32",
            SampleSubtype::Float => "FLOAT",
        }
    }
}

impl fmt::Display for SampleSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleSubtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PCM_S8" | "PCM_8" => Ok(SampleSubtype::Pcm8),
            "PCM_16" => Ok(SampleSubtype::Pcm16),
            "PCM_24" => Ok(SampleSubtype::Pcm24),
            "PCM_32" => Ok(SampleSubtype::Pcm32),
            "FLOAT" => Ok(SampleSubtype::Float),
            other => Err(format!(
                "unknown subtype '{}' (expected PCM_8, PCM_16, PCM_24, PCM_32, or FLOAT)",
                other
            )),
        }
    }
}
