//! Seed tokens for reproducible synthesis.
//!
//! A seed token is what a user types into a "repeat code" field. Numeric
//! tokens are used directly. Any other text is hashed with BLAKE3 so that the
//! same text maps to the same seed on every platform and release.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ParamError, ParamResult};

/// A user-supplied seed: either a number or free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedToken {
    /// Explicit numeric seed.
    Number(u64),
    /// Free-form repeat code.
    Text(String),
}

impl SeedToken {
    /// Resolves the token into a generator seed.
    ///
    /// Text is trimmed first. Text that parses as a `u64` is used verbatim;
    /// anything else goes through [`hash_seed_text`].
    ///
    /// # Errors
    /// Returns [`ParamError::InvalidSeedToken`] for empty text.
    pub fn resolve(&self) -> ParamResult<u64> {
        match self {
            SeedToken::Number(n) => Ok(*n),
            SeedToken::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(ParamError::InvalidSeedToken);
                }
                match text.parse::<u64>() {
                    Ok(n) => Ok(n),
                    Err(_) => Ok(hash_seed_text(text) as u64),
                }
            }
        }
    }
}

impl From<u64> for SeedToken {
    fn from(value: u64) -> Self {
        SeedToken::Number(value)
    }
}

impl From<&str> for SeedToken {
    fn from(value: &str) -> Self {
        SeedToken::Text(value.to_string())
    }
}

impl From<String> for SeedToken {
    fn from(value: String) -> Self {
        SeedToken::Text(value)
    }
}

impl fmt::Display for SeedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedToken::Number(n) => write!(f, "{}", n),
            SeedToken::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Hashes a non-numeric repeat code into a 32-bit seed.
///
/// The seed is the first four bytes of `BLAKE3(utf8(text))`, read
/// little-endian.
pub fn hash_seed_text(text: &str) -> u32 {
    let hash = blake3::hash(text.as_bytes());
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Resolves an optional token; `None` means "not reproducible".
pub fn resolve_seed(token: Option<&SeedToken>) -> ParamResult<Option<u64>> {
    token.map(SeedToken::resolve).transpose()
}
