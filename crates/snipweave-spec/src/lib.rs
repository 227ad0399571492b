//! snipweave parameter library
//!
//! This crate provides the types a caller fills in to request a snippet
//! synthesis run, and the validation that turns them into a sample-domain
//! [`SynthesisConfig`].
//!
//! # Overview
//!
//! - **Parameters**: [`SynthesisParams`] holds time-domain values (ms, s),
//!   gain, window choice, and an optional seed token. It round-trips through
//!   JSON with `deny_unknown_fields`.
//! - **Seeds**: [`SeedToken`] accepts numbers or free text. Text is hashed
//!   with BLAKE3 so a repeat code means the same thing everywhere.
//! - **Config**: [`SynthesisConfig::resolve`] converts to sample counts and
//!   checks every invariant the engine relies on.
//!
//! # Example
//!
//! ```
//! use snipweave_spec::{SynthesisConfig, SynthesisParams, WindowKind};
//!
//! let params = SynthesisParams {
//!     clip_ms: 250.0,
//!     overlap_ms: 100.0,
//!     output_seconds: 2.0,
//!     ..SynthesisParams::default()
//! }
//! .with_seed(42u64);
//!
//! let config = SynthesisConfig::resolve(&params, 48_000, 48_000).unwrap();
//! assert_eq!(config.clip_len, 12_000);
//! assert_eq!(config.window, WindowKind::LinearCrossfade { overlap: 4_800 });
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod params;
pub mod seed;

pub use config::{
    hop_length, seconds_to_samples, SynthesisConfig, WindowKind, MAX_OUTPUT_SAMPLES,
};
pub use error::{ParamError, ParamResult};
pub use format::{SampleSubtype, SaveFormat};
pub use params::{SynthesisParams, WindowChoice};
pub use seed::{hash_seed_text, resolve_seed, SeedToken};

/// Smallest accepted gain.
pub const MIN_GAIN: f64 = 0.05;

/// Largest accepted gain.
pub const MAX_GAIN: f64 = 2.0;
