//! snipweave synthesis engine
//!
//! This crate turns a decoded source recording into a new recording of any
//! length by overlap-adding short windowed snippets taken from random offsets
//! in the source.
//!
//! # Overview
//!
//! A run moves through a fixed pipeline:
//!
//! - **Config** - [`snipweave_spec::SynthesisConfig`] converts time-domain
//!   parameters to samples and validates them against the source.
//! - **Window** - one [`WindowCurve`] per run, linear crossfade or Hann.
//! - **Sampler** - [`SnippetSampler`] draws snippet starts from a seeded
//!   PCG32 generator.
//! - **Overlap-add** - [`OverlapAdd`] sums windowed snippets into a
//!   zero-filled output, advancing by the hop length.
//! - **Gain** - [`apply_gain`] scales and hard-clips to `[-1.0, 1.0]`.
//!
//! # Determinism
//!
//! Given the same source, parameters and seed, the output is bit-identical
//! across runs and platforms. Unseeded runs draw their seed from OS entropy
//! and report it in [`SynthesisResult::seed`].
//!
//! # Example
//!
//! ```
//! use snipweave_audio::{synthesize, AudioBuffer, NoProgress};
//! use snipweave_spec::SynthesisParams;
//!
//! let source = AudioBuffer::mono((0..8_000).map(|i| (i as f32 * 0.01).sin()).collect());
//! let params = SynthesisParams {
//!     clip_ms: 100.0,
//!     overlap_ms: 20.0,
//!     output_seconds: 3.0,
//!     ..SynthesisParams::default()
//! }
//! .with_seed(7u64);
//!
//! let result = synthesize(&source, 8_000, &params, &mut NoProgress).unwrap();
//! assert_eq!(result.buffer.frames(), 24_000);
//! ```
//!
//! # Crate Structure
//!
//! - [`synthesize()`] - Main entry point
//! - [`window`] - Window curve generators
//! - [`sampler`] - Seeded snippet placement
//! - [`overlap_add`] - Accumulation engine
//! - [`gain`] - Output gain and clipping
//! - [`progress`] - Progress observer trait
//! - [`rng`] - PCG32 construction and entropy seeds

pub mod buffer;
pub mod error;
pub mod gain;
pub mod overlap_add;
pub mod progress;
pub mod rng;
pub mod sampler;
pub mod synthesize;
pub mod window;

// Re-export main types at crate root
pub use buffer::AudioBuffer;
pub use error::{AudioError, AudioResult};
pub use gain::apply_gain;
pub use overlap_add::{EngineState, OverlapAdd, Placement};
pub use progress::{NoProgress, ProgressObserver, SynthesisStage};
pub use sampler::SnippetSampler;
pub use synthesize::{synthesize, synthesize_config, SynthesisResult};
pub use window::{hann_window, linear_window, WindowCurve};
