//! CLI argument definitions for the snipweave command-line interface.
//!
//! All clap derive types live here, keeping `main.rs` focused on dispatch.

use clap::{Args, Parser, Subcommand};
use snipweave_cli::input::ParamOverrides;
use snipweave_spec::{SampleSubtype, WindowChoice};
use std::path::PathBuf;

/// snipweave - random-snippet overlap-add audio textures
#[derive(Parser)]
#[command(name = "snipweave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Show debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Synthesize a new file from random snippets of a source file
    Generate {
        /// Source audio file (WAV, AIFF)
        #[arg(short, long)]
        input: PathBuf,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        flags: ParamFlags,

        /// Output container (wav, aiff); inferred from the output extension by default
        #[arg(long)]
        format: Option<String>,

        /// Sample encoding (pcm_8, pcm_16, pcm_24, pcm_32, float)
        #[arg(long)]
        subtype: Option<SampleSubtype>,

        /// Write with the source file's sample encoding
        #[arg(long, conflicts_with = "subtype")]
        keep_subtype: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Hide the progress bar and status lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print sample rate, channels, duration and encoding of an audio file
    Info {
        /// Audio file to inspect
        #[arg(short, long)]
        input: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check synthesis parameters without writing anything
    Validate {
        #[command(flatten)]
        flags: ParamFlags,

        /// Also check against this source file (clip length, overlap in samples)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Synthesis parameter flags shared by `generate` and `validate`.
#[derive(Args, Debug, Default)]
pub(crate) struct ParamFlags {
    /// JSON parameter file; individual flags override its values
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Snippet size in milliseconds (default 250)
    #[arg(long)]
    pub clip_ms: Option<f64>,

    /// Overlap / crossfade in milliseconds (default 100)
    #[arg(long)]
    pub overlap_ms: Option<f64>,

    /// Output length in seconds (default 30)
    #[arg(short, long)]
    pub seconds: Option<f64>,

    /// Output gain, 0.05 to 2.0 (default 1.0)
    #[arg(short, long)]
    pub gain: Option<f64>,

    /// Window shape (linear, hann)
    #[arg(short, long)]
    pub window: Option<WindowChoice>,

    /// Repeat code: a number, or any text
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<String>,
}

impl ParamFlags {
    /// Splits the flags into the parameter file and per-field overrides.
    pub fn into_parts(self) -> (Option<PathBuf>, ParamOverrides) {
        let overrides = ParamOverrides {
            clip_ms: self.clip_ms,
            overlap_ms: self.overlap_ms,
            output_seconds: self.seconds,
            gain: self.gain,
            window: self.window,
            seed: self.seed,
        };
        (self.params, overrides)
    }
}
