//! Generate command implementation
//!
//! Decodes a source file, synthesizes a new texture from it, and saves the
//! result.

use anyhow::Result;
use colored::Colorize;
use snipweave_audio::{synthesize, AudioError, ProgressObserver, SynthesisResult};
use snipweave_spec::SampleSubtype;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    audio_error_to_json, codec_error_to_json, input_error_to_json, print_json, GenerateOutput,
    GenerateResult, JsonError,
};
use super::progress::TerminalProgress;
use crate::codec::{load_audio, save_audio, CodecError, DecodedAudio};
use crate::input::{load_params, InputError, OutputSettings, ParamOverrides};

/// Everything the `generate` command needs.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Source audio file.
    pub input: PathBuf,
    /// Destination file.
    pub output: PathBuf,
    /// Optional JSON parameter file.
    pub params_file: Option<PathBuf>,
    /// Flag overrides on top of the parameter file.
    pub overrides: ParamOverrides,
    /// Explicit container name (WAV/AIFF).
    pub format: Option<String>,
    /// Explicit sample encoding.
    pub subtype: Option<SampleSubtype>,
    /// Reuse the source's sample encoding.
    pub keep_subtype: bool,
    /// Suppress the progress bar.
    pub quiet: bool,
}

/// Failure of one `generate` stage.
#[derive(Debug)]
pub enum GenerateError {
    /// Parameter file could not be loaded.
    Input(InputError),
    /// Source could not be read.
    Decode(CodecError),
    /// Parameters rejected or synthesis failed.
    Synthesis(AudioError),
    /// Output could not be encoded or written.
    Save(CodecError),
}

impl GenerateError {
    /// Process exit status: 1 for bad parameters or input, 2 for write failures.
    pub fn exit_status(&self) -> u8 {
        match self {
            GenerateError::Save(_) => 2,
            _ => 1,
        }
    }

    /// Structured form for `--json`.
    pub fn to_json(&self) -> JsonError {
        match self {
            GenerateError::Input(e) => input_error_to_json(e),
            GenerateError::Decode(e) | GenerateError::Save(e) => codec_error_to_json(e),
            GenerateError::Synthesis(e) => audio_error_to_json(e),
        }
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::Input(e) => write!(f, "{}", e),
            GenerateError::Decode(e) => write!(f, "{}", e),
            GenerateError::Synthesis(e) => write!(f, "{}", e),
            GenerateError::Save(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GenerateError {}

/// A completed run, ready for reporting.
#[derive(Debug)]
pub struct Generated {
    pub source: DecodedAudio,
    pub synthesis: SynthesisResult,
    pub settings: OutputSettings,
    pub bytes_written: usize,
    pub params_hash: Option<String>,
}

/// Runs the full pipeline: load params, decode, synthesize, save.
///
/// Status lines for the decode and save stages are sent to `status`; the
/// synthesis stages go to `observer`.
pub fn execute(
    options: &GenerateOptions,
    observer: &mut dyn ProgressObserver,
    status: &mut dyn FnMut(String),
) -> Result<Generated, GenerateError> {
    let loaded = load_params(options.params_file.as_deref(), &options.overrides)
        .map_err(GenerateError::Input)?;

    let source = load_audio(&options.input).map_err(GenerateError::Decode)?;
    status(format!(
        "Loaded {}: {} Hz, {} ch",
        file_name(&options.input),
        source.sample_rate,
        source.channels()
    ));

    let synthesis = synthesize(&source.buffer, source.sample_rate, &loaded.params, observer)
        .map_err(GenerateError::Synthesis)?;

    let settings = OutputSettings::resolve(
        &options.output,
        options.format.as_deref(),
        options.subtype,
        options.keep_subtype,
        source.subtype,
    );
    status(format!("Saving {}…", settings.format));
    let bytes_written = save_audio(
        &options.output,
        &synthesis.buffer,
        source.sample_rate,
        settings.format,
        settings.subtype,
    )
    .map_err(GenerateError::Save)?;
    status(format!("Done: {}", file_name(&options.output)));

    Ok(Generated {
        source,
        synthesis,
        settings,
        bytes_written,
        params_hash: loaded.source_hash,
    })
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 parameter or input error, 2 write error
pub fn run(options: &GenerateOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options)
    } else {
        run_human(options)
    }
}

/// Run generate with human-readable (colored) output
fn run_human(options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Source:".cyan().bold(), options.input.display());
    println!("{} {}", "Output:".cyan().bold(), options.output.display());

    let mut bar = TerminalProgress::new(options.quiet);
    let quiet = options.quiet;
    let mut status = |line: String| {
        if !quiet {
            println!("{}", line.dimmed());
        }
    };

    let outcome = execute(options, &mut bar, &mut status);
    bar.finish();

    match outcome {
        Ok(generated) => {
            let result = &generated.synthesis;
            println!(
                "  {} {} frames, {} ch, {} {}",
                "+".green(),
                result.buffer.frames(),
                result.buffer.channels(),
                generated.settings.format,
                generated.settings.subtype
            );
            println!(
                "  {} {} snippets, hop {} samples",
                "+".green(),
                result.snippets,
                result.hop
            );
            println!(
                "  {} seed {} {}",
                "+".green(),
                result.seed,
                format!("(repeat with --seed {})", result.seed).dimmed()
            );
            println!(
                "\n{} Wrote {} ({} bytes, {}ms)",
                "SUCCESS".green().bold(),
                options.output.display(),
                generated.bytes_written,
                start.elapsed().as_millis()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}: {}", "error".red(), err);
            if let GenerateError::Synthesis(AudioError::Param(param)) = &err {
                eprintln!("  {} {}", "field:".dimmed(), param.field());
            }
            Ok(ExitCode::from(err.exit_status()))
        }
    }
}

/// Run generate with machine-readable JSON output
fn run_json(options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let mut silent = snipweave_audio::NoProgress;
    let mut no_status = |_: String| {};

    match execute(options, &mut silent, &mut no_status) {
        Ok(generated) => {
            let Generated {
                source,
                synthesis,
                settings,
                bytes_written,
                params_hash,
            } = generated;
            let result = GenerateResult {
                input: options.input.display().to_string(),
                output: options.output.display().to_string(),
                format: settings.format.to_string(),
                subtype: settings.subtype.to_string(),
                sample_rate: source.sample_rate,
                channels: synthesis.buffer.channels(),
                frames: synthesis.buffer.frames(),
                seed: synthesis.seed,
                clip_samples: synthesis.clip_len,
                overlap_samples: synthesis.overlap_len,
                hop_samples: synthesis.hop,
                snippets: synthesis.snippets,
                pcm_hash: synthesis.pcm_hash,
                bytes_written,
                duration_ms: start.elapsed().as_millis() as u64,
            };
            print_json(&GenerateOutput::success(result, params_hash))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_json(&GenerateOutput::failure(vec![err.to_json()], None))?;
            Ok(ExitCode::from(err.exit_status()))
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
