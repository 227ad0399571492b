//! Validate command implementation
//!
//! Checks synthesis parameters without producing any output. With a source
//! file the sample-domain checks (clip length against the source, window
//! overlap rules) run as well.

use anyhow::Result;
use colored::Colorize;
use snipweave_spec::{resolve_seed, SynthesisConfig};
use std::path::PathBuf;
use std::process::ExitCode;

use super::json_output::{
    codec_error_to_json, input_error_to_json, param_error_to_json, print_json, JsonError,
    ValidateOutput, ValidateResult,
};
use crate::codec::load_audio;
use crate::input::{load_params, ParamOverrides};

/// Inputs to the `validate` command.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Optional JSON parameter file.
    pub params_file: Option<PathBuf>,
    /// Flag overrides on top of the parameter file.
    pub overrides: ParamOverrides,
    /// Source to check the parameters against.
    pub input: Option<PathBuf>,
}

/// Validates parameters and returns the details or the first error.
pub fn check(options: &ValidateOptions) -> Result<ValidateResult, JsonError> {
    let loaded = load_params(options.params_file.as_deref(), &options.overrides)
        .map_err(|e| input_error_to_json(&e))?;
    let params = loaded.params;

    params.validate().map_err(|e| param_error_to_json(&e))?;
    let seed = resolve_seed(params.seed.as_ref()).map_err(|e| param_error_to_json(&e))?;

    let config = match &options.input {
        Some(path) => {
            let source = load_audio(path).map_err(|e| codec_error_to_json(&e))?;
            let config = SynthesisConfig::resolve(&params, source.sample_rate, source.frames())
                .map_err(|e| param_error_to_json(&e))?;
            config
                .output_samples(source.channels())
                .map_err(|e| param_error_to_json(&e))?;
            Some(config)
        }
        None => None,
    };

    Ok(ValidateResult {
        params,
        seed,
        hop_samples: config.as_ref().map(|c| c.hop()),
        config,
    })
}

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(options: &ValidateOptions, json_output: bool) -> Result<ExitCode> {
    let outcome = check(options);

    if json_output {
        let output = match &outcome {
            Ok(result) => ValidateOutput {
                success: true,
                errors: Vec::new(),
                result: Some(result.clone()),
            },
            Err(err) => ValidateOutput {
                success: false,
                errors: vec![err.clone()],
                result: None,
            },
        };
        print_json(&output)?;
    } else {
        match &outcome {
            Ok(result) => print_result(result),
            Err(err) => {
                let field = err
                    .field
                    .as_ref()
                    .map(|f| format!(" ({})", f))
                    .unwrap_or_default();
                println!(
                    "{} [{}]{}: {}",
                    "FAILED".red().bold(),
                    err.code,
                    field.dimmed(),
                    err.message
                );
            }
        }
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_result(result: &ValidateResult) {
    let p = &result.params;
    println!(
        "{} clip {} ms, overlap {} ms, {} s, gain {}, {}",
        "Params:".cyan().bold(),
        p.clip_ms,
        p.overlap_ms,
        p.output_seconds,
        p.gain,
        p.window.as_str()
    );
    match result.seed {
        Some(seed) => println!("{} {}", "Seed:".cyan().bold(), seed),
        None => println!("{} {}", "Seed:".cyan().bold(), "random".dimmed()),
    }
    if let Some(config) = &result.config {
        println!(
            "{} clip {} / overlap {} / hop {} samples, {} output frames",
            "Samples:".cyan().bold(),
            config.clip_len,
            config.overlap_len,
            config.hop(),
            config.output_len
        );
    }
    println!("\n{} Parameters are valid", "SUCCESS".green().bold());
}
