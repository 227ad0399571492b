//! Info command implementation
//!
//! Prints the basic properties of a source audio file.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{codec_error_to_json, print_json, InfoOutput, InfoResult};
use crate::codec::load_audio;

/// Run the info command
///
/// # Arguments
/// * `input` - Path to the audio file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if decoded, 1 otherwise
pub fn run(input: &Path, json_output: bool) -> Result<ExitCode> {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    match load_audio(input) {
        Ok(decoded) => {
            let summary = decoded.summary(&name);
            if json_output {
                let result = InfoResult {
                    name,
                    sample_rate: decoded.sample_rate,
                    channels: decoded.channels(),
                    frames: decoded.frames(),
                    duration_seconds: decoded.duration_seconds(),
                    subtype: decoded.subtype.to_string(),
                    summary,
                };
                print_json(&InfoOutput {
                    success: true,
                    errors: Vec::new(),
                    result: Some(result),
                })?;
            } else {
                println!("{}", summary);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if json_output {
                print_json(&InfoOutput {
                    success: false,
                    errors: vec![codec_error_to_json(&err)],
                    result: None,
                })?;
            } else {
                eprintln!("{}: {}", "error".red(), err);
            }
            Ok(ExitCode::from(1))
        }
    }
}
