//! snipweave CLI - random-snippet overlap-add audio textures
//!
//! This binary decodes a source recording, synthesizes a new recording of any
//! length from randomly placed windowed snippets, and saves it.

use clap::Parser;
use std::process::ExitCode;

use snipweave_cli::commands;
use snipweave_cli::commands::generate::GenerateOptions;
use snipweave_cli::commands::validate::ValidateOptions;

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    snipweave_cli::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            flags,
            format,
            subtype,
            keep_subtype,
            json,
            quiet,
        } => {
            let (params_file, overrides) = flags.into_parts();
            let options = GenerateOptions {
                input,
                output,
                params_file,
                overrides,
                format,
                subtype,
                keep_subtype,
                quiet,
            };
            commands::generate::run(&options, json)
        }
        Commands::Info { input, json } => commands::info::run(&input, json),
        Commands::Validate { flags, input, json } => {
            let (params_file, overrides) = flags.into_parts();
            let options = ValidateOptions {
                params_file,
                overrides,
                input,
            };
            commands::validate::run(&options, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
