//! `meter-audit`: audit water-meter inventory exports.
//!
//! Exit status: 0 when the inventory is clean, 1 when anomalies were found,
//! 2 when the run could not complete.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use meter_cli::logging::{LogConfig, init_logging};
use meter_validate::{UnformedSerialPolicy, ValidatorOptions};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{CheckArgs, Cli, Command};
use crate::commands::{run_check, run_rules};
use crate::summary::print_summary;

const EXIT_ANOMALIES: u8 = 1;
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::from(EXIT_FAILURE);
    }
    match run(&cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(command: &Command) -> Result<ExitCode> {
    match command {
        Command::Check(args) => {
            let result = run_check(args, validator_options(args))?;
            print_summary(&result);
            Ok(if result.has_anomalies() {
                ExitCode::from(EXIT_ANOMALIES)
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Rules(args) => {
            run_rules(args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// FP2E policy override; clap rejects both flags together.
fn validator_options(args: &CheckArgs) -> ValidatorOptions {
    let policy = if args.strict_fp2e {
        Some(UnformedSerialPolicy::Fault)
    } else if args.lenient_fp2e {
        Some(UnformedSerialPolicy::Conforming)
    } else {
        None
    };
    ValidatorOptions {
        unformed_serial: policy,
    }
}

/// `--log-level` beats `-v/-q`; `RUST_LOG` applies only when neither is given.
fn log_config(cli: &Cli) -> LogConfig {
    let explicit: Option<LevelFilter> = cli.log_level.map(LevelFilter::from);
    LogConfig {
        level_filter: explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
        ..LogConfig::default()
    }
}
