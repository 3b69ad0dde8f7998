//! CLI argument definitions for meter-audit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use meter_cli::logging::LogFormat;
use meter_model::Variant;

#[derive(Parser)]
#[command(
    name = "meter-audit",
    version,
    about = "Audit water-meter inventories against brand and FP2E rules",
    long_about = "Audit water-meter inventory exports (radio, remote and manual reads).\n\n\
                  Flags rows that break brand numbering rules or the FP2E serial standard,\n\
                  proposes corrections, and summarizes faults by type."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level values (serials, coordinates) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an inventory file and print the fault summary.
    Check(CheckArgs),

    /// List the ordered rules of a variant.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Inventory export (delimited text, or an .xlsx/.xls workbook).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Inventory variant.
    #[arg(long = "variant", value_enum)]
    pub variant: VariantArg,

    /// Write the annotated anomaly table to this CSV file.
    #[arg(long = "output", value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Write a JSON report to this file.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Input delimiter (auto-detected when omitted; ignored for workbooks).
    #[arg(long = "delimiter", value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Delimiter of the exported CSV.
    #[arg(
        long = "output-delimiter",
        value_name = "CHAR",
        value_parser = parse_delimiter,
        default_value = ";"
    )]
    pub output_delimiter: u8,

    /// Report serials that are not FP2E-formed as faults.
    #[arg(long = "strict-fp2e", conflicts_with = "lenient_fp2e")]
    pub strict_fp2e: bool,

    /// Treat serials that are not FP2E-formed as conforming.
    #[arg(long = "lenient-fp2e")]
    pub lenient_fp2e: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Variant to list (all variants when omitted).
    #[arg(long = "variant", value_enum)]
    pub variant: Option<VariantArg>,
}

/// CLI inventory variant choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum VariantArg {
    Radio,
    Remote,
    Manual,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Radio => Variant::Radio,
            VariantArg::Remote => Variant::Remote,
            VariantArg::Manual => Variant::Manual,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Accepts a single ASCII character, or `tab` / `\t`.
fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
                _ => Err(format!("expected a single ASCII character, got {value:?}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delimiter_parsing() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn fp2e_flags_conflict() {
        let result = Cli::try_parse_from([
            "meter-audit",
            "check",
            "inventory.csv",
            "--variant",
            "radio",
            "--strict-fp2e",
            "--lenient-fp2e",
        ]);
        assert!(result.is_err());
    }
}
