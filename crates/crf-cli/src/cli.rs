//! CLI argument definitions for the form checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crf-check",
    version,
    about = "Validate study visit forms against protocol rules and dose history",
    long_about = "Validate submitted case report form records.\n\n\
                  Runs conditional field rules, date ordering and dosing window checks,\n\
                  and reconciles self-reported vaccination history against stored doses."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
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

    /// Allow subject identifiers to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a file of submitted records.
    Validate(ValidateArgs),

    /// List the supported record types.
    Forms,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// JSON file holding one record or an array of records.
    #[arg(value_name = "RECORDS_JSON")]
    pub records: PathBuf,

    /// Protocol configuration (JSON).
    #[arg(long = "protocol", value_name = "PATH")]
    pub protocol: PathBuf,

    /// Stored dose history snapshot (JSON). Defaults to an empty store.
    #[arg(long = "history", value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Report every failing field instead of stopping at the first.
    #[arg(long = "collect-all")]
    pub collect_all: bool,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
