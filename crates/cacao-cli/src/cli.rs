//! CLI argument definitions for the cacao cleaner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cacao",
    version,
    about = "Clean and prepare chocolate-bar review data",
    long_about = "Clean scraped chocolate-bar review tables.\n\n\
                  Runs text cleaning, format normalization, type casting and\n\
                  missing-value imputation, and writes raw, interim and clean snapshots."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full cleaning pipeline on a CSV extraction.
    Clean(CleanArgs),

    /// Show the imputation decisions for a CSV extraction without filling.
    Analyze(AnalyzeArgs),

    /// Report row, duplicate and missing-value counts of a CSV file.
    Check(InputArgs),

    /// List the columns of a CSV file with their role and missing count.
    Columns(InputArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// CSV file to read.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

/// Options shared by commands that run pipeline stages.
#[derive(Args)]
pub struct PipelineArgs {
    /// JSON pipeline configuration (defaults apply to every omitted field).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Missing proportion at or below which the mode is used.
    #[arg(long = "mode-threshold", value_name = "RATIO")]
    pub mode_threshold: Option<f64>,

    /// Missing proportion above which the sentinel label is used.
    #[arg(long = "drop-threshold", value_name = "RATIO")]
    pub drop_threshold: Option<f64>,

    /// How casts treat values that do not fit the target type.
    #[arg(long = "cast-mode", value_enum)]
    pub cast_mode: Option<CastModeArg>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Raw CSV extraction to clean.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Root directory for the raw/, interim/ and processed/ snapshots.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "data")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Numeric column to rescale to [0, 1] (repeatable).
    #[arg(long = "normalize", value_name = "COLUMN")]
    pub normalize: Vec<String>,

    /// Write the pipeline diagnostics as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Run every stage and print the summary without writing snapshots.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Raw CSV extraction to analyze.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CastModeArg {
    Strict,
    Coerce,
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
