//! CLI argument definitions for the OSM CSV transpiler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "osmcsv",
    version,
    about = "OSM CSV Transpiler - Convert an OpenStreetMap extract to relational CSV",
    long_about = "Convert an OpenStreetMap XML extract into five correlated CSV files\n\
                  (nodes, node tags, ways, way-node memberships, way tags) ready for\n\
                  loading into a relational store.\n\n\
                  Street designations and phone numbers are cleaned with the locale\n\
                  heuristics audited against the Kyiv extract."
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
    /// Convert an OSM extract into the five CSV streams.
    Convert(ConvertArgs),

    /// Survey non-canonical street designations in an OSM extract.
    Audit(AuditArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Path to the OSM XML extract.
    #[arg(value_name = "OSM_FILE")]
    pub osm_file: PathBuf,

    /// Output directory for the CSV files (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Validate each shaped record against the stream schemas.
    ///
    /// Validation is considerably slower; prefer running it on a sample of
    /// the extract.
    #[arg(long = "validate")]
    pub validate: bool,

    /// Print the run summary as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct AuditArgs {
    /// Path to the OSM XML extract.
    #[arg(value_name = "OSM_FILE")]
    pub osm_file: PathBuf,

    /// Print the survey as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
