//! CLI argument definitions for pagesel.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pagesel_model::DEFAULT_PAGE_SIZE;

#[derive(Parser)]
#[command(
    name = "pagesel",
    version,
    about = "Select items in a paginated collection, one page at a time",
    long_about = "Drive a selection session over a collection that is only ever fetched\n\
                  one page at a time.\n\n\
                  Selection combines a bulk rule (\"first N items\"), per-item overrides\n\
                  and page-level select-all, without loading more than one page."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a script of selection commands against a collection.
    Browse(BrowseArgs),

    /// Print the toggle transition table.
    Explain,
}

#[derive(Parser)]
pub struct BrowseArgs {
    /// Script file with one command per line (reads stdin when omitted).
    ///
    /// Commands: `page N`, `next`, `prev`, `toggle ID on|off`,
    /// `all on|off`, `select N`, `show`. Lines starting with `#` are ignored.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Serve a synthetic collection with ids 1..=N.
    #[arg(long = "items", value_name = "N", default_value_t = 100, conflicts_with = "source")]
    pub items: u64,

    /// Serve the collection from a JSON array of `{ "id": ..., "fields": {...} }` items.
    #[arg(long = "source", value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Items per page.
    #[arg(long = "page-size", value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,

    /// Make fetches of this page fail with a network error (repeatable).
    #[arg(long = "fail-page", value_name = "N")]
    pub fail_pages: Vec<u64>,

    /// Do not log toggles for items that are not on the current page.
    #[arg(long = "quiet-ignored")]
    pub quiet_ignored: bool,

    /// Output format for the session report.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
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
