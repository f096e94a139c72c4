//! CLI argument definitions for the lab summary tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use labsum_model::DateOrder;

#[derive(Parser)]
#[command(
    name = "labsum",
    version,
    about = "Summarize HCMED lab report dumps",
    long_about = "Summarize lab report text copied from the hospital records system.\n\n\
                  Splits the dump into timestamped exams, resolves exam synonyms to\n\
                  canonical abbreviations and prints the latest value per exam,\n\
                  a per-day view or a date-pivoted table."
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

    /// Include result values in log output.
    ///
    /// Values are patient data and are redacted by default.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the latest value of every exam, one line per category.
    Summary(InputArgs),

    /// Print every category split into one line per collection day.
    ByDate(ByDateArgs),

    /// Print exams as rows and collection days as columns.
    Table(TableArgs),

    /// Print parse statistics.
    Stats(StatsArgs),

    /// List the exam dictionary in match order.
    Dictionary,
}

#[derive(Args)]
pub struct InputArgs {
    /// Report dump to read (standard input when omitted or `-`).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ByDateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Keep only the most recent collection of each exam.
    #[arg(long = "latest-only")]
    pub latest_only: bool,
}

#[derive(Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column order of the collection days.
    #[arg(long = "order", value_enum, default_value = "asc")]
    pub order: OrderArg,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "pretty")]
    pub format: TableFormatArg,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the statistics as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for DateOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => DateOrder::Ascending,
            OrderArg::Desc => DateOrder::Descending,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormatArg {
    /// Terminal table with abnormal values highlighted.
    Pretty,
    /// Tab-separated rows for spreadsheets.
    Tsv,
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
