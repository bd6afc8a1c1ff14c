//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rulebook")]
#[command(author, version, about = "Rule-driven trading engine with declarative strategies")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a strategy backtest over historical bars
    Backtest(BacktestArgs),
    /// Replay historical bars through the live tick path
    Replay(ReplayArgs),
    /// List loaded strategies
    Strategies {
        /// Load from this directory instead of the configured one
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Inspect persisted backtest runs
    Runs {
        #[command(subcommand)]
        action: RunsAction,
    },
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Strategy id to backtest
    #[arg(short, long)]
    pub strategy: String,

    /// Historical data file (CSV)
    #[arg(long)]
    pub data: PathBuf,

    /// Start date (YYYY-MM-DD), defaults to the beginning of the data
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), defaults to the end of the data
    #[arg(long)]
    pub end: Option<String>,

    /// Indicator parameter overrides as JSON,
    /// e.g. '{"ema_fast": {"period": 5}}'
    #[arg(long)]
    pub overrides: Option<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the result JSON to a file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Skip persisting the run to the run store
    #[arg(long)]
    pub no_save: bool,
}

#[derive(clap::Args)]
pub struct ReplayArgs {
    /// Strategy id to replay
    #[arg(short, long)]
    pub strategy: String,

    /// Historical data file (CSV)
    #[arg(long)]
    pub data: PathBuf,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Subcommand)]
pub enum RunsAction {
    /// List persisted runs, oldest first
    List,
    /// Export the trades of one run
    Export {
        /// Run id
        #[arg(long)]
        id: u64,

        /// Export format (csv, json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete runs and their trades
    Delete {
        /// Run ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<u64>,
    },
}
