//! SETLab CLI — collect daily SET candlesticks into CSV artifacts.
//!
//! Commands:
//! - `collect` — fetch the configured universe from the Settrade Open API,
//!   normalize, and write the combined and train/test CSVs

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use setlab_core::config::{CollectConfig, OutputPaths};
use setlab_core::data::{Credentials, SettradeProvider, StdoutProgress};
use setlab_core::export::{sort_combined, write_outputs};
use setlab_core::pipeline::collect_symbols;

#[derive(Parser)]
#[command(name = "setlab", about = "SETLab CLI — SET candlestick data collector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily candlesticks for the universe and write the CSV artifacts.
    Collect {
        /// Symbols to collect. Defaults to the built-in 32-symbol universe.
        symbols: Vec<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Range start (YYYY-MM-DDTHH:MM:SS). Defaults to 2021-08-01T00:00:00.
        #[arg(long)]
        start: Option<String>,

        /// Range end (YYYY-MM-DDTHH:MM:SS). Defaults to 2024-08-09T23:59:00.
        #[arg(long)]
        end: Option<String>,

        /// Directory for the output CSVs. Defaults to the current directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Collect {
            symbols,
            config,
            start,
            end,
            output_dir,
        } => run_collect(symbols, config, start, end, output_dir),
    }
}

fn run_collect(
    symbols: Vec<String>,
    config_path: Option<PathBuf>,
    start: Option<String>,
    end: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => CollectConfig::from_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => CollectConfig::default(),
    };

    if !symbols.is_empty() {
        config.symbols = symbols;
    }
    if let Some(s) = &start {
        config.start = parse_datetime(s)?;
    }
    if let Some(e) = &end {
        config.end = parse_datetime(e)?;
    }
    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir {}", dir.display()))?;
        config.outputs = OutputPaths::in_dir(dir);
    }

    let credentials = Credentials::from_env()?;
    let provider = SettradeProvider::login(&credentials).context("Settrade login failed")?;

    let summary = collect_symbols(&provider, &config.symbols, &config.query(), &StdoutProgress);

    // Per-symbol failures were already reported; only a run with nothing to
    // aggregate is fatal.
    if summary.tables.is_empty() {
        bail!("no symbol produced any data");
    }

    let combined = sort_combined(summary.tables);
    write_outputs(&combined, &config.outputs)?;

    println!(
        "Data saved to {} and {}",
        config.outputs.train.display(),
        config.outputs.test.display()
    );

    Ok(())
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .with_context(|| format!("invalid datetime '{s}' (expected YYYY-MM-DDTHH:MM:SS)"))
}
