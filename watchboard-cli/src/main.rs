//! Watchboard CLI: one-shot commands that share the dashboard configuration.
//!
//! Commands:
//! - `snapshot` — fetch every watch-list symbol once and print one line each
//! - `config` — print the effective configuration as TOML

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use std::path::PathBuf;
use std::sync::Arc;
use watchboard_core::{
    CircuitBreaker, FetchCycle, Generation, InstrumentRecord, RecordStatus, Snapshot,
    WatchConfig, YahooQuoteSource,
};

#[derive(Parser)]
#[command(
    name = "watchboard-cli",
    about = "Watchboard CLI — intraday watch-list snapshots"
)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every symbol once and print open, last, and change since open.
    Snapshot {
        /// Symbols to fetch instead of the configured watch-list.
        symbols: Vec<String>,

        /// Print the snapshot as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Disable ANSI colors.
        #[arg(long, default_value_t = false)]
        no_color: bool,
    },
    /// Print the effective configuration.
    Config,
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Snapshot {
            symbols,
            json,
            no_color,
        } => run_snapshot(config, symbols, json, !no_color),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<WatchConfig> {
    match path {
        Some(path) => {
            WatchConfig::load(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(WatchConfig::default()),
    }
}

fn run_snapshot(
    mut config: WatchConfig,
    symbols: Vec<String>,
    json: bool,
    color: bool,
) -> Result<()> {
    if !symbols.is_empty() {
        config.watchlist = symbols.iter().map(|s| s.trim().to_string()).collect();
        config.validate().context("invalid symbol list")?;
    }

    let breaker = Arc::new(CircuitBreaker::new(config.breaker_cooldown()));
    let source = YahooQuoteSource::new(&config.provider, breaker).context("building quote client")?;
    let cycle = FetchCycle::new(
        Generation::default().next(),
        config.watchlist.iter().cloned().collect(),
        Arc::new(source),
        config.max_concurrency,
    );
    let snapshot = cycle.run_to_completion();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot, color);
    }
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, color: bool) {
    let updated = snapshot.generated_at().with_timezone(&Local);
    println!("Watch-list at {}", updated.format("%Y-%m-%d %H:%M:%S"));
    for record in snapshot.records() {
        let line = format_record(record);
        match (&record.status, color) {
            (RecordStatus::Ok(m), true) if m.absolute_change > 0.0 => println!("{}", line.green()),
            (RecordStatus::Ok(m), true) if m.absolute_change < 0.0 => println!("{}", line.red()),
            _ => println!("{line}"),
        }
    }
}

/// One fixed-width line per record.
fn format_record(record: &InstrumentRecord) -> String {
    let symbol = &record.symbol;
    match &record.status {
        RecordStatus::Ok(m) => format!(
            "{symbol:<8} Open: {:8.2}  Now: {:8.2}  Change: {:6.2}%  Price Change: {:7.2}",
            m.open, m.last, m.percent_change, m.absolute_change
        ),
        RecordStatus::NoData => format!("{symbol} - No intraday data available."),
        RecordStatus::FetchError(msg) => format!("{symbol} - Fetch failed: {msg}"),
    }
}
