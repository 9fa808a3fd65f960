use std::path::PathBuf;

use anyhow::Result;
use app_config::Settings;
use backtester::Backtester;
use backtester::types::OpenPositionPolicy;
use clap::{Parser, Subcommand};
use core_types::Symbol;
use crossover::CrossoverSettings;
use tracing_subscriber::EnvFilter;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A moving-average crossover backtesting tool.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a historical backtest over a CSV bar series.
    Backtest {
        /// Path to the daily OHLCV CSV file.
        #[arg(short, long)]
        data: PathBuf,

        /// Symbol name used in trade records (e.g. "VTI").
        #[arg(short, long, default_value = "UNKNOWN")]
        symbol: String,

        /// Fast moving-average window length (overrides config).
        #[arg(long)]
        fast: Option<u32>,

        /// Slow moving-average window length (overrides config).
        #[arg(long)]
        slow: Option<u32>,

        /// Close an end-of-data open position at the final bar's close.
        #[arg(long)]
        mark_to_market: bool,
    },

    /// Prints the raw signal stream for a CSV bar series, one JSON line
    /// per (index, signal, position) event.
    Signals {
        /// Path to the daily OHLCV CSV file.
        #[arg(short, long)]
        data: PathBuf,

        /// Fast moving-average window length (overrides config).
        #[arg(long)]
        fast: Option<u32>,

        /// Slow moving-average window length (overrides config).
        #[arg(long)]
        slow: Option<u32>,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Backtest {
            data,
            symbol,
            fast,
            slow,
            mark_to_market,
        } => {
            handle_backtest(settings, data, symbol, fast, slow, mark_to_market)?;
        }
        Commands::Signals { data, fast, slow } => {
            handle_signals(settings, data, fast, slow)?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Merges CLI window overrides into the configured crossover settings.
fn crossover_settings(
    base: CrossoverSettings,
    fast: Option<u32>,
    slow: Option<u32>,
) -> CrossoverSettings {
    CrossoverSettings {
        fast_period: fast.unwrap_or(base.fast_period),
        slow_period: slow.unwrap_or(base.slow_period),
    }
}

// --- "Backtest" Subcommand Logic ---

fn handle_backtest(
    settings: Settings,
    data: PathBuf,
    symbol: String,
    fast: Option<u32>,
    slow: Option<u32>,
    mark_to_market: bool,
) -> Result<()> {
    let bars = market_data::load_bars(&data)?;
    tracing::info!(bars = bars.len(), path = %data.display(), "loaded bar series");

    let crossover = crossover_settings(settings.crossover, fast, slow);
    let mut backtest = settings.backtest;
    if mark_to_market {
        backtest.open_position_policy = OpenPositionPolicy::MarkToMarket;
    }

    let outcome = Backtester::new(Symbol(symbol), crossover, backtest)?.run(&bars)?;

    println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    Ok(())
}

// --- "Signals" Subcommand Logic ---

fn handle_signals(
    settings: Settings,
    data: PathBuf,
    fast: Option<u32>,
    slow: Option<u32>,
) -> Result<()> {
    let bars = market_data::load_bars(&data)?;
    tracing::info!(bars = bars.len(), path = %data.display(), "loaded bar series");

    let crossover = crossover_settings(settings.crossover, fast, slow);
    let events = crossover::evaluate(crossover, &bars)?;

    for event in &events {
        println!("{}", serde_json::to_string(event)?);
    }
    tracing::info!(signals = events.len(), "signal evaluation complete");
    Ok(())
}
