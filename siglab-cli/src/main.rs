//! SigLab CLI — signal, backtest, and scan commands.
//!
//! Commands:
//! - `signal` — compute a multi-timeframe signal for one symbol
//! - `backtest` — walk-forward backtest of the heuristic score
//! - `scan` — score many symbols in parallel and rank the strongest
//!
//! All commands work against the exchange fallback chain (Binance, then
//! Coinbase, then CryptoCompare) or, with `--offline`, a seeded synthetic
//! provider so runs are reproducible without network access.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use siglab_core::data::{CandleProvider, FallbackProvider, SyntheticProvider};
use siglab_core::domain::{Direction, Interval, NewsSentiment};
use siglab_core::{analyze_series, build_signal, run_backtest, SignalInputs, MIN_BARS};

#[derive(Parser)]
#[command(name = "siglab", about = "SigLab CLI — trading signal synthesis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a signal for one symbol, confirmed on the next higher timeframe.
    Signal {
        /// Pair symbol, e.g. BTCUSDT.
        #[arg(long, default_value = "BTCUSDT")]
        symbol: String,

        /// Primary candle interval.
        #[arg(long, default_value = "4h")]
        interval: Interval,

        /// Confirmation interval. Defaults to the natural higher timeframe.
        #[arg(long)]
        confirm_interval: Option<Interval>,

        /// Candles to fetch per timeframe.
        #[arg(long, default_value_t = 500)]
        limit: usize,

        /// Use the seeded synthetic provider instead of exchanges.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Seed for the synthetic provider.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Replay the heuristic score bar by bar and report trade statistics.
    Backtest {
        #[arg(long, default_value = "BTCUSDT")]
        symbol: String,

        #[arg(long, default_value = "4h")]
        interval: Interval,

        /// Trailing candles to replay (also the fetch size).
        #[arg(long, default_value_t = 500)]
        lookback: usize,

        /// Print the full stats JSON, including every simulated trade.
        #[arg(long, default_value_t = false)]
        json: bool,

        #[arg(long, default_value_t = false)]
        offline: bool,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Score many symbols in parallel and rank the strongest setups.
    Scan {
        /// Symbols to scan.
        #[arg(required = true)]
        symbols: Vec<String>,

        #[arg(long, default_value = "4h")]
        interval: Interval,

        #[arg(long, default_value_t = 400)]
        limit: usize,

        /// How many longs and shorts to list.
        #[arg(long, default_value_t = 10)]
        top: usize,

        #[arg(long, default_value_t = false)]
        offline: bool,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn make_provider(offline: bool, seed: u64) -> Box<dyn CandleProvider> {
    if offline {
        Box::new(SyntheticProvider::new(seed))
    } else {
        Box::new(FallbackProvider::exchange_chain())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Signal {
            symbol,
            interval,
            confirm_interval,
            limit,
            offline,
            seed,
        } => run_signal(&symbol, interval, confirm_interval, limit, offline, seed),
        Commands::Backtest {
            symbol,
            interval,
            lookback,
            json,
            offline,
            seed,
        } => run_backtest_cmd(&symbol, interval, lookback, json, offline, seed),
        Commands::Scan {
            symbols,
            interval,
            limit,
            top,
            offline,
            seed,
        } => run_scan(&symbols, interval, limit, top, offline, seed),
    }
}

fn run_signal(
    symbol: &str,
    interval: Interval,
    confirm_interval: Option<Interval>,
    limit: usize,
    offline: bool,
    seed: u64,
) -> Result<()> {
    let provider = make_provider(offline, seed);
    let confirm_interval = confirm_interval.unwrap_or_else(|| interval.confirmation());

    let primary = provider
        .fetch(symbol, interval, limit)
        .with_context(|| format!("fetching {symbol} {interval}"))?;
    let confirm = provider
        .fetch(symbol, confirm_interval, limit)
        .with_context(|| format!("fetching {symbol} {confirm_interval}"))?;

    // No sentiment provider is wired in; technicals carry the signal.
    let sentiment = NewsSentiment::neutral_default();
    let report = analyze_series(&primary, &confirm, &sentiment)
        .with_context(|| format!("analyzing {symbol}"))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_backtest_cmd(
    symbol: &str,
    interval: Interval,
    lookback: usize,
    json: bool,
    offline: bool,
    seed: u64,
) -> Result<()> {
    let provider = make_provider(offline, seed);
    let candles = provider
        .fetch(symbol, interval, lookback)
        .with_context(|| format!("fetching {symbol} {interval}"))?;

    let stats = run_backtest(&candles, lookback)
        .with_context(|| format!("backtesting {symbol}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let span = candles
        .first()
        .and_then(|c| c.open_datetime())
        .zip(candles.last().and_then(|c| c.open_datetime()));
    match span {
        Some((start, end)) => println!(
            "{symbol} {interval} — {} bars replayed, {} to {} UTC",
            candles.len(),
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M"),
        ),
        None => println!("{symbol} {interval} — {} bars replayed", candles.len()),
    }
    println!("trades:   {}", stats.trade_count());
    println!(
        "wins:     {} | losses: {} | draws: {}",
        stats.wins, stats.losses, stats.draws
    );
    println!("win rate: {:.1}%", stats.win_rate * 100.0);
    println!("avg PnL:  {:.4}", stats.avg_pnl);
    println!("total PnL: {:.4}", stats.total_pnl);
    Ok(())
}

/// One scan row: single-timeframe signal, neutral sentiment.
struct ScanRow {
    symbol: String,
    direction: Direction,
    strength: i32,
    score: i32,
}

fn run_scan(
    symbols: &[String],
    interval: Interval,
    limit: usize,
    top: usize,
    offline: bool,
    seed: u64,
) -> Result<()> {
    let provider = make_provider(offline, seed);
    let sentiment = NewsSentiment::neutral_default();

    // Symbols that fail to fetch or have too little history are skipped,
    // not fatal; a scan is best-effort across the whole list.
    let mut rows: Vec<ScanRow> = symbols
        .par_iter()
        .filter_map(|symbol| {
            let candles = provider.fetch(symbol, interval, limit).ok()?;
            if candles.len() < MIN_BARS {
                return None;
            }
            let inputs = siglab_core::domain::SeriesInputs::from_candles(&candles);
            let snapshot = siglab_core::compute_indicators(&inputs);
            let ta = siglab_core::score_indicators(&snapshot);
            let signal = build_signal(&SignalInputs {
                snapshot: &snapshot,
                primary: &ta,
                confirm: &ta,
                combined_score: ta.score,
                sentiment: &sentiment,
            });
            Some(ScanRow {
                symbol: symbol.clone(),
                direction: signal.direction,
                strength: signal.strength,
                score: ta.score,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.strength.cmp(&a.strength));

    println!("scanned {} of {} symbols\n", rows.len(), symbols.len());
    print_ranked("top longs", &rows, Direction::Long, top);
    print_ranked("top shorts", &rows, Direction::Short, top);
    Ok(())
}

fn print_ranked(header: &str, rows: &[ScanRow], direction: Direction, top: usize) {
    println!("{header}:");
    let picked: Vec<&ScanRow> = rows
        .iter()
        .filter(|r| r.direction == direction)
        .take(top)
        .collect();
    if picked.is_empty() {
        println!("  (none)");
    }
    for row in picked {
        println!(
            "  {:<12} strength {:>3}  score {:>4}",
            row.symbol, row.strength, row.score
        );
    }
    println!();
}
