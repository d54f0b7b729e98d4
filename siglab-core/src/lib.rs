//! SigLab Core — quantitative signal synthesis over OHLCV candle series.
//!
//! This crate contains the whole signal pipeline:
//! - Domain types (candles, intervals, sentiment, signal outputs)
//! - Indicator engine (RSI, EMA, SMA, MACD, Stochastic, ADX, ATR,
//!   Bollinger, OBV, MFI) producing a per-series snapshot
//! - Heuristic scorer fusing the snapshot into a bounded score
//! - Multi-timeframe combiner reconciling primary and confirmation scores
//! - Deterministic gate-based signal builder
//! - Walk-forward backtester replaying the same scoring bar by bar
//! - Candle providers (Binance, Coinbase, CryptoCompare, fallback chain,
//!   seeded synthetic)
//!
//! Everything from indicators through backtest is pure and deterministic:
//! no I/O, no clock, no shared mutable state. Fetching lives behind the
//! provider traits in `data`.

pub mod backtest;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod mtf;
pub mod pipeline;
pub mod scoring;
pub mod signal_builder;

pub use backtest::{run_backtest, BacktestStats, SimulatedTrade};
pub use error::{SignalError, MIN_BARS};
pub use indicators::{compute_indicators, IndicatorSnapshot};
pub use mtf::combine_timeframes;
pub use pipeline::{analyze_series, SignalReport};
pub use scoring::score_indicators;
pub use signal_builder::{build_signal, SignalInputs};
