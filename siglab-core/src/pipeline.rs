//! Live pipeline orchestration.
//!
//! `analyze_series` runs the whole signal path over two in-memory candle
//! series: indicators, heuristic scores, the timeframe combiner, the
//! deterministic builder, and ATR-based price levels off the last close.
//! It is a pure function; fetching candles and sentiment is the caller's
//! job, and a missing sentiment provider is represented by
//! `NewsSentiment::neutral_default()`.

use serde::Serialize;

use crate::domain::{Candle, DeterministicSignal, Direction, NewsSentiment, SeriesInputs, TaRecommendation};
use crate::error::{SignalError, MIN_BARS};
use crate::indicators::{compute_indicators, IndicatorSnapshot};
use crate::mtf::combine_timeframes;
use crate::scoring::score_indicators;
use crate::signal_builder::{build_signal, SignalInputs};

/// Everything one signal computation produces, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalReport {
    pub snapshot: IndicatorSnapshot,
    pub ta_primary: TaRecommendation,
    pub ta_confirm: TaRecommendation,
    pub combined_score: i32,
    pub signal: DeterministicSignal,
    pub last_close: f64,
    /// Stop-loss price level; absent for neutral signals.
    pub stop_loss: Option<f64>,
    /// Take-profit price level; absent for neutral signals.
    pub take_profit: Option<f64>,
}

fn validate(candles: &[Candle], label: &str) -> Result<(), SignalError> {
    if candles.iter().any(|c| c.is_void()) {
        return Err(SignalError::InvalidInput(format!(
            "{label} series contains non-finite values"
        )));
    }
    Ok(())
}

/// Run the full pipeline over a primary series and its higher-timeframe
/// confirmation series.
///
/// The primary series must have at least 60 candles; the confirmation
/// series is scored best-effort (too short means fewer resolved indicators
/// and a weaker confirmation score, not an error). Price levels are derived
/// from the last primary close and ATR(14) using the signal's own risk
/// multiples, and are absent for neutral signals.
pub fn analyze_series(
    primary: &[Candle],
    confirm: &[Candle],
    sentiment: &NewsSentiment,
) -> Result<SignalReport, SignalError> {
    if primary.is_empty() {
        return Err(SignalError::InvalidInput("empty candle series".into()));
    }
    validate(primary, "primary")?;
    validate(confirm, "confirmation")?;
    if primary.len() < MIN_BARS {
        return Err(SignalError::insufficient(primary.len()));
    }

    let primary_inputs = SeriesInputs::from_candles(primary);
    let snapshot = compute_indicators(&primary_inputs);
    let ta_primary = score_indicators(&snapshot);

    let ta_confirm = if confirm.is_empty() {
        TaRecommendation::neutral()
    } else {
        let confirm_inputs = SeriesInputs::from_candles(confirm);
        score_indicators(&compute_indicators(&confirm_inputs))
    };

    let combined_score = combine_timeframes(ta_primary.score, ta_confirm.score);
    let signal = build_signal(&SignalInputs {
        snapshot: &snapshot,
        primary: &ta_primary,
        confirm: &ta_confirm,
        combined_score,
        sentiment,
    });

    // closes are non-empty and finite past validation
    let last_close = primary_inputs.closes[primary_inputs.closes.len() - 1];
    let atr = snapshot.atr14.unwrap_or(0.0);
    let (stop_loss, take_profit) = match signal.direction {
        Direction::Long => (
            Some(last_close - signal.stop_multiple * atr),
            Some(last_close + signal.target_multiple * atr),
        ),
        Direction::Short => (
            Some(last_close + signal.stop_multiple * atr),
            Some(last_close - signal.target_multiple * atr),
        ),
        Direction::Neutral => (None, None),
    };

    Ok(SignalReport {
        snapshot,
        ta_primary,
        ta_confirm,
        combined_score,
        signal,
        last_close,
        stop_loss,
        take_profit,
    })
}
