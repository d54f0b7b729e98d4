//! Deterministic signal builder.
//!
//! Turns the scored snapshot into a tradeable decision: five boolean gates
//! per side, a combined-score threshold, an entry-style hint from %B, risk
//! multiples keyed on the ADX regime, and a strength blend of technicals,
//! gate agreement, and news sentiment. News only ever gates strength down;
//! it never flips a direction.
//!
//! The builder is total: any well-formed snapshot produces a signal,
//! defaulting to neutral at strength 50 under ambiguity.

use crate::domain::{
    DeterministicSignal, Direction, EntryHint, NewsSentiment, SentimentLabel, TaRecommendation,
};
use crate::indicators::IndicatorSnapshot;

/// Gate count (out of 5) required to declare a direction.
const GATE_THRESHOLD: usize = 4;
/// Combined score magnitude required alongside the gates.
const SCORE_THRESHOLD: i32 = 15;
/// Confirmation-timeframe score magnitude that counts as agreement.
const CONFIRM_THRESHOLD: i32 = 10;
/// Opposing news at or above this confidence cuts strength.
const NEWS_VETO_CONFIDENCE: f64 = 0.6;

/// Inputs to `build_signal`, bundled to keep the call site readable.
#[derive(Debug, Clone, Copy)]
pub struct SignalInputs<'a> {
    pub snapshot: &'a IndicatorSnapshot,
    pub primary: &'a TaRecommendation,
    pub confirm: &'a TaRecommendation,
    pub combined_score: i32,
    pub sentiment: &'a NewsSentiment,
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Strength blend: 50% technical magnitude, 35% gate agreement, 15% news.
fn base_strength(
    combined_score: i32,
    gates_fraction: f64,
    sentiment: &NewsSentiment,
    direction: Direction,
) -> i32 {
    let ta_mag = clamp01(combined_score.abs() as f64 / 50.0);
    let dir_sign = direction.sign();
    let news_sign = sentiment.overall.sign();
    let news_align = if dir_sign != 0.0 {
        if dir_sign == news_sign {
            1.0
        } else if news_sign == 0.0 {
            0.3
        } else {
            -1.0
        }
    } else {
        0.0
    };
    let news_component = sentiment.confidence * news_align;
    let blended = 0.5 * ta_mag + 0.35 * gates_fraction + 0.15 * (0.5 + 0.5 * news_component);
    (100.0 * clamp01(blended)).round() as i32
}

/// Build the deterministic signal from snapshot, scores, and sentiment.
pub fn build_signal(inputs: &SignalInputs) -> DeterministicSignal {
    let snapshot = inputs.snapshot;
    let confirm = inputs.confirm;
    let combined = inputs.combined_score;
    let sentiment = inputs.sentiment;

    // Gate readings. Absent fields default the same way the gates read an
    // empty chart: no EMA cross, ADX 0, flat histogram, equal stochastics.
    let ema_bull = matches!(
        (snapshot.ema20, snapshot.ema50),
        (Some(e20), Some(e50)) if e20 > e50
    );
    let ema_bear = matches!(
        (snapshot.ema20, snapshot.ema50),
        (Some(e20), Some(e50)) if e20 < e50
    );
    let adx = snapshot.adx14.unwrap_or(0.0);
    let adx_strong = adx >= 25.0;
    let histogram = snapshot.macd.map_or(0.0, |m| m.histogram);
    let stoch_k = snapshot.stoch.map_or(0.0, |s| s.k);
    let stoch_d = snapshot.stoch.map_or(0.0, |s| s.d);
    let mtf_bull = confirm.score > CONFIRM_THRESHOLD;
    let mtf_bear = confirm.score < -CONFIRM_THRESHOLD;

    let long_gates = [
        ema_bull,
        adx_strong,
        histogram > 0.0,
        stoch_k > stoch_d,
        mtf_bull,
    ];
    let short_gates = [
        ema_bear,
        adx_strong,
        histogram < 0.0,
        stoch_k < stoch_d,
        mtf_bear,
    ];
    let long_hits = long_gates.iter().filter(|g| **g).count();
    let short_hits = short_gates.iter().filter(|g| **g).count();
    let long_fraction = long_hits as f64 / long_gates.len() as f64;
    let short_fraction = short_hits as f64 / short_gates.len() as f64;

    // Direction needs both the gate count and the combined-score threshold.
    let direction = if long_hits >= GATE_THRESHOLD && combined > SCORE_THRESHOLD {
        Direction::Long
    } else if short_hits >= GATE_THRESHOLD && combined < -SCORE_THRESHOLD {
        Direction::Short
    } else {
        Direction::Neutral
    };

    let mut rationale: Vec<String> = Vec::new();
    match direction {
        Direction::Long => {
            rationale.push("EMA20 above EMA50".to_string());
            rationale.push("ADX strong".to_string());
            rationale.push("Momentum up (MACD/Stoch)".to_string());
            if mtf_bull {
                rationale.push("Higher timeframe confirms uptrend".to_string());
            }
        }
        Direction::Short => {
            rationale.push("EMA20 below EMA50".to_string());
            rationale.push("ADX strong".to_string());
            rationale.push("Momentum down (MACD/Stoch)".to_string());
            if mtf_bear {
                rationale.push("Higher timeframe confirms downtrend".to_string());
            }
        }
        Direction::Neutral => {
            rationale.push("Mixed conditions".to_string());
        }
    }

    // Entry hint: enter on a pullback when price sits at the favorable side
    // of the Bollinger channel, otherwise chase the breakout. Missing %B
    // defaults to the breakout branch.
    let percent_b = snapshot.bb20.map(|bb| bb.percent_b);
    let entry_hint = match direction {
        Direction::Long => match percent_b {
            Some(b) if b <= 0.35 => EntryHint::Pullback,
            _ => EntryHint::Breakout,
        },
        Direction::Short => match percent_b {
            Some(b) if b >= 0.65 => EntryHint::Pullback,
            _ => EntryHint::Breakout,
        },
        Direction::Neutral => EntryHint::Either,
    };

    // Risk multiples by trend regime.
    let (stop_multiple, target_multiple) = if adx >= 30.0 {
        (1.7, 3.0)
    } else if adx >= 20.0 {
        (1.5, 2.5)
    } else {
        (1.2, 2.0)
    };

    let gates_fraction = match direction {
        Direction::Long => long_fraction,
        Direction::Short => short_fraction,
        Direction::Neutral => 0.0,
    };
    let mut strength = match direction {
        Direction::Neutral => 50,
        _ => base_strength(combined, gates_fraction, sentiment, direction),
    };

    // News gating: strong opposing news cuts strength sharply, floored at 15.
    let opposing = matches!(
        (direction, sentiment.overall),
        (Direction::Long, SentimentLabel::Bearish) | (Direction::Short, SentimentLabel::Bullish)
    );
    if opposing && sentiment.confidence >= NEWS_VETO_CONFIDENCE {
        strength = ((strength as f64 * 0.6).round() as i32).max(15);
        let note = match direction {
            Direction::Long => "Reduced by bearish news",
            _ => "Reduced by bullish news",
        };
        rationale.push(note.to_string());
    }

    // Position size suggestion, hard-capped at 50% of capital.
    let position_size_pct = clamp01(strength as f64 / 100.0) * 0.5;

    DeterministicSignal {
        direction,
        strength,
        rationale,
        entry_hint,
        stop_multiple,
        target_multiple,
        position_size_pct,
    }
}
