//! Heuristic scorer — maps an indicator snapshot to a bounded score.
//!
//! The score is an additive composition of independent rules, evaluated as
//! a fold over an ordered rule list. Order matters: the ADX trend filter
//! amplifies or dampens whatever score the momentum rules before it have
//! accumulated. Each rule contributes a capped integer delta and, when it
//! fires, a human-readable reason; reasons are appended in firing order.
//!
//! Rules whose snapshot fields are absent skip silently — absence means
//! "insufficient data", never a bearish or bullish reading of zero. An
//! all-absent snapshot therefore scores 0 with no reasons.

use crate::domain::TaRecommendation;
use crate::indicators::IndicatorSnapshot;

const EPSILON: f64 = 1e-6;

/// Running score/reason accumulator threaded through the rule fold.
#[derive(Debug, Default)]
struct ScoreAccumulator {
    score: i32,
    reasons: Vec<String>,
}

impl ScoreAccumulator {
    fn apply(&mut self, delta: i32, reason: &str) {
        self.score += delta;
        self.reasons.push(reason.to_string());
    }

    /// Contribute without a reason (trend-bias rules stay out of the text).
    fn nudge(&mut self, delta: i32) {
        self.score += delta;
    }
}

type Rule = fn(&IndicatorSnapshot, &mut ScoreAccumulator);

/// The scoring pipeline, in evaluation order. The ADX filter must come
/// after the four momentum rules it scales.
const RULES: [Rule; 10] = [
    rule_rsi_extremes,
    rule_ema_spread,
    rule_macd_histogram,
    rule_stoch_delta,
    rule_adx_filter,
    rule_bollinger_extremes,
    rule_long_trend_bias,
    rule_mfi_extremes,
    rule_volume_confirmation,
    rule_obv_trend,
];

/// Score a snapshot. Result is clamped to [-100, 100].
pub fn score_indicators(snapshot: &IndicatorSnapshot) -> TaRecommendation {
    let mut acc = ScoreAccumulator::default();
    for rule in RULES {
        rule(snapshot, &mut acc);
    }
    TaRecommendation {
        score: acc.score.clamp(-100, 100),
        reasons: acc.reasons,
    }
}

fn rule_rsi_extremes(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    if let Some(rsi) = snapshot.rsi14 {
        if rsi < 30.0 {
            acc.apply(20, "RSI oversold (<30)");
        } else if rsi > 70.0 {
            acc.apply(-20, "RSI overbought (>70)");
        }
    }
}

fn rule_ema_spread(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    if let (Some(ema20), Some(ema50)) = (snapshot.ema20, snapshot.ema50) {
        let spread = ema20 - ema50;
        let magnitude = (spread.abs() / (ema50.abs() * 0.01 + EPSILON)).min(1.0);
        let scaled = (10.0 * magnitude).round() as i32;
        if spread > 0.0 {
            acc.apply(10 + scaled, "EMA20 above EMA50 (bullish)"); // 10..20
        } else {
            acc.apply(-(10 + scaled), "EMA20 below EMA50 (bearish)"); // -10..-20
        }
    }
}

fn rule_macd_histogram(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    if let Some(macd) = snapshot.macd {
        let h = macd.histogram;
        let reference = snapshot.ema50.or(snapshot.ema20).map_or(1.0, f64::abs);
        let magnitude = (h.abs() / (reference * 0.002 + EPSILON)).min(1.0);
        let scaled = (5.0 * magnitude).round() as i32;
        if h > 0.0 {
            acc.apply(5 + scaled, "MACD histogram positive");
        } else if h < 0.0 {
            acc.apply(-(5 + scaled), "MACD histogram negative");
        }
    }
}

fn rule_stoch_delta(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    if let Some(stoch) = snapshot.stoch {
        let delta = stoch.k - stoch.d;
        let magnitude = (delta.abs() / 20.0).min(1.0);
        let scaled = (4.0 * magnitude).round() as i32;
        if delta > 0.0 {
            acc.apply(3 + scaled, "Stochastic K above D");
        } else if delta < 0.0 {
            acc.apply(-(3 + scaled), "Stochastic K below D");
        }
    }
}

/// Trend filter: depends on the score accumulated by the rules before it.
/// A strong trend (ADX >= 25) amplifies the running score by 20%, capped at
/// ±10; a dead trend (ADX < 15) claws back 15%, capped at ±8.
fn rule_adx_filter(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    let Some(adx) = snapshot.adx14 else {
        return;
    };
    if acc.score == 0 {
        return;
    }
    if adx >= 25.0 {
        let boost = ((acc.score as f64) * 0.20).round() as i32;
        acc.apply(boost.clamp(-10, 10), "Strong trend (ADX) amplifies signal");
    } else if adx < 15.0 {
        let damp = ((acc.score as f64) * 0.15).round() as i32;
        acc.apply(-damp.clamp(-8, 8), "Weak trend (ADX) dampens signal");
    }
}

fn rule_bollinger_extremes(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    if let Some(bb) = snapshot.bb20 {
        if bb.percent_b > 1.05 {
            acc.apply(-5, "Extended above upper Bollinger band");
        } else if bb.percent_b < -0.05 {
            acc.apply(5, "Extended below lower Bollinger band");
        }
    }
}

/// Long-horizon trend bias. Deliberately silent: it is a nudge, not a
/// headline reason.
fn rule_long_trend_bias(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    if let (Some(ema50), Some(sma200)) = (snapshot.ema50, snapshot.sma200) {
        if ema50 > sma200 {
            acc.nudge(3);
        } else if ema50 < sma200 {
            acc.nudge(-3);
        }
    }
}

fn rule_mfi_extremes(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    if let Some(mfi) = snapshot.mfi14 {
        if mfi > 80.0 {
            acc.apply(-8, "MFI overbought (>80)");
        } else if mfi < 20.0 {
            acc.apply(8, "MFI oversold (<20)");
        }
    }
}

/// Volume confirmation: a volume surge pushes the score in the direction
/// the EMA spread and MACD histogram imply. When the two hints disagree,
/// the EMA direction wins.
fn rule_volume_confirmation(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    let (Some(volume), Some(vol_sma), Some(ema20), Some(ema50), Some(macd)) = (
        snapshot.volume,
        snapshot.vol_sma20,
        snapshot.ema20,
        snapshot.ema50,
        snapshot.macd,
    ) else {
        return;
    };
    if vol_sma <= 0.0 || volume / vol_sma < 1.3 {
        return;
    }

    // The EMA spread sets the direction; the MACD histogram only breaks the
    // tie when the EMAs are exactly equal. A conflicting histogram does not
    // override the spread.
    let direction: i32 = if ema20 != ema50 {
        if ema20 > ema50 {
            1
        } else {
            -1
        }
    } else if macd.histogram > 0.0 {
        1
    } else {
        -1
    };
    if direction > 0 {
        acc.apply(5, "Volume surge confirms bullish move");
    } else {
        acc.apply(-5, "Volume surge confirms bearish move");
    }
}

fn rule_obv_trend(snapshot: &IndicatorSnapshot, acc: &mut ScoreAccumulator) {
    if let (Some(obv), Some(obv_sma)) = (snapshot.obv, snapshot.obv_sma21) {
        if obv > obv_sma {
            acc.apply(4, "OBV above its 21-period average");
        } else if obv < obv_sma {
            acc.apply(-4, "OBV below its 21-period average");
        }
    }
}
