//! Indicator snapshot — the last value of every indicator over a series.
//!
//! Every field is optional: absent means the series was too short for that
//! indicator's lookback (or volumes were not supplied), never a reading of
//! zero. Present fields are always finite — non-finite values are mapped
//! to absent here so NaN cannot leak to the scorer or signal builder.

use serde::{Deserialize, Serialize};

use crate::domain::SeriesInputs;
use crate::indicators::{adx, atr, bollinger, ema, macd, mfi, obv, rsi, sma, stochastic};

/// Last MACD(12,26,9) reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Last Stochastic(14,3) reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochValue {
    pub k: f64,
    pub d: f64,
}

/// Last Bollinger(20, 2σ) reading with derived width measures.
///
/// `percent_b` is deliberately unclamped: it exceeds [0, 1] whenever price
/// closes outside the bands, and the scorer relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerValue {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
    pub bandwidth: f64,
    pub percent_b: f64,
}

/// Snapshot of the most recent value of each indicator over one series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi14: Option<f64>,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    pub macd: Option<MacdValue>,
    pub stoch: Option<StochValue>,
    pub adx14: Option<f64>,
    pub atr14: Option<f64>,
    pub bb20: Option<BollingerValue>,
    pub obv: Option<f64>,
    pub sma200: Option<f64>,
    pub mfi14: Option<f64>,
    pub volume: Option<f64>,
    pub vol_sma20: Option<f64>,
    pub obv_sma21: Option<f64>,
}

/// Last element of a series, mapped to None when missing or non-finite.
fn last_finite(series: &[f64]) -> Option<f64> {
    series.last().copied().filter(|v| v.is_finite())
}

/// Compute the full indicator snapshot for one series.
///
/// Closes drive the price indicators; highs/lows are required for the
/// directional and volatility indicators; volumes are optional and gate
/// OBV, MFI, and the volume SMA.
pub fn compute_indicators(inputs: &SeriesInputs) -> IndicatorSnapshot {
    let closes = &inputs.closes;
    let highs = &inputs.highs;
    let lows = &inputs.lows;

    let mut snapshot = IndicatorSnapshot {
        rsi14: last_finite(&rsi(closes, 14)),
        ema20: last_finite(&ema(closes, 20)),
        ema50: last_finite(&ema(closes, 50)),
        sma200: last_finite(&sma(closes, 200)),
        adx14: last_finite(&adx(highs, lows, closes, 14)),
        atr14: last_finite(&atr(highs, lows, closes, 14)),
        ..Default::default()
    };

    let macd_series = macd(closes, 12, 26, 9);
    if let (Some(m), Some(s), Some(h)) = (
        last_finite(&macd_series.macd),
        last_finite(&macd_series.signal),
        last_finite(&macd_series.histogram),
    ) {
        snapshot.macd = Some(MacdValue {
            macd: m,
            signal: s,
            histogram: h,
        });
    }

    let stoch_series = stochastic(highs, lows, closes, 14, 3);
    if let (Some(k), Some(d)) = (
        last_finite(&stoch_series.k),
        last_finite(&stoch_series.d),
    ) {
        snapshot.stoch = Some(StochValue { k, d });
    }

    let bands = bollinger(closes, 20, 2.0);
    if let (Some(middle), Some(upper), Some(lower), Some(&last_close)) = (
        last_finite(&bands.middle),
        last_finite(&bands.upper),
        last_finite(&bands.lower),
        closes.last(),
    ) {
        // Division guards: a zero-width band or zero middle substitutes 1
        // rather than producing inf/NaN.
        let mid_ref = if middle == 0.0 { 1.0 } else { middle };
        let width = upper - lower;
        let width_ref = if width == 0.0 { 1.0 } else { width };
        let bb = BollingerValue {
            middle,
            upper,
            lower,
            bandwidth: width / mid_ref,
            percent_b: (last_close - lower) / width_ref,
        };
        if bb.bandwidth.is_finite() && bb.percent_b.is_finite() {
            snapshot.bb20 = Some(bb);
        }
    }

    if let Some(volumes) = &inputs.volumes {
        let obv_series = obv(closes, volumes);
        snapshot.obv = last_finite(&obv_series);
        snapshot.obv_sma21 = last_finite(&sma(&obv_series, 21));
        snapshot.mfi14 = last_finite(&mfi(highs, lows, closes, volumes, 14));
        snapshot.vol_sma20 = last_finite(&sma(volumes, 20));
        snapshot.volume = last_finite(volumes);
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trending series long enough for everything except SMA200.
    fn trending_inputs(n: usize) -> SeriesInputs {
        let closes: Vec<f64> = (0..n)
            .map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.9).sin() * 2.0)
            .collect();
        let highs: Vec<f64> = closes.iter().map(|c| c + 1.5).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 1.5).collect();
        let volumes: Vec<f64> = (0..n).map(|i| 1000.0 + (i % 7) as f64 * 50.0).collect();
        SeriesInputs {
            closes,
            highs,
            lows,
            volumes: Some(volumes),
        }
    }

    #[test]
    fn snapshot_all_fields_present_with_enough_data() {
        let snapshot = compute_indicators(&trending_inputs(250));
        assert!(snapshot.rsi14.is_some());
        assert!(snapshot.ema20.is_some());
        assert!(snapshot.ema50.is_some());
        assert!(snapshot.macd.is_some());
        assert!(snapshot.stoch.is_some());
        assert!(snapshot.adx14.is_some());
        assert!(snapshot.atr14.is_some());
        assert!(snapshot.bb20.is_some());
        assert!(snapshot.obv.is_some());
        assert!(snapshot.sma200.is_some());
        assert!(snapshot.mfi14.is_some());
        assert!(snapshot.volume.is_some());
        assert!(snapshot.vol_sma20.is_some());
        assert!(snapshot.obv_sma21.is_some());
    }

    #[test]
    fn snapshot_short_series_omits_long_lookbacks() {
        let snapshot = compute_indicators(&trending_inputs(80));
        // 80 bars: RSI/EMA/MACD/Stoch/ATR resolve, SMA200 cannot.
        assert!(snapshot.rsi14.is_some());
        assert!(snapshot.macd.is_some());
        assert!(snapshot.sma200.is_none());
    }

    #[test]
    fn snapshot_without_volumes_omits_volume_indicators() {
        let inputs = trending_inputs(250).without_volumes();
        let snapshot = compute_indicators(&inputs);
        assert!(snapshot.obv.is_none());
        assert!(snapshot.obv_sma21.is_none());
        assert!(snapshot.mfi14.is_none());
        assert!(snapshot.volume.is_none());
        assert!(snapshot.vol_sma20.is_none());
        // Price indicators unaffected
        assert!(snapshot.rsi14.is_some());
    }

    #[test]
    fn snapshot_tiny_series_is_all_absent() {
        let inputs = SeriesInputs {
            closes: vec![100.0, 101.0, 102.0],
            highs: vec![101.0, 102.0, 103.0],
            lows: vec![99.0, 100.0, 101.0],
            volumes: None,
        };
        let snapshot = compute_indicators(&inputs);
        assert_eq!(snapshot, IndicatorSnapshot::default());
    }

    #[test]
    fn snapshot_never_contains_non_finite() {
        let snapshot = compute_indicators(&trending_inputs(250));
        for v in [
            snapshot.rsi14,
            snapshot.ema20,
            snapshot.ema50,
            snapshot.adx14,
            snapshot.atr14,
            snapshot.obv,
            snapshot.sma200,
            snapshot.mfi14,
            snapshot.volume,
            snapshot.vol_sma20,
            snapshot.obv_sma21,
        ]
        .into_iter()
        .flatten()
        {
            assert!(v.is_finite());
        }
        let macd = snapshot.macd.unwrap();
        assert!(macd.macd.is_finite() && macd.signal.is_finite() && macd.histogram.is_finite());
        let bb = snapshot.bb20.unwrap();
        assert!(bb.bandwidth.is_finite() && bb.percent_b.is_finite());
    }

    #[test]
    fn percent_b_unclamped_outside_bands() {
        // Long flat stretch then a violent breakout close above the band.
        let mut closes = vec![100.0; 30];
        closes.push(140.0);
        let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
        let inputs = SeriesInputs {
            closes,
            highs,
            lows,
            volumes: None,
        };
        let snapshot = compute_indicators(&inputs);
        let bb = snapshot.bb20.expect("bollinger should resolve");
        assert!(bb.percent_b > 1.0, "breakout close must exceed %B of 1");
    }

    #[test]
    fn flat_series_zero_width_band_guard() {
        let closes = vec![100.0; 40];
        let inputs = SeriesInputs {
            closes: closes.clone(),
            highs: closes.clone(),
            lows: closes.clone(),
            volumes: None,
        };
        let snapshot = compute_indicators(&inputs);
        let bb = snapshot.bb20.expect("bollinger should resolve");
        // Zero-width band: denominator substituted with 1, not a NaN leak
        assert!(bb.bandwidth.is_finite());
        assert!(bb.percent_b.is_finite());
        assert_eq!(bb.percent_b, 0.0);
    }
}
