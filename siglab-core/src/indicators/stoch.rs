//! Stochastic oscillator.
//!
//! %K = 100 * (close - lowest_low(period)) / (highest_high(period) - lowest_low(period))
//! %D = SMA(smooth) of %K
//! Flat window (highest == lowest) → %K = 50.
//! Lookback: period - 1 for %K, period + smooth - 2 for %D.

use crate::indicators::sma::sma;

/// The %K and %D series, same length as the input with NaN warmup.
#[derive(Debug, Clone)]
pub struct StochSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

/// Compute Stochastic(period, smooth) over parallel high/low/close slices.
pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    smooth: usize,
) -> StochSeries {
    let n = closes.len().min(highs.len()).min(lows.len());
    let mut k = vec![f64::NAN; n];

    if period == 0 || n < period {
        return StochSeries {
            d: vec![f64::NAN; n],
            k,
        };
    }

    for i in (period - 1)..n {
        let start = i + 1 - period;
        let window_high = highs[start..=i].iter().cloned().fold(f64::NAN, f64::max);
        let window_low = lows[start..=i].iter().cloned().fold(f64::NAN, f64::min);

        if window_high.is_nan() || window_low.is_nan() || closes[i].is_nan() {
            continue;
        }

        let range = window_high - window_low;
        k[i] = if range == 0.0 {
            50.0
        } else {
            100.0 * (closes[i] - window_low) / range
        };
    }

    let d = sma(&k, smooth);
    StochSeries { k, d }
}
