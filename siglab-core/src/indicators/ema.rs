//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * values[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (period + 1).
//! Seed: EMA[period-1] = SMA of the first `period` values.
//! Lookback: period - 1.

/// Compute the EMA series over a slice. The first `period - 1` entries are NaN.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of first `period` values
    let mut sum = 0.0;
    for &v in values.iter().take(period) {
        if v.is_nan() {
            return result; // NaN in seed window → all NaN
        }
        sum += v;
    }
    let seed = sum / period as f64;
    result[period - 1] = seed;

    // Recursive EMA
    let mut prev = seed;
    for i in period..n {
        if values[i].is_nan() {
            // NaN propagates: once seen, subsequent values are tainted
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }
        let v = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = v;
        prev = v;
    }

    result
}
