//! Simple Moving Average (SMA).
//!
//! SMA[t] = mean(values[t-period+1 ..= t]).
//! Lookback: period - 1.

/// Compute the SMA series over a slice. The first `period - 1` entries are
/// NaN, as is any entry whose window contains a NaN.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < period || period == 0 {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().sum::<f64>() / period as f64;
    }

    result
}
