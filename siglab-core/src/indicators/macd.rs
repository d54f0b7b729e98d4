//! MACD — Moving Average Convergence/Divergence.
//!
//! macd = EMA(fast) - EMA(slow)
//! signal = EMA(signal_period) of the macd line
//! histogram = macd - signal
//! Lookback: slow + signal_period - 2 for a full triple.

use crate::indicators::ema::ema;

/// The three MACD series, all the same length as the input with NaN warmup.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Compute MACD(fast, slow, signal_period) over a slice.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let n = values.len();
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);

    let mut macd_line = vec![f64::NAN; n];
    for i in 0..n {
        if !fast_ema[i].is_nan() && !slow_ema[i].is_nan() {
            macd_line[i] = fast_ema[i] - slow_ema[i];
        }
    }

    // The signal EMA is seeded from the first defined stretch of the macd
    // line, so strip the warmup prefix before smoothing.
    let first_defined = macd_line.iter().position(|v| !v.is_nan());
    let mut signal_line = vec![f64::NAN; n];
    if let Some(start) = first_defined {
        let smoothed = ema(&macd_line[start..], signal_period);
        signal_line[start..].copy_from_slice(&smoothed);
    }

    let mut histogram = vec![f64::NAN; n];
    for i in 0..n {
        if !macd_line[i].is_nan() && !signal_line[i].is_nan() {
            histogram[i] = macd_line[i] - signal_line[i];
        }
    }

    MacdSeries {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}
