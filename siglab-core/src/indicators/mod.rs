//! Concrete indicator implementations.
//!
//! Every indicator is a pure function from f64 slices to a `Vec<f64>` of
//! the same length, with `f64::NAN` filling the warmup region before the
//! lookback is satisfied. The snapshot layer (`snapshot.rs`) reads only the
//! final value of each series and maps non-finite values to absent fields,
//! so NaN never leaks past this module.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod snapshot;
pub mod stoch;

pub use adx::adx;
pub use atr::{atr, true_range, wilder_smooth};
pub use bollinger::{bollinger, BollingerSeries};
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use mfi::mfi;
pub use obv::obv;
pub use rsi::rsi;
pub use sma::sma;
pub use snapshot::{
    compute_indicators, BollingerValue, IndicatorSnapshot, MacdValue, StochValue,
};
pub use stoch::{stochastic, StochSeries};

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
