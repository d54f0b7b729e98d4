//! Pipeline-level error taxonomy.
//!
//! Within the core, "indicator not computable" is never an error — the
//! snapshot field is simply absent. Errors only surface at the pipeline
//! boundary: a series too short to analyze at all, or inputs that are not
//! well-formed numbers.

use thiserror::Error;

/// Minimum candle count for a full signal computation or backtest.
///
/// Below this, too few indicators resolve for the score to mean anything,
/// and the pipeline reports it distinctly from other failures.
pub const MIN_BARS: usize = 60;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("insufficient data: need at least {required} candles, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl SignalError {
    pub fn insufficient(got: usize) -> Self {
        SignalError::InsufficientData {
            required: MIN_BARS,
            got,
        }
    }
}
