//! Domain types for SigLab.

pub mod candle;
pub mod interval;
pub mod sentiment;
pub mod signal;

pub use candle::{normalize_candles, Candle, SeriesInputs};
pub use interval::Interval;
pub use sentiment::{NewsSentiment, SentimentLabel};
pub use signal::{DeterministicSignal, Direction, EntryHint, TaRecommendation};
