//! Provider traits and structured error types.
//!
//! The CandleProvider trait abstracts over candle sources (Binance,
//! Coinbase, CryptoCompare, synthetic) so callers can swap implementations
//! and mock for tests. Providers return series already normalized: ascending
//! open time, no duplicate timestamps.

use thiserror::Error;

use crate::domain::{Candle, Interval, NewsSentiment};

/// Structured error types for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("{provider} returned HTTP {status}")]
    HttpStatus { provider: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("{provider} does not support interval {interval}")]
    UnsupportedInterval {
        provider: String,
        interval: Interval,
    },

    #[error("all providers failed: {}", format_attempts(.attempts))]
    AllProvidersFailed { attempts: Vec<(String, String)> },
}

fn format_attempts(attempts: &[(String, String)]) -> String {
    attempts
        .iter()
        .map(|(name, reason)| format!("{name}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Trait for candle providers.
///
/// Implementations handle the specifics of one data source. Fallback
/// chaining sits above this trait; providers don't know about each other.
pub trait CandleProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch up to `limit` of the most recent candles for a symbol.
    ///
    /// Each provider clamps `limit` to its own supported range. The result
    /// is ascending by open time with duplicates removed.
    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError>;
}

/// Trait for news sentiment providers.
///
/// The pipeline never requires one: callers substitute
/// `NewsSentiment::neutral_default()` when no provider is configured or the
/// configured one fails.
pub trait SentimentProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Analyze headlines for a symbol over a timeframe.
    fn analyze(
        &self,
        symbol: &str,
        interval: Interval,
        headlines: &[String],
    ) -> Result<NewsSentiment, ProviderError>;
}

/// Split a trading pair into base and quote assets.
///
/// Recognizes the common quote suffixes; anything unrecognized is treated
/// as a base asset quoted in USD.
pub fn parse_symbol(symbol: &str) -> (String, String) {
    let upper = symbol.to_uppercase();
    for quote in ["USDT", "USDC", "BUSD", "USD", "EUR", "GBP", "JPY", "AUD", "CAD"] {
        if let Some(base) = upper.strip_suffix(quote) {
            if !base.is_empty() {
                return (base.to_string(), quote.to_string());
            }
        }
    }
    (upper, "USD".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_symbol_splits_known_quotes() {
        assert_eq!(
            parse_symbol("BTCUSDT"),
            ("BTC".to_string(), "USDT".to_string())
        );
        assert_eq!(
            parse_symbol("ethusd"),
            ("ETH".to_string(), "USD".to_string())
        );
        assert_eq!(
            parse_symbol("SOLEUR"),
            ("SOL".to_string(), "EUR".to_string())
        );
    }

    #[test]
    fn parse_symbol_defaults_to_usd() {
        assert_eq!(
            parse_symbol("DOGE"),
            ("DOGE".to_string(), "USD".to_string())
        );
    }

    #[test]
    fn parse_symbol_never_leaves_empty_base() {
        // "USDT" alone must not split into ("", "USDT")
        assert_eq!(
            parse_symbol("USDT"),
            ("USDT".to_string(), "USD".to_string())
        );
    }

    #[test]
    fn all_providers_failed_lists_attempts() {
        let err = ProviderError::AllProvidersFailed {
            attempts: vec![
                ("binance".to_string(), "HTTP 451".to_string()),
                ("coinbase".to_string(), "timeout".to_string()),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("binance: HTTP 451"));
        assert!(msg.contains("coinbase: timeout"));
    }
}
