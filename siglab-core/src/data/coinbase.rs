//! Coinbase Exchange candle provider.
//!
//! Second tier of the fallback chain. Coinbase quotes in fiat product pairs
//! (`BTC-USD`), supports only a handful of granularities, and caps a single
//! request at 300 candles. Rows arrive newest-first as
//! `[time, low, high, open, close, volume]` with epoch-second timestamps.

use std::time::Duration;

use crate::data::provider::{parse_symbol, CandleProvider, ProviderError};
use crate::domain::{normalize_candles, Candle, Interval};

const MIN_LIMIT: usize = 10;
const MAX_LIMIT: usize = 300;

pub struct CoinbaseProvider {
    client: reqwest::blocking::Client,
}

impl CoinbaseProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    /// Coinbase product id for an exchange-style pair symbol. USDT pairs
    /// map onto the USD book.
    fn product_id(symbol: &str) -> String {
        let (base, quote) = parse_symbol(symbol);
        let quote = if quote == "USDT" { "USD".to_string() } else { quote };
        format!("{base}-{quote}")
    }

    fn granularity(&self, interval: Interval) -> Result<u32, ProviderError> {
        match interval {
            Interval::Min15 => Ok(900),
            Interval::Hour1 => Ok(3600),
            Interval::Hour4 => Ok(14_400),
            Interval::Day1 => Ok(86_400),
            other => Err(ProviderError::UnsupportedInterval {
                provider: self.name().to_string(),
                interval: other,
            }),
        }
    }
}

impl Default for CoinbaseProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleProvider for CoinbaseProvider {
    fn name(&self) -> &str {
        "coinbase"
    }

    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let granularity = self.granularity(interval)?;
        let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
        let url = format!(
            "https://api.exchange.coinbase.com/products/{}/candles",
            Self::product_id(symbol)
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("granularity", granularity.to_string().as_str()),
                ("limit", limit.to_string().as_str()),
            ])
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ProviderError::NetworkUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                provider: self.name().to_string(),
                status: status.as_u16(),
            });
        }

        let rows: Vec<(i64, f64, f64, f64, f64, f64)> = response
            .json()
            .map_err(|e| ProviderError::ResponseFormatChanged(e.to_string()))?;
        let candles = rows
            .into_iter()
            .map(|(time, low, high, open, close, volume)| Candle {
                open_time: time * 1000,
                open,
                high,
                low,
                close,
                volume,
                close_time: time * 1000,
            })
            .collect();
        Ok(normalize_candles(candles))
    }
}
