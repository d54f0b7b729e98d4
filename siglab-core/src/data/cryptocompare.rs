//! CryptoCompare candle provider.
//!
//! Last tier of the fallback chain. The histo endpoints aggregate minutes,
//! hours, or days; intervals without an exact mapping fall back to hourly
//! data. An API key is optional and read from `CRYPTOCOMPARE_API_KEY`.

use std::time::Duration;

use serde::Deserialize;

use crate::data::provider::{parse_symbol, CandleProvider, ProviderError};
use crate::domain::{normalize_candles, Candle, Interval};

const MIN_LIMIT: usize = 10;
const MAX_LIMIT: usize = 2000;

#[derive(Debug, Deserialize)]
struct HistoResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "Data")]
    data: Option<HistoData>,
}

#[derive(Debug, Deserialize)]
struct HistoData {
    #[serde(rename = "Data")]
    data: Vec<HistoBar>,
}

#[derive(Debug, Deserialize)]
struct HistoBar {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volumefrom: f64,
}

pub struct CryptoCompareProvider {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
}

impl CryptoCompareProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            api_key: std::env::var("CRYPTOCOMPARE_API_KEY").ok(),
        }
    }

    /// Histo endpoint path and aggregation factor for an interval.
    fn endpoint(interval: Interval) -> (&'static str, u32) {
        match interval {
            Interval::Min15 => ("histominute", 15),
            Interval::Hour1 => ("histohour", 1),
            Interval::Hour4 => ("histohour", 4),
            Interval::Day1 => ("histoday", 1),
            _ => ("histohour", 1),
        }
    }
}

impl Default for CryptoCompareProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleProvider for CryptoCompareProvider {
    fn name(&self) -> &str {
        "cryptocompare"
    }

    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let (base, quote) = parse_symbol(symbol);
        let quote = if quote == "USDT" { "USD".to_string() } else { quote };
        let (path, aggregate) = Self::endpoint(interval);
        let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
        let url = format!("https://min-api.cryptocompare.com/data/v2/{path}");

        let mut request = self
            .client
            .get(&url)
            .query(&[
                ("fsym", base.as_str()),
                ("tsym", quote.as_str()),
                ("limit", limit.to_string().as_str()),
                ("aggregate", aggregate.to_string().as_str()),
            ])
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Apikey {key}"));
        }

        let response = request
            .send()
            .map_err(|e| ProviderError::NetworkUnreachable(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                provider: self.name().to_string(),
                status: status.as_u16(),
            });
        }

        let body: HistoResponse = response
            .json()
            .map_err(|e| ProviderError::ResponseFormatChanged(e.to_string()))?;
        if body.response != "Success" {
            return Err(ProviderError::ResponseFormatChanged(
                body.message.unwrap_or_else(|| "unspecified error".to_string()),
            ));
        }
        let bars = body
            .data
            .ok_or_else(|| ProviderError::ResponseFormatChanged("missing Data".to_string()))?
            .data;

        let candles = bars
            .into_iter()
            .map(|b| Candle {
                open_time: b.time * 1000,
                open: b.open,
                high: b.high,
                low: b.low,
                close: b.close,
                volume: b.volumefrom,
                close_time: b.time * 1000,
            })
            .collect();
        Ok(normalize_candles(candles))
    }
}
