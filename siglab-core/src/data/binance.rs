//! Binance kline provider.
//!
//! Fetches candles from the public spot klines endpoint. Binance is the
//! primary source; regional blocks (HTTP 451) are common, which is why the
//! fallback chain exists.

use std::time::Duration;

use serde_json::Value;

use crate::data::provider::{CandleProvider, ProviderError};
use crate::domain::{normalize_candles, Candle, Interval};

const BASE_URL: &str = "https://api.binance.com/api/v3/klines";
const MIN_LIMIT: usize = 10;
const MAX_LIMIT: usize = 1000;

pub struct BinanceProvider {
    client: reqwest::blocking::Client,
}

impl BinanceProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    /// Parse one kline row.
    ///
    /// Rows are heterogeneous arrays: open time and close time are numbers,
    /// prices and volume are decimal strings.
    fn parse_row(row: &[Value]) -> Result<Candle, ProviderError> {
        if row.len() < 7 {
            return Err(ProviderError::ResponseFormatChanged(format!(
                "kline row has {} fields, expected at least 7",
                row.len()
            )));
        }
        Ok(Candle {
            open_time: field_i64(&row[0])?,
            open: field_f64(&row[1])?,
            high: field_f64(&row[2])?,
            low: field_f64(&row[3])?,
            close: field_f64(&row[4])?,
            volume: field_f64(&row[5])?,
            close_time: field_i64(&row[6])?,
        })
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn field_i64(value: &Value) -> Result<i64, ProviderError> {
    value
        .as_i64()
        .ok_or_else(|| ProviderError::ResponseFormatChanged(format!("expected integer, got {value}")))
}

fn field_f64(value: &Value) -> Result<f64, ProviderError> {
    match value {
        Value::String(s) => s.parse::<f64>().map_err(|_| {
            ProviderError::ResponseFormatChanged(format!("unparseable decimal string '{s}'"))
        }),
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            ProviderError::ResponseFormatChanged(format!("non-finite number {n}"))
        }),
        other => Err(ProviderError::ResponseFormatChanged(format!(
            "expected decimal, got {other}"
        ))),
    }
}

impl CandleProvider for BinanceProvider {
    fn name(&self) -> &str {
        "binance"
    }

    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);
        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("symbol", symbol.to_uppercase().as_str()),
                ("interval", interval.as_str()),
                ("limit", limit.to_string().as_str()),
            ])
            .send()
            .map_err(|e| ProviderError::NetworkUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                provider: self.name().to_string(),
                status: status.as_u16(),
            });
        }

        let rows: Vec<Vec<Value>> = response
            .json()
            .map_err(|e| ProviderError::ResponseFormatChanged(e.to_string()))?;
        let candles = rows
            .iter()
            .map(|row| Self::parse_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(normalize_candles(candles))
    }
}
