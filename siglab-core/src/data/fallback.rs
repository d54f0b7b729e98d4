//! Prioritized provider chain.
//!
//! Tries each provider in order and returns the first successful fetch.
//! Every failure is recorded so the final error names which provider failed
//! and why, instead of surfacing only the last attempt.

use crate::data::binance::BinanceProvider;
use crate::data::coinbase::CoinbaseProvider;
use crate::data::cryptocompare::CryptoCompareProvider;
use crate::data::provider::{CandleProvider, ProviderError};
use crate::domain::{Candle, Interval};

pub struct FallbackProvider {
    providers: Vec<Box<dyn CandleProvider>>,
}

impl FallbackProvider {
    pub fn new(providers: Vec<Box<dyn CandleProvider>>) -> Self {
        Self { providers }
    }

    /// The standard exchange chain: Binance, then Coinbase, then
    /// CryptoCompare.
    pub fn exchange_chain() -> Self {
        Self::new(vec![
            Box::new(BinanceProvider::new()),
            Box::new(CoinbaseProvider::new()),
            Box::new(CryptoCompareProvider::new()),
        ])
    }
}

impl CandleProvider for FallbackProvider {
    fn name(&self) -> &str {
        "fallback"
    }

    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let mut attempts = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            match provider.fetch(symbol, interval, limit) {
                Ok(candles) if !candles.is_empty() => return Ok(candles),
                Ok(_) => {
                    attempts.push((provider.name().to_string(), "empty series".to_string()));
                }
                Err(e) => attempts.push((provider.name().to_string(), e.to_string())),
            }
        }
        Err(ProviderError::AllProvidersFailed { attempts })
    }
}
