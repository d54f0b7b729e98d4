//! Seeded synthetic candle provider.
//!
//! Generates a deterministic geometric random walk per (symbol, interval),
//! for offline runs and demos. Sub-seeds are derived from the master seed
//! by hashing, so the same configuration always produces the same series
//! no matter what order symbols are fetched in.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::provider::{CandleProvider, ProviderError};
use crate::domain::{Candle, Interval};

/// Fixed series end time so generation never reads the clock.
const ANCHOR_MS: i64 = 1_700_000_000_000;

pub struct SyntheticProvider {
    master_seed: u64,
}

impl SyntheticProvider {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Derive a deterministic sub-seed for a (symbol, interval) pair.
    fn sub_seed(&self, symbol: &str, interval: Interval) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        hasher.update(interval.as_str().as_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }
}

impl CandleProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let mut rng = StdRng::seed_from_u64(self.sub_seed(symbol, interval));
        let span = interval.span_ms();
        let start = ANCHOR_MS - span * limit as i64;

        let mut price: f64 = 100.0 * (1.0 + rng.gen::<f64>() * 9.0);
        let drift = rng.gen_range(-0.0005..0.0015);
        let volatility = rng.gen_range(0.005..0.02);

        let mut candles = Vec::with_capacity(limit);
        for i in 0..limit {
            let open = price;
            let ret = drift + volatility * rng.gen_range(-1.0..1.0);
            let close = (open * (1.0 + ret)).max(0.01);
            let wick = volatility * rng.gen_range(0.0..0.5);
            let high = open.max(close) * (1.0 + wick);
            let low = (open.min(close) * (1.0 - wick)).max(0.01);
            let volume = 1000.0 * (1.0 + rng.gen::<f64>() * 4.0);
            let open_time = start + span * i as i64;

            candles.push(Candle {
                open_time,
                open,
                high,
                low,
                close,
                volume,
                close_time: open_time + span - 1,
            });
            price = close;
        }
        Ok(candles)
    }
}
