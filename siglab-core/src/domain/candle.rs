//! Candle — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candlestick for a single symbol and interval.
///
/// Times are milliseconds since the Unix epoch. A series of candles is
/// ordered ascending by `open_time` with no duplicate timestamps, and is
/// never mutated once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub close_time: i64,
}

impl Candle {
    /// Open time as a UTC datetime, for display. None only if the
    /// millisecond timestamp is outside chrono's representable range.
    pub fn open_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.open_time)
    }

    /// Returns true if any OHLCV field is non-finite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite())
    }

    /// Basic OHLCV sanity check: high >= low, high/low bracket open and close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Sort a candle series ascending by open time and drop duplicate timestamps.
///
/// Providers call this before handing a series to the core, so downstream
/// code can assume the ordering invariant.
pub fn normalize_candles(mut candles: Vec<Candle>) -> Vec<Candle> {
    candles.sort_by_key(|c| c.open_time);
    candles.dedup_by_key(|c| c.open_time);
    candles
}

/// Parallel numeric arrays extracted from a candle series.
///
/// This is the shape the indicator engine consumes. Volumes are optional:
/// volume-dependent indicators (OBV, MFI, volume SMA) are simply absent
/// from the snapshot when no volume data is supplied.
#[derive(Debug, Clone)]
pub struct SeriesInputs {
    pub closes: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub volumes: Option<Vec<f64>>,
}

impl SeriesInputs {
    pub fn from_candles(candles: &[Candle]) -> Self {
        Self {
            closes: candles.iter().map(|c| c.close).collect(),
            highs: candles.iter().map(|c| c.high).collect(),
            lows: candles.iter().map(|c| c.low).collect(),
            volumes: Some(candles.iter().map(|c| c.volume).collect()),
        }
    }

    /// Drop the volume column, e.g. for providers that do not report it.
    pub fn without_volumes(mut self) -> Self {
        self.volumes = None;
        self
    }

    /// Prefix of the series covering the first `len` bars.
    ///
    /// The walk-forward backtester uses this to score each bar with only
    /// the history available at that bar.
    pub fn head(&self, len: usize) -> SeriesInputs {
        let take = len.min(self.len());
        Self {
            closes: self.closes[..take].to_vec(),
            highs: self.highs[..take.min(self.highs.len())].to_vec(),
            lows: self.lows[..take.min(self.lows.len())].to_vec(),
            volumes: self
                .volumes
                .as_ref()
                .map(|v| v[..take.min(v.len())].to_vec()),
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle() -> Candle {
        Candle {
            open_time: 1_700_000_000_000,
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            volume: 50_000.0,
            close_time: 1_700_000_899_999,
        }
    }

    #[test]
    fn candle_is_sane() {
        assert!(sample_candle().is_sane());
    }

    #[test]
    fn open_datetime_is_utc() {
        let candle = sample_candle();
        let dt = candle.open_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn candle_detects_void() {
        let mut candle = sample_candle();
        candle.open = f64::NAN;
        assert!(candle.is_void());
        assert!(!candle.is_sane());
    }

    #[test]
    fn candle_detects_insane_high_low() {
        let mut candle = sample_candle();
        candle.high = 97.0; // below low
        assert!(!candle.is_sane());
    }

    #[test]
    fn normalize_sorts_and_dedups() {
        let mut a = sample_candle();
        let mut b = sample_candle();
        let mut c = sample_candle();
        a.open_time = 2;
        b.open_time = 1;
        c.open_time = 2;
        c.close = 999.0;

        let normalized = normalize_candles(vec![a, b, c]);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].open_time, 1);
        assert_eq!(normalized[1].open_time, 2);
        // First occurrence of a duplicate timestamp wins
        assert_eq!(normalized[1].close, 103.0);
    }

    #[test]
    fn series_inputs_extraction() {
        let candles = vec![sample_candle()];
        let inputs = SeriesInputs::from_candles(&candles);
        assert_eq!(inputs.closes, vec![103.0]);
        assert_eq!(inputs.highs, vec![105.0]);
        assert_eq!(inputs.lows, vec![98.0]);
        assert_eq!(inputs.volumes, Some(vec![50_000.0]));

        let no_vol = inputs.without_volumes();
        assert!(no_vol.volumes.is_none());
    }

    #[test]
    fn candle_serialization_roundtrip() {
        let candle = sample_candle();
        let json = serde_json::to_string(&candle).unwrap();
        let deser: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(candle, deser);
    }
}
