//! Candlestick interval — the exchange-style timeframe set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candlestick interval, matching the Binance kline interval set.
///
/// Serialized in the exchange's wire form (`"4h"`, `"1d"`, ...). The
/// monthly interval is `"1M"` — case matters, `1m` is one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "3m")]
    Min3,
    #[serde(rename = "5m")]
    Min5,
    #[serde(rename = "15m")]
    Min15,
    #[serde(rename = "30m")]
    Min30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "8h")]
    Hour8,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "3d")]
    Day3,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
}

impl Interval {
    /// Wire form accepted by exchange kline endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Min1 => "1m",
            Interval::Min3 => "3m",
            Interval::Min5 => "5m",
            Interval::Min15 => "15m",
            Interval::Min30 => "30m",
            Interval::Hour1 => "1h",
            Interval::Hour2 => "2h",
            Interval::Hour4 => "4h",
            Interval::Hour6 => "6h",
            Interval::Hour8 => "8h",
            Interval::Hour12 => "12h",
            Interval::Day1 => "1d",
            Interval::Day3 => "3d",
            Interval::Week1 => "1w",
            Interval::Month1 => "1M",
        }
    }

    /// Approximate span in milliseconds (months counted as 30 days).
    pub fn span_ms(&self) -> i64 {
        const MINUTE: i64 = 60_000;
        const HOUR: i64 = 60 * MINUTE;
        const DAY: i64 = 24 * HOUR;
        match self {
            Interval::Min1 => MINUTE,
            Interval::Min3 => 3 * MINUTE,
            Interval::Min5 => 5 * MINUTE,
            Interval::Min15 => 15 * MINUTE,
            Interval::Min30 => 30 * MINUTE,
            Interval::Hour1 => HOUR,
            Interval::Hour2 => 2 * HOUR,
            Interval::Hour4 => 4 * HOUR,
            Interval::Hour6 => 6 * HOUR,
            Interval::Hour8 => 8 * HOUR,
            Interval::Hour12 => 12 * HOUR,
            Interval::Day1 => DAY,
            Interval::Day3 => 3 * DAY,
            Interval::Week1 => 7 * DAY,
            Interval::Month1 => 30 * DAY,
        }
    }

    /// The natural higher timeframe used to confirm this one.
    ///
    /// Mirrors the pairing the signal service uses: intraday confirms on
    /// the next coarser step, daily and above confirm on weekly.
    pub fn confirmation(&self) -> Interval {
        match self {
            Interval::Min1 | Interval::Min3 | Interval::Min5 => Interval::Min15,
            Interval::Min15 | Interval::Min30 => Interval::Hour1,
            Interval::Hour1 | Interval::Hour2 => Interval::Hour4,
            Interval::Hour4 | Interval::Hour6 | Interval::Hour8 | Interval::Hour12 => {
                Interval::Day1
            }
            Interval::Day1 | Interval::Day3 | Interval::Week1 | Interval::Month1 => {
                Interval::Week1
            }
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Interval::Min1),
            "3m" => Ok(Interval::Min3),
            "5m" => Ok(Interval::Min5),
            "15m" => Ok(Interval::Min15),
            "30m" => Ok(Interval::Min30),
            "1h" => Ok(Interval::Hour1),
            "2h" => Ok(Interval::Hour2),
            "4h" => Ok(Interval::Hour4),
            "6h" => Ok(Interval::Hour6),
            "8h" => Ok(Interval::Hour8),
            "12h" => Ok(Interval::Hour12),
            "1d" => Ok(Interval::Day1),
            "3d" => Ok(Interval::Day3),
            "1w" => Ok(Interval::Week1),
            "1M" => Ok(Interval::Month1),
            other => Err(format!("unknown interval '{other}'")),
        }
    }
}
