//! Walk-forward backtester.
//!
//! Replays the indicator engine and heuristic scorer bar by bar, using only
//! history up to the decision bar, and simulates a one-bar trade against the
//! following bar's range. The replay shares the exact indicator and scoring
//! code with the live signal path, so its statistics describe the same logic
//! the signal endpoint serves.

use serde::Serialize;

use crate::domain::{Candle, Direction, SeriesInputs};
use crate::error::SignalError;
use crate::indicators::compute_indicators;
use crate::scoring::score_indicators;

/// First bar index eligible for a simulated entry.
const WARMUP_BARS: usize = 60;
/// Single-timeframe score magnitude required to enter.
const ENTRY_SCORE: i32 = 8;
/// Stop distance in ATR multiples.
const STOP_ATR: f64 = 1.5;
/// Target distance in ATR multiples.
const TARGET_ATR: f64 = 2.5;

/// One simulated trade: entered at `index`'s close, resolved on the next bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedTrade {
    pub index: usize,
    pub direction: Direction,
    pub entry: f64,
    pub exit: f64,
    /// Signed PnL in price units.
    pub result: f64,
}

/// Aggregate outcome of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestStats {
    pub trades: Vec<SimulatedTrade>,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
    pub avg_pnl: f64,
    pub total_pnl: f64,
}

impl BacktestStats {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }
}

/// Run a walk-forward backtest over the trailing `lookback` candles.
///
/// At each bar `i` from the warmup boundary to the second-to-last bar, the
/// heuristic score is computed over bars `[0..=i]` only. A score above 8
/// enters long, below -8 enters short; anything else, or a missing/zero ATR,
/// skips the bar. The trade resolves against bar `i+1`: stop at 1.5 ATR,
/// target at 2.5 ATR, stop checked first when both are touched, otherwise
/// exit at that bar's close. Results are price-unit PnL.
///
/// Series too short to produce any eligible bar yield empty stats rather
/// than an error; only malformed input is rejected.
pub fn run_backtest(candles: &[Candle], lookback: usize) -> Result<BacktestStats, SignalError> {
    if candles.is_empty() {
        return Err(SignalError::InvalidInput("empty candle series".into()));
    }
    if candles.iter().any(|c| c.is_void()) {
        return Err(SignalError::InvalidInput(
            "candle series contains non-finite values".into(),
        ));
    }

    let start = candles.len().saturating_sub(lookback);
    let window = &candles[start..];
    let inputs = SeriesInputs::from_candles(window);

    let mut trades = Vec::new();
    let mut wins = 0;
    let mut losses = 0;
    let mut draws = 0;
    let mut total_pnl = 0.0;

    // Last bar has no next-bar outcome to simulate.
    for i in WARMUP_BARS..window.len().saturating_sub(1) {
        let snapshot = compute_indicators(&inputs.head(i + 1));
        let ta = score_indicators(&snapshot);

        let direction = if ta.score > ENTRY_SCORE {
            Direction::Long
        } else if ta.score < -ENTRY_SCORE {
            Direction::Short
        } else {
            continue;
        };
        let atr = snapshot.atr14.unwrap_or(0.0);
        if atr == 0.0 {
            continue;
        }

        let entry = inputs.closes[i];
        let stop = STOP_ATR * atr;
        let target = TARGET_ATR * atr;
        let next_high = inputs.highs[i + 1];
        let next_low = inputs.lows[i + 1];
        let next_close = inputs.closes[i + 1];

        let (exit, result) = match direction {
            Direction::Long => {
                let sl = entry - stop;
                let tp = entry + target;
                if next_low <= sl {
                    (sl, -stop)
                } else if next_high >= tp {
                    (tp, target)
                } else {
                    (next_close, next_close - entry)
                }
            }
            Direction::Short => {
                let sl = entry + stop;
                let tp = entry - target;
                if next_high >= sl {
                    (sl, -stop)
                } else if next_low <= tp {
                    (tp, target)
                } else {
                    (next_close, entry - next_close)
                }
            }
            Direction::Neutral => unreachable!("neutral bars are skipped above"),
        };

        total_pnl += result;
        if result > 0.0 {
            wins += 1;
        } else if result < 0.0 {
            losses += 1;
        } else {
            draws += 1;
        }
        trades.push(SimulatedTrade {
            index: i,
            direction,
            entry,
            exit,
            result,
        });
    }

    let count = trades.len();
    Ok(BacktestStats {
        win_rate: if count > 0 {
            wins as f64 / count as f64
        } else {
            0.0
        },
        avg_pnl: if count > 0 {
            total_pnl / count as f64
        } else {
            0.0
        },
        trades,
        wins,
        losses,
        draws,
        total_pnl,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            open_time: i as i64 * 60_000,
            open,
            high,
            low,
            close,
            volume: 1000.0,
            close_time: i as i64 * 60_000 + 59_999,
        }
    }

    /// Exponential uptrend with rising volume. Every close is higher than
    /// the last, volume outpaces its 20-bar average, and the bar range stays
    /// narrow relative to the per-bar advance, so once the warmup clears the
    /// heuristic score enters long on every bar and the next bar never
    /// reaches the stop or target.
    fn trending_series(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let close = 100.0 * 1.01f64.powi(i as i32);
                let mut c = candle(i, close * 0.998, close * 1.005, close * 0.995, close);
                c.volume = 1000.0 * 1.04f64.powi(i as i32);
                c
            })
            .collect()
    }

    #[test]
    fn backtest_is_deterministic() {
        let candles = trending_series(200);
        let a = run_backtest(&candles, 200).unwrap();
        let b = run_backtest(&candles, 200).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn trending_series_produces_long_trades() {
        let candles = trending_series(200);
        let stats = run_backtest(&candles, 200).unwrap();
        assert!(stats.trade_count() > 0);
        assert!(stats
            .trades
            .iter()
            .all(|t| t.direction == Direction::Long));
        assert_eq!(
            stats.wins + stats.losses + stats.draws,
            stats.trade_count()
        );
    }

    #[test]
    fn stats_arithmetic_is_consistent() {
        let candles = trending_series(200);
        let stats = run_backtest(&candles, 200).unwrap();
        let total: f64 = stats.trades.iter().map(|t| t.result).sum();
        assert!((total - stats.total_pnl).abs() < 1e-9);
        if stats.trade_count() > 0 {
            assert!(
                (stats.avg_pnl - stats.total_pnl / stats.trade_count() as f64).abs() < 1e-9
            );
            assert!(
                (stats.win_rate - stats.wins as f64 / stats.trade_count() as f64).abs() < 1e-9
            );
        }
    }

    #[test]
    fn exactly_60_bars_never_errors() {
        // Warmup consumes the whole series: zero eligible bars, zero trades.
        let candles = trending_series(60);
        let stats = run_backtest(&candles, 60).unwrap();
        assert_eq!(stats.trade_count(), 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.total_pnl, 0.0);
    }

    #[test]
    fn lookback_caps_the_window() {
        let candles = trending_series(400);
        let full = run_backtest(&candles, 400).unwrap();
        let capped = run_backtest(&candles, 100).unwrap();
        // The capped run sees fewer eligible bars.
        assert!(capped.trade_count() < full.trade_count());
    }

    #[test]
    fn stop_checked_before_target_on_same_bar() {
        // Build an uptrend, then make the outcome bar touch both the stop
        // and the target. The trade entered on the prior bar must resolve
        // as a stop-out.
        let mut candles = trending_series(150);
        let n = candles.len();
        let entry_close = candles[n - 2].close;
        // Wide enough to cross any plausible 1.5/2.5 ATR bounds both ways.
        candles[n - 1] = candle(
            n - 1,
            entry_close,
            entry_close + 200.0,
            entry_close - 200.0,
            entry_close,
        );

        let stats = run_backtest(&candles, n).unwrap();
        let last_trade = stats
            .trades
            .iter()
            .find(|t| t.index == n - 2)
            .expect("uptrend should enter on the bar before the wide bar");
        assert!(
            last_trade.result < 0.0,
            "both bounds touched must stop out, got {}",
            last_trade.result
        );
        assert!(last_trade.exit < last_trade.entry);
    }

    #[test]
    fn empty_series_is_invalid_input() {
        assert!(matches!(
            run_backtest(&[], 100),
            Err(SignalError::InvalidInput(_))
        ));
    }

    #[test]
    fn non_finite_candle_is_invalid_input() {
        let mut candles = trending_series(100);
        candles[50].close = f64::NAN;
        assert!(matches!(
            run_backtest(&candles, 100),
            Err(SignalError::InvalidInput(_))
        ));
    }
}
