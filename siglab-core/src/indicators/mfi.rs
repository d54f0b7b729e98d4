//! MFI — Money Flow Index, a volume-weighted RSI analogue.
//!
//! typical_price = (high + low + close) / 3
//! raw money flow = typical_price * volume, classified positive or negative
//! by the typical price change; flat changes count toward neither side.
//! MFI = 100 - 100 / (1 + positive_flow / negative_flow) over a sliding
//! `period` window (plain sums, not Wilder smoothing).
//! Lookback: period.
//! Edge cases: negative_flow == 0 → 100; positive_flow == 0 → 0;
//! both zero (flat window) → 50.

/// Compute the MFI series. The first `period` entries are NaN.
pub fn mfi(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    volumes: &[f64],
    period: usize,
) -> Vec<f64> {
    let n = closes
        .len()
        .min(highs.len())
        .min(lows.len())
        .min(volumes.len());
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    // Signed raw money flow per bar (positive, negative) — NaN-tainted
    // entries stay (NaN, NaN) and poison any window containing them.
    let mut flows = vec![(f64::NAN, f64::NAN); n];
    for i in 1..n {
        let tp = (highs[i] + lows[i] + closes[i]) / 3.0;
        let prev_tp = (highs[i - 1] + lows[i - 1] + closes[i - 1]) / 3.0;
        if tp.is_nan() || prev_tp.is_nan() || volumes[i].is_nan() {
            continue;
        }
        let flow = tp * volumes[i];
        flows[i] = if tp > prev_tp {
            (flow, 0.0)
        } else if tp < prev_tp {
            (0.0, flow)
        } else {
            (0.0, 0.0)
        };
    }

    for i in period..n {
        let window = &flows[i + 1 - period..=i];
        if window.iter().any(|(p, m)| p.is_nan() || m.is_nan()) {
            continue;
        }
        let positive: f64 = window.iter().map(|(p, _)| p).sum();
        let negative: f64 = window.iter().map(|(_, m)| m).sum();

        result[i] = if positive == 0.0 && negative == 0.0 {
            50.0
        } else if negative == 0.0 {
            100.0
        } else if positive == 0.0 {
            0.0
        } else {
            100.0 - 100.0 / (1.0 + positive / negative)
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    fn rising(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
        let volumes = vec![1000.0; n];
        (highs, lows, closes, volumes)
    }

    #[test]
    fn mfi_all_positive_flow_is_100() {
        let (h, l, c, v) = rising(8);
        let result = mfi(&h, &l, &c, &v, 3);
        assert_approx(result[3], 100.0, 1e-9);
        assert_approx(result[7], 100.0, 1e-9);
    }

    #[test]
    fn mfi_all_negative_flow_is_0() {
        let closes: Vec<f64> = (0..8).map(|i| 100.0 - i as f64).collect();
        let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
        let volumes = vec![1000.0; 8];
        let result = mfi(&highs, &lows, &closes, &volumes, 3);
        assert_approx(result[3], 0.0, 1e-9);
    }

    #[test]
    fn mfi_flat_window_is_50() {
        let closes = vec![100.0; 8];
        let result = mfi(&closes, &closes, &closes, &vec![1000.0; 8], 3);
        assert_approx(result[3], 50.0, 1e-9);
    }

    #[test]
    fn mfi_bounds() {
        let closes = vec![100.0, 103.0, 99.0, 104.0, 98.0, 105.0, 97.0, 106.0];
        let highs: Vec<f64> = closes.iter().map(|c| c + 2.0).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 2.0).collect();
        let volumes: Vec<f64> = (0..8).map(|i| 1000.0 + i as f64 * 100.0).collect();
        let result = mfi(&highs, &lows, &closes, &volumes, 3);
        for (i, &v) in result.iter().enumerate() {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "MFI out of bounds at {i}: {v}");
            }
        }
    }

    #[test]
    fn mfi_warmup_is_nan() {
        let (h, l, c, v) = rising(8);
        let result = mfi(&h, &l, &c, &v, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan());
    }
}
