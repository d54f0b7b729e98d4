//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(period)
//! - Upper: middle + mult * stddev(period)
//! - Lower: middle - mult * stddev(period)
//!
//! Uses population stddev (divide by N).
//! Lookback: period - 1. The derived bandwidth / %B readings are computed
//! at the snapshot layer from the final band values.

/// The three band series, same length as the input with NaN warmup.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Compute Bollinger(period, mult) over a slice.
pub fn bollinger(values: &[f64], period: usize, mult: f64) -> BollingerSeries {
    let n = values.len();
    let mut middle = vec![f64::NAN; n];
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];

    if period == 0 || n < period {
        return BollingerSeries {
            middle,
            upper,
            lower,
        };
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }

        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();

        middle[i] = mean;
        upper[i] = mean + mult * stddev;
        lower[i] = mean - mult * stddev;
    }

    BollingerSeries {
        middle,
        upper,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let result = bollinger(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0);
        assert!(result.middle[0].is_nan());
        assert!(result.middle[1].is_nan());
        assert_approx(result.middle[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result.middle[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let result = bollinger(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0);
        for i in 2..5 {
            let half_width = result.upper[i] - result.middle[i];
            assert_approx(
                result.middle[i] - result.lower[i],
                half_width,
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let result = bollinger(&[100.0, 100.0, 100.0, 100.0], 3, 2.0);
        assert_approx(result.upper[2], 100.0, DEFAULT_EPSILON);
        assert_approx(result.lower[2], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_known_stddev() {
        // Window [2, 4, 6]: mean 4, population variance 8/3
        let result = bollinger(&[2.0, 4.0, 6.0], 3, 2.0);
        let sd = (8.0f64 / 3.0).sqrt();
        assert_approx(result.upper[2], 4.0 + 2.0 * sd, DEFAULT_EPSILON);
        assert_approx(result.lower[2], 4.0 - 2.0 * sd, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_nan_taints_window() {
        let result = bollinger(&[10.0, 11.0, f64::NAN, 13.0, 14.0], 3, 2.0);
        assert!(result.middle[2].is_nan());
        assert!(result.middle[3].is_nan());
        assert!(result.middle[4].is_nan());
    }
}
