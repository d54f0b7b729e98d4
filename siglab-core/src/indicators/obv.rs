//! OBV — On-Balance Volume.
//!
//! Running signed-volume accumulation: volume is added on an up close,
//! subtracted on a down close, unchanged on a flat close.
//! OBV[0] = 0; defined from the first bar (no warmup).

/// Compute the OBV series over parallel close/volume slices.
pub fn obv(closes: &[f64], volumes: &[f64]) -> Vec<f64> {
    let n = closes.len().min(volumes.len());
    let mut result = vec![f64::NAN; n];

    if n == 0 {
        return result;
    }

    result[0] = 0.0;
    let mut running = 0.0;

    for i in 1..n {
        if closes[i].is_nan() || closes[i - 1].is_nan() || volumes[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }

        if closes[i] > closes[i - 1] {
            running += volumes[i];
        } else if closes[i] < closes[i - 1] {
            running -= volumes[i];
        }
        result[i] = running;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn obv_accumulates_signed_volume() {
        let closes = vec![10.0, 11.0, 10.5, 10.5, 12.0];
        let volumes = vec![100.0, 200.0, 300.0, 400.0, 500.0];
        let result = obv(&closes, &volumes);
        assert_approx(result[0], 0.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON); // up
        assert_approx(result[2], -100.0, DEFAULT_EPSILON); // down
        assert_approx(result[3], -100.0, DEFAULT_EPSILON); // flat
        assert_approx(result[4], 400.0, DEFAULT_EPSILON); // up
    }

    #[test]
    fn obv_empty_input() {
        assert!(obv(&[], &[]).is_empty());
    }

    #[test]
    fn obv_nan_propagates() {
        let closes = vec![10.0, f64::NAN, 11.0];
        let volumes = vec![100.0, 100.0, 100.0];
        let result = obv(&closes, &volumes);
        assert_approx(result[0], 0.0, DEFAULT_EPSILON);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
    }
}
