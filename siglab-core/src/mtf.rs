//! Multi-timeframe combiner.
//!
//! Blends the primary-timeframe score with a higher-timeframe confirmation
//! score, 70/30. Timeframes that strictly disagree (one positive, one
//! negative — zero never disagrees) halve the blended magnitude: the
//! primary signal is penalized, not discarded.

/// Combine a primary and confirmation score into one score.
pub fn combine_timeframes(primary: i32, confirm: i32) -> i32 {
    let mut combined = (0.7 * primary as f64 + 0.3 * confirm as f64).round() as i32;

    let disagree = (primary > 0 && confirm < 0) || (primary < 0 && confirm > 0);
    if disagree {
        combined = (combined as f64 * 0.5).round() as i32;
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreement_is_plain_blend() {
        // 0.7*40 + 0.3*20 = 34
        assert_eq!(combine_timeframes(40, 20), 34);
    }

    #[test]
    fn disagreement_halves_magnitude() {
        // 0.7*40 + 0.3*(-20) = 22 → halved → 11
        assert_eq!(combine_timeframes(40, -20), 11);
    }

    #[test]
    fn disagreement_is_symmetric() {
        assert_eq!(combine_timeframes(-40, 20), -11);
    }

    #[test]
    fn zero_confirm_never_disagrees() {
        // 0.7*40 = 28, no halving
        assert_eq!(combine_timeframes(40, 0), 28);
        assert_eq!(combine_timeframes(-40, 0), -28);
        assert_eq!(combine_timeframes(0, -40), -12);
    }

    #[test]
    fn both_zero_is_zero() {
        assert_eq!(combine_timeframes(0, 0), 0);
    }

    #[test]
    fn combined_stays_in_score_range() {
        for p in [-100, -50, 0, 50, 100] {
            for c in [-100, -50, 0, 50, 100] {
                let combined = combine_timeframes(p, c);
                assert!((-100..=100).contains(&combined), "({p},{c}) → {combined}");
            }
        }
    }
}
