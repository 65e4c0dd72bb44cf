//! # Scorer Module
//!
//! This module turns a [`GradeExtract`] into the final score entered into the grading UI.
//!
//! The rule is a hard pass/fail gate on top of the continuous score: if fewer than
//! `pass_percent` percent of the tests pass, the final score is 0; otherwise the raw score is kept.
//! The comparison uses exact integer arithmetic, so boundary cases never drift.

use crate::types::GradeExtract;
use serde::Serialize;

/// Default share of tests (in percent) that must pass for the raw score to count.
pub const DEFAULT_PASS_PERCENT: u32 = 90;

/// Pass-threshold policy applied to every parsed report.
///
/// # Example
///
/// ```
/// use marker::scorer::ScorePolicy;
/// use marker::types::GradeExtract;
///
/// let policy = ScorePolicy::default();
/// assert_eq!(policy.apply(&GradeExtract::new(9, 10, 70)), 70);
/// assert_eq!(policy.apply(&GradeExtract::new(8, 10, 70)), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScorePolicy {
    pass_percent: u32,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            pass_percent: DEFAULT_PASS_PERCENT,
        }
    }
}

impl ScorePolicy {
    /// Build a policy with a custom threshold. Values above 100 are clamped.
    pub fn with_pass_percent(pass_percent: u32) -> Self {
        Self {
            pass_percent: pass_percent.min(100),
        }
    }

    pub fn pass_percent(&self) -> u32 {
        self.pass_percent
    }

    /// Compute the final score for one report.
    ///
    /// Returns `raw_score` when `100 * passed >= pass_percent * total`, and 0 otherwise.
    /// With the default threshold this is the `10 * passed < 9 * total` rule.
    pub fn apply(&self, extract: &GradeExtract) -> u32 {
        apply_threshold(
            self.pass_percent,
            extract.tests_passed,
            extract.tests_total,
            extract.raw_score,
        )
    }
}

/// Threshold rule on plain numbers, widened to 64 bits so the products cannot overflow.
pub fn apply_threshold(pass_percent: u32, tests_passed: u32, tests_total: u32, raw_score: u32) -> u32 {
    let passed = u64::from(tests_passed) * 100;
    let required = u64::from(pass_percent) * u64::from(tests_total);
    if passed < required { 0 } else { raw_score }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 9 of 10 is exactly 90 %, which passes.
    #[test]
    fn test_boundary_nine_of_ten_passes() {
        let policy = ScorePolicy::default();
        assert_eq!(policy.apply(&GradeExtract::new(9, 10, 55)), 55);
    }

    /// 8 of 10 is below 90 %, so the score is zeroed.
    #[test]
    fn test_boundary_eight_of_ten_fails() {
        let policy = ScorePolicy::default();
        assert_eq!(policy.apply(&GradeExtract::new(8, 10, 55)), 0);
    }

    /// Matches the `10 * passed < 9 * total` rule for every small triple.
    #[test]
    fn test_matches_integer_rule_exhaustively() {
        let policy = ScorePolicy::default();
        for total in 1..=40u32 {
            for passed in 0..=total {
                let raw = 17 + passed;
                let expected = if 10 * passed < 9 * total { 0 } else { raw };
                assert_eq!(
                    policy.apply(&GradeExtract::new(passed, total, raw)),
                    expected,
                    "passed={passed} total={total}"
                );
            }
        }
    }

    /// A failing report never keeps its score, however high.
    #[test]
    fn test_failing_report_with_high_score() {
        let policy = ScorePolicy::default();
        assert_eq!(policy.apply(&GradeExtract::new(0, 3, u32::MAX)), 0);
    }

    /// Boundaries that a floating-point ratio would get wrong stay exact.
    #[test]
    fn test_no_float_drift() {
        // 27/30 == 0.9 exactly in integers
        assert_eq!(apply_threshold(90, 27, 30, 10), 10);
        assert_eq!(apply_threshold(90, 26, 30, 10), 0);
        // large counts do not overflow
        assert_eq!(apply_threshold(90, u32::MAX, u32::MAX, 3), 3);
    }

    #[test]
    fn test_custom_threshold() {
        let policy = ScorePolicy::with_pass_percent(50);
        assert_eq!(policy.apply(&GradeExtract::new(5, 10, 8)), 8);
        assert_eq!(policy.apply(&GradeExtract::new(4, 10, 8)), 0);

        let lenient = ScorePolicy::with_pass_percent(0);
        assert_eq!(lenient.apply(&GradeExtract::new(0, 10, 8)), 8);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(ScorePolicy::with_pass_percent(250).pass_percent(), 100);
    }
}
