//! # Types Module
//!
//! Core data structures shared by the report parser and the score policy.

use serde::Serialize;

/// The numbers pulled out of one `grading.html` report.
///
/// Produced once per successfully parsed report and consumed right away by
/// [`ScorePolicy`](crate::scorer::ScorePolicy). `tests_passed <= tests_total`
/// and `tests_total > 0` hold for every value built by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeExtract {
    /// Number of tests that passed.
    pub tests_passed: u32,
    /// Number of tests that ran.
    pub tests_total: u32,
    /// Score reported by the grading job, before the pass threshold is applied.
    pub raw_score: u32,
}

impl GradeExtract {
    pub fn new(tests_passed: u32, tests_total: u32, raw_score: u32) -> Self {
        Self {
            tests_passed,
            tests_total,
            raw_score,
        }
    }
}
