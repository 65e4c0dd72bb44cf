//!
//! Grading Report Parser Module
//!
//! This module extracts test counts and the score from the `grading.html` artifact produced by the
//! "Summary Report" CI job.
//!
//! The report is a generated, loosely structured HTML fragment, so extraction is pattern based
//! rather than structural:
//!
//! - The first ` (<passed>/<total>)</strong>` in document order supplies the test counts.
//! - The first ` (<score>)</strong>` in document order supplies the raw score.
//!
//! Both markers must be present. The two matches are not checked against each other for position.
//!
//! # Error Handling
//!
//! Returns [`MarkerError`] variants for missing markers, numbers that do not fit, and counts that
//! contradict each other.

use crate::error::MarkerError;
use crate::traits::report_parser::ReportParser;
use crate::types::GradeExtract;
use once_cell::sync::Lazy;
use regex::Regex;

static TESTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" \(([0-9]+)/([0-9]+)\)</strong>").expect("valid tests regex"));
static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" \(([0-9]+)\)</strong>").expect("valid score regex"));

/// Parser for the `grading.html` summary artifact.
pub struct GradingReportParser;

impl ReportParser<GradeExtract> for GradingReportParser {
    fn parse(&self, raw: &[u8]) -> Result<GradeExtract, MarkerError> {
        parse_grading_html(raw)
    }
}

/// Extract a [`GradeExtract`] from raw `grading.html` bytes.
///
/// Invalid UTF-8 is replaced rather than rejected; the markers are plain ASCII.
///
/// # Errors
///
/// * [`MarkerError::MissingTests`] / [`MarkerError::MissingScore`] if a marker is absent.
/// * [`MarkerError::InvalidNumber`] if a captured number does not fit in a `u32`.
/// * [`MarkerError::Inconsistent`] if the total is zero or smaller than the passed count.
pub fn parse_grading_html(raw: &[u8]) -> Result<GradeExtract, MarkerError> {
    let html = String::from_utf8_lossy(raw);

    let tests = TESTS_RE.captures(&html).ok_or(MarkerError::MissingTests)?;
    let score = SCORE_RE.captures(&html).ok_or(MarkerError::MissingScore)?;

    let tests_passed = parse_number("tests passed", &tests[1])?;
    let tests_total = parse_number("tests total", &tests[2])?;
    let raw_score = parse_number("score", &score[1])?;

    if tests_total == 0 {
        return Err(MarkerError::Inconsistent(
            "report lists zero tests".to_string(),
        ));
    }
    if tests_passed > tests_total {
        return Err(MarkerError::Inconsistent(format!(
            "{tests_passed} tests passed out of {tests_total}"
        )));
    }

    tracing::debug!(tests_passed, tests_total, raw_score, "parsed grading report");
    Ok(GradeExtract::new(tests_passed, tests_total, raw_score))
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, MarkerError> {
    value.parse::<u32>().map_err(|_| MarkerError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
