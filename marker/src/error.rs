//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum, which covers everything that can go wrong while
//! extracting a grade from a generated `grading.html` report.
//! Each variant names the quantity that could not be recovered so the caller can print a short
//! diagnostic and move on to the next repository.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//!
//! fn check(markup: &str) -> Result<(), MarkerError> {
//!     if markup.is_empty() {
//!         return Err(MarkerError::MissingTests);
//!     }
//!     Ok(())
//! }
//! ```

/// Represents all error types that can occur while reading a grading report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    /// The `(<passed>/<total>)</strong>` marker was not found.
    #[error("no matches for number of tests in grading.html")]
    MissingTests,
    /// The `(<score>)</strong>` marker was not found.
    #[error("no matches for score of tests in grading.html")]
    MissingScore,
    /// A captured group could not be read as a non-negative integer.
    #[error("invalid {field} in grading.html: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    /// The captured numbers contradict each other (e.g. more passed than total).
    #[error("inconsistent grading.html: {0}")]
    Inconsistent(String),
}
