//! Report Parser Trait
//!
//! This module defines the [`ReportParser`] trait, a generic interface for turning the raw bytes of a
//! downloaded report artifact into a strongly-typed Rust structure.
//! Implementations validate the input and return a [`MarkerError`] describing what was missing.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//! use marker::traits::report_parser::ReportParser;
//!
//! struct LineCounter;
//!
//! impl ReportParser<usize> for LineCounter {
//!     fn parse(&self, raw: &[u8]) -> Result<usize, MarkerError> {
//!         Ok(raw.split(|b| *b == b'\n').count())
//!     }
//! }
//! ```

use crate::error::MarkerError;

/// A trait for parsing report artifacts into a strongly-typed Rust structure.
///
/// # Type Parameters
///
/// * `T` - The output type produced by the parser.
pub trait ReportParser<T> {
    /// Parse raw artifact bytes into the target type.
    ///
    /// # Errors
    ///
    /// Returns a [`MarkerError`] if the input does not contain the expected markers.
    fn parse(&self, raw: &[u8]) -> Result<T, MarkerError>;
}
