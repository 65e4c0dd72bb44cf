//!
//! Traits Module
//!
//! Core traits used by the marker crate.
//!
//! - [`report_parser`]: Parsing downloaded report artifacts into typed values.

pub mod report_parser;
