//! Parsers for report artifacts downloaded from CI jobs.

pub mod grading_parser;
