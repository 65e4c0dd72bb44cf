//! # Marker Library
//!
//! Grade extraction for automatically graded course repositories.
//!
//! ## Key Concepts
//! - **GradingReportParser**: Pulls test counts and the score out of a `grading.html` artifact.
//! - **ScorePolicy**: Applies the pass threshold that turns a raw score into the final score.
//! - **GradeExtract**: The numbers a report yields, shared by both.

pub mod error;
pub mod parsers;
pub mod scorer;
pub mod traits;
pub mod types;

pub use error::MarkerError;
pub use parsers::grading_parser::{GradingReportParser, parse_grading_html};
pub use scorer::ScorePolicy;
pub use types::GradeExtract;
