//! # Results
//!
//! Collects automated grading results for one course assignment and writes them as a score
//! script for the grading UI.
//!
//! - [`resolver`] turns the roster into repositories to visit.
//! - [`orchestrator`] drives the forge lookups, parsing and scoring per repository.
//! - [`output`] owns the results file.
//! - [`progress`] reports what happens along the way.

pub mod error;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod resolver;

pub use error::{EntityError, FetchError};
pub use orchestrator::{EntityOutcome, EntityReport, ResultsFetcher, RunSummary};
pub use output::{ResultRecord, ResultsFile};
pub use progress::{ConsoleProgress, Progress, ProgressEvent, SilentProgress};
pub use resolver::{ResolvedEntity, RosterMode};
