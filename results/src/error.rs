//! Error types of the results pipeline.
//!
//! [`FetchError`] ends a run; [`EntityError`] only ends the processing of one repository.

use std::io;
use std::path::PathBuf;

use forge::ForgeError;
use marker::MarkerError;

/// Fatal errors: nothing useful can be produced once one of these occurs.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("it is only possible to fetch results per student or per group, not per {0:?}")]
    UnknownRosterMode(String),

    #[error("forge group for assignment {path} does not exist, please create it first")]
    AssignmentGroupMissing { path: String, source: ForgeError },

    #[error("cannot write results file {}", .path.display())]
    OutputFile { path: PathBuf, source: io::Error },
}

/// Errors that skip one repository while the run carries on.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("project lookup failed: {0}")]
    Project(ForgeError),

    #[error("cannot list pipelines: {0}")]
    Pipelines(ForgeError),

    #[error("cannot list jobs: {0}")]
    Jobs(ForgeError),

    #[error("cannot download grading.html: {0}")]
    Artifact(ForgeError),

    #[error(transparent)]
    Report(#[from] MarkerError),

    #[error("cannot append to results file: {0}")]
    Output(io::Error),
}
