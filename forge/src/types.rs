//! Wire types for the subset of the GitLab v4 API the fetcher reads.
//!
//! Only the fields the pipeline needs are declared; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Only the existence of the group matters; the id is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
}

/// Listed newest first; the first entry is the one graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub name: String,
}

/// A forge account. `name` is the display name shown in the grading UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
}
