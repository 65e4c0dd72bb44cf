//! Forge access for the results fetcher.
//!
//! The rest of the workspace depends only on the [`ForgeClient`] trait; [`GitLabClient`] is the
//! production implementation over the GitLab v4 REST API.

pub mod client;
pub mod error;
pub mod gitlab;
pub mod types;

pub use client::ForgeClient;
pub use error::ForgeError;
pub use gitlab::GitLabClient;
pub use types::{Group, Job, Pipeline, Project, User};
