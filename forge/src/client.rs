//! The forge seam used by the results pipeline.
//!
//! [`ForgeClient`] lists exactly the lookups the fetcher performs. [`crate::gitlab::GitLabClient`]
//! implements it over HTTP; tests substitute an in-memory fake.

use async_trait::async_trait;

use crate::error::ForgeError;
use crate::types::{Group, Job, Pipeline, Project, User};

#[async_trait]
pub trait ForgeClient: Send + Sync {
    /// Look up a group by its full namespace path.
    async fn group(&self, full_path: &str) -> Result<Group, ForgeError>;

    /// Look up a project by its full namespace path.
    async fn project(&self, full_path: &str) -> Result<Project, ForgeError>;

    /// Finished pipelines of a project, newest first.
    async fn finished_pipelines(&self, project_id: u64) -> Result<Vec<Pipeline>, ForgeError>;

    /// Jobs belonging to one pipeline.
    async fn pipeline_jobs(&self, project_id: u64, pipeline_id: u64)
    -> Result<Vec<Job>, ForgeError>;

    /// Download a single file out of a job's artifacts archive.
    async fn download_artifact(
        &self,
        project_id: u64,
        job_id: u64,
        artifact_path: &str,
    ) -> Result<Vec<u8>, ForgeError>;

    /// Look up a user by username.
    async fn user(&self, username: &str) -> Result<User, ForgeError>;
}
