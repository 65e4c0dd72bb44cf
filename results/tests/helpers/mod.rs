//! In-memory forge used by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use forge::{ForgeClient, ForgeError, Group, Job, Pipeline, Project, User};
use results::progress::{Progress, ProgressEvent};
use util::course_config::{AssignmentConfig, GroupConfig};

pub const GROUP_PATH: &str = "algdat/ss24/hw1";
pub const GROUP_URL: &str = "https://gitlab.example.com/algdat/ss24/hw1";

/// What a fake repository answers.
#[derive(Clone, Default)]
pub struct FakeProject {
    pub pipelines: Vec<u64>,
    pub jobs: Vec<(u64, &'static str)>,
    /// `None` makes the artifact download fail with a 404.
    pub artifact: Option<Vec<u8>>,
}

#[derive(Default)]
pub struct FakeForge {
    pub group_exists: bool,
    projects: HashMap<String, (u64, FakeProject)>,
    users: HashMap<String, String>,
    /// Every call, in order, as `"<method> <argument>"`.
    pub calls: Mutex<Vec<String>>,
}

impl FakeForge {
    pub fn new() -> Self {
        Self {
            group_exists: true,
            ..Default::default()
        }
    }

    pub fn without_group(mut self) -> Self {
        self.group_exists = false;
        self
    }

    pub fn user(mut self, username: &str, name: &str) -> Self {
        self.users.insert(username.to_string(), name.to_string());
        self
    }

    pub fn project(mut self, repository: &str, project: FakeProject) -> Self {
        let id = self.projects.len() as u64 + 100;
        self.projects
            .insert(format!("{GROUP_PATH}/{repository}"), (id, project));
        self
    }

    /// A repository whose newest pipeline has a summary job publishing `html`.
    pub fn graded(self, repository: &str, html: &str) -> Self {
        self.project(
            repository,
            FakeProject {
                pipelines: vec![2, 1],
                jobs: vec![(10, "Build"), (11, "Summary Report")],
                artifact: Some(html.as_bytes().to_vec()),
            },
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn by_id(&self, project_id: u64) -> Result<&FakeProject, ForgeError> {
        self.projects
            .values()
            .find(|(id, _)| *id == project_id)
            .map(|(_, p)| p)
            .ok_or_else(|| ForgeError::NotFound(format!("project {project_id}")))
    }
}

#[async_trait]
impl ForgeClient for FakeForge {
    async fn group(&self, full_path: &str) -> Result<Group, ForgeError> {
        self.record(format!("group {full_path}"));
        if self.group_exists && full_path == GROUP_PATH {
            Ok(Group { id: 1 })
        } else {
            Err(ForgeError::NotFound(full_path.to_string()))
        }
    }

    async fn project(&self, full_path: &str) -> Result<Project, ForgeError> {
        self.record(format!("project {full_path}"));
        let (id, _) = self
            .projects
            .get(full_path)
            .ok_or_else(|| ForgeError::NotFound(full_path.to_string()))?;
        Ok(Project { id: *id })
    }

    async fn finished_pipelines(&self, project_id: u64) -> Result<Vec<Pipeline>, ForgeError> {
        self.record(format!("pipelines {project_id}"));
        Ok(self
            .by_id(project_id)?
            .pipelines
            .iter()
            .map(|id| Pipeline { id: *id })
            .collect())
    }

    async fn pipeline_jobs(&self, project_id: u64, pipeline_id: u64) -> Result<Vec<Job>, ForgeError> {
        self.record(format!("jobs {project_id} {pipeline_id}"));
        Ok(self
            .by_id(project_id)?
            .jobs
            .iter()
            .map(|(id, name)| Job {
                id: *id,
                name: name.to_string(),
            })
            .collect())
    }

    async fn download_artifact(
        &self,
        project_id: u64,
        job_id: u64,
        artifact_path: &str,
    ) -> Result<Vec<u8>, ForgeError> {
        self.record(format!("artifact {project_id} {job_id} {artifact_path}"));
        self.by_id(project_id)?
            .artifact
            .clone()
            .ok_or_else(|| ForgeError::NotFound(artifact_path.to_string()))
    }

    async fn user(&self, username: &str) -> Result<User, ForgeError> {
        self.record(format!("user {username}"));
        self.users
            .get(username)
            .map(|name| User {
                id: 7,
                username: username.to_string(),
                name: name.clone(),
            })
            .ok_or_else(|| ForgeError::NotFound(format!("user {username}")))
    }
}

/// A grading report in the shape the summary job produces.
pub fn report(passed: u32, total: u32, score: u32) -> String {
    format!(
        "<html><body><p><strong>Tests passed ({passed}/{total})</strong></p>\
         <p><strong>Score ({score})</strong></p></body></html>"
    )
}

pub fn assignment(per: &str, students: &[&str], groups: &[(&str, &[&str])]) -> AssignmentConfig {
    AssignmentConfig {
        course: "algdat".into(),
        name: "hw1".into(),
        path: GROUP_PATH.into(),
        url: GROUP_URL.into(),
        per: per.into(),
        students: students.iter().map(|s| s.to_string()).collect(),
        groups: groups
            .iter()
            .map(|(name, members)| GroupConfig {
                name: name.to_string(),
                members: members.iter().map(|m| m.to_string()).collect(),
            })
            .collect(),
        pass_threshold_percent: 90,
    }
}

/// Keeps a textual trace of every progress event.
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Vec<String>,
}

impl Progress for RecordingProgress {
    fn emit(&mut self, event: ProgressEvent<'_>) {
        let line = match event {
            ProgressEvent::Start { entity, url } => {
                format!("start {} {url}", entity.repository_name)
            }
            ProgressEvent::Update { entity, message } => {
                format!("update {} {message}", entity.repository_name)
            }
            ProgressEvent::Success { entity, .. } => format!("success {}", entity.repository_name),
            ProgressEvent::Failure { entity, .. } => format!("failure {}", entity.repository_name),
        };
        self.events.push(line);
    }
}
