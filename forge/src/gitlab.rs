//! GitLab v4 REST implementation of [`ForgeClient`].

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
use reqwest::{Client, ClientBuilder, Response, Url, redirect};
use serde::de::DeserializeOwned;

use crate::client::ForgeClient;
use crate::error::ForgeError;
use crate::types::{Group, Job, Pipeline, Project, User};

/// Characters left as-is inside a single path segment. Everything else, `/` included, is escaped,
/// which is how GitLab expects namespaced paths in `:id` positions.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Redirect hops followed before a request fails.
const MAX_REDIRECTS: usize = 10;

pub struct GitLabClient {
    /// Carries the token. Only follows redirects within the GitLab origin.
    http: Client,
    /// No credentials. Fetches redirect targets on other hosts, e.g. artifact object storage.
    plain: Client,
    api: String,
}

impl GitLabClient {
    /// Build a client for the instance at `base_url` (e.g. `https://gitlab.example.com`).
    ///
    /// `timeout` caps each request; `None` leaves requests unbounded.
    pub fn new(base_url: &str, token: &str, timeout: Option<Duration>) -> Result<Self, ForgeError> {
        let base = base_url.trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ForgeError::InvalidSetup(format!(
                "base URL must start with http:// or https://, got {base_url:?}"
            )));
        }

        let mut token_value = HeaderValue::from_str(token).map_err(|_| {
            ForgeError::InvalidSetup("token contains characters not allowed in a header".into())
        })?;
        token_value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert("private-token", token_value);

        let http = client_builder(timeout)
            .default_headers(headers)
            .redirect(redirect::Policy::custom(same_origin_only))
            .build()?;
        let plain = client_builder(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self {
            http,
            plain,
            api: format!("{base}/api/v4"),
        })
    }

    fn group_url(&self, full_path: &str) -> String {
        format!("{}/groups/{}", self.api, encode_segment(full_path))
    }

    fn project_url(&self, full_path: &str) -> String {
        format!("{}/projects/{}", self.api, encode_segment(full_path))
    }

    fn pipelines_url(&self, project_id: u64) -> String {
        format!(
            "{}/projects/{project_id}/pipelines?scope=finished&order_by=id&sort=desc&per_page=20",
            self.api
        )
    }

    fn jobs_url(&self, project_id: u64, pipeline_id: u64) -> String {
        format!(
            "{}/projects/{project_id}/pipelines/{pipeline_id}/jobs?per_page=100",
            self.api
        )
    }

    fn artifact_url(&self, project_id: u64, job_id: u64, artifact_path: &str) -> String {
        let path = artifact_path
            .split('/')
            .map(encode_segment)
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/projects/{project_id}/jobs/{job_id}/artifacts/{path}",
            self.api
        )
    }

    fn users_url(&self, username: &str) -> String {
        format!("{}/users?username={}", self.api, encode_segment(username))
    }

    async fn get(&self, url: &str) -> Result<Response, ForgeError> {
        tracing::debug!(%url, "GET");
        let mut resp = self.http.get(url).send().await?;
        if resp.status().is_redirection() {
            let target = redirect_target(&resp)
                .ok_or_else(|| ForgeError::from_status(url, resp.status()))?;
            tracing::debug!(%url, %target, "following redirect to another host without token");
            resp = self.plain.get(target).send().await?;
        }
        let status = resp.status();
        if !status.is_success() {
            return Err(ForgeError::from_status(url, status));
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ForgeError> {
        Ok(self.get(url).await?.json::<T>().await?)
    }
}

fn client_builder(timeout: Option<Duration>) -> ClientBuilder {
    let builder = Client::builder()
        .user_agent(concat!("fetch-results/", env!("CARGO_PKG_VERSION")))
        .gzip(true);
    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

/// Redirects that stay on the same scheme, host and port are followed. Anything else stops and is
/// handed back to [`GitLabClient::get`], which refetches it without the token.
fn same_origin_only(attempt: redirect::Attempt<'_>) -> redirect::Action {
    if attempt.previous().len() > MAX_REDIRECTS {
        return attempt.error("too many redirects");
    }
    let same = attempt
        .previous()
        .last()
        .is_some_and(|prev| prev.origin() == attempt.url().origin());
    if same { attempt.follow() } else { attempt.stop() }
}

/// Absolute URL of a redirect response's `Location`, resolved against the request URL.
fn redirect_target(resp: &Response) -> Option<Url> {
    let location = resp.headers().get(LOCATION)?.to_str().ok()?;
    resp.url().join(location).ok()
}

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

#[async_trait]
impl ForgeClient for GitLabClient {
    async fn group(&self, full_path: &str) -> Result<Group, ForgeError> {
        self.get_json(&self.group_url(full_path)).await
    }

    async fn project(&self, full_path: &str) -> Result<Project, ForgeError> {
        self.get_json(&self.project_url(full_path)).await
    }

    async fn finished_pipelines(&self, project_id: u64) -> Result<Vec<Pipeline>, ForgeError> {
        self.get_json(&self.pipelines_url(project_id)).await
    }

    async fn pipeline_jobs(
        &self,
        project_id: u64,
        pipeline_id: u64,
    ) -> Result<Vec<Job>, ForgeError> {
        self.get_json(&self.jobs_url(project_id, pipeline_id)).await
    }

    async fn download_artifact(
        &self,
        project_id: u64,
        job_id: u64,
        artifact_path: &str,
    ) -> Result<Vec<u8>, ForgeError> {
        let resp = self
            .get(&self.artifact_url(project_id, job_id, artifact_path))
            .await?;
        Ok(resp.bytes().await?.to_vec())
    }

    async fn user(&self, username: &str) -> Result<User, ForgeError> {
        let users: Vec<User> = self.get_json(&self.users_url(username)).await?;
        users
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .ok_or_else(|| ForgeError::NotFound(format!("user {username}")))
    }
}
