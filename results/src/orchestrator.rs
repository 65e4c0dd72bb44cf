//! Result fetching.
//!
//! [`ResultsFetcher::run`] walks the resolved roster one repository at a time:
//!
//! 1. look up `<assignment path>/<repository>` on the forge,
//! 2. take the newest finished pipeline,
//! 3. find its `Summary Report` job and download `grading.html`,
//! 4. parse the report and apply the pass threshold,
//! 5. resolve each member's display name and append one record per member.
//!
//! A failure in any step skips that repository only. A member whose user lookup fails is skipped
//! on its own. Repositories without a finished pipeline or without a summary job are "not gradable
//! yet" and are not treated as errors.

use std::path::PathBuf;

use forge::ForgeClient;
use marker::traits::report_parser::ReportParser;
use marker::{GradeExtract, GradingReportParser, ScorePolicy};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use util::course_config::AssignmentConfig;
use util::paths::results_file_path;

use crate::error::{EntityError, FetchError};
use crate::output::{ResultRecord, ResultsFile};
use crate::progress::{Progress, ProgressEvent};
use crate::resolver::{ResolvedEntity, RosterMode, resolve_assignment};

/// Name of the CI job that publishes the grading report.
pub const SUMMARY_JOB_NAME: &str = "Summary Report";

/// Artifact file produced by the summary job.
pub const GRADING_ARTIFACT: &str = "grading.html";

/// What happened to one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntityOutcome {
    Recorded {
        extract: GradeExtract,
        final_score: u32,
        records: usize,
        members_skipped: usize,
    },
    NoPipeline,
    NoSummaryJob,
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub repository: String,
    pub outcome: EntityOutcome,
}

/// Totals of one run.
///
/// `completed` counts repositories that produced at least one record; every other repository is
/// counted in `skipped`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub mode: RosterMode,
    pub completed: usize,
    pub skipped: usize,
    pub records: usize,
    pub output: PathBuf,
    pub entities: Vec<EntityReport>,
}

impl RunSummary {
    fn new(mode: RosterMode, output: PathBuf) -> Self {
        Self {
            mode,
            completed: 0,
            skipped: 0,
            records: 0,
            output,
            entities: Vec::new(),
        }
    }

    fn push(&mut self, entity: &ResolvedEntity, outcome: EntityOutcome) {
        match &outcome {
            EntityOutcome::Recorded { records, .. } if *records > 0 => {
                self.completed += 1;
                self.records += records;
            }
            _ => self.skipped += 1,
        }
        self.entities.push(EntityReport {
            repository: entity.repository_name.clone(),
            outcome,
        });
    }
}

pub struct ResultsFetcher<'a, F: ?Sized> {
    forge: &'a F,
    output_dir: PathBuf,
}

impl<'a, F: ForgeClient + ?Sized> ResultsFetcher<'a, F> {
    pub fn new(forge: &'a F, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            forge,
            output_dir: output_dir.into(),
        }
    }

    /// Fetch the results of every repository of `assignment` and write the results script.
    ///
    /// # Errors
    ///
    /// Only fatal conditions are returned: an unknown roster mode, a missing assignment group, or
    /// a results file that cannot be created or finalised. Per-repository problems are reported
    /// through `progress` and in the returned [`RunSummary`].
    pub async fn run(
        &self,
        assignment: &AssignmentConfig,
        progress: &mut dyn Progress,
    ) -> Result<RunSummary, FetchError> {
        let (mode, entities) = resolve_assignment(assignment)?;
        let policy = ScorePolicy::with_pass_percent(assignment.pass_threshold_percent);

        let group = self.forge.group(&assignment.path).await.map_err(|source| {
            FetchError::AssignmentGroupMissing {
                path: assignment.path.clone(),
                source,
            }
        })?;
        debug!(group = group.id, path = %assignment.path, "assignment group found");

        let path = results_file_path(&self.output_dir, &assignment.path);
        let file = ResultsFile::initialize(&path).map_err(|source| FetchError::OutputFile {
            path: path.clone(),
            source,
        })?;

        let mut summary = RunSummary::new(mode, path.clone());

        if entities.is_empty() {
            info!(
                assignment = %assignment.name,
                ?mode,
                "no students or groups in config for assignment, nothing to process"
            );
        }

        for entity in &entities {
            let url = format!("{}/{}", assignment.url, entity.repository_name);
            progress.emit(ProgressEvent::Start {
                entity,
                url: &url,
            });

            let outcome = match self
                .fetch_entity(assignment, entity, &policy, &file, progress)
                .await
            {
                Ok(outcome) => {
                    progress.emit(ProgressEvent::Success {
                        entity,
                        outcome: &outcome,
                    });
                    outcome
                }
                Err(err) => {
                    error!(project = %entity.repository_name, error = %err, "skipping project");
                    progress.emit(ProgressEvent::Failure {
                        entity,
                        error: &err,
                    });
                    EntityOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            };
            summary.push(entity, outcome);
        }

        file.finalize()
            .map_err(|source| FetchError::OutputFile { path, source })?;

        info!(
            completed = summary.completed,
            skipped = summary.skipped,
            records = summary.records,
            output = %summary.output.display(),
            "fetched results"
        );
        Ok(summary)
    }

    async fn fetch_entity(
        &self,
        assignment: &AssignmentConfig,
        entity: &ResolvedEntity,
        policy: &ScorePolicy,
        file: &ResultsFile,
        progress: &mut dyn Progress,
    ) -> Result<EntityOutcome, EntityError> {
        let full_path = format!("{}/{}", assignment.path, entity.repository_name);
        debug!(name = %full_path, "searching for project");
        let project = self
            .forge
            .project(&full_path)
            .await
            .map_err(EntityError::Project)?;

        progress.emit(ProgressEvent::Update {
            entity,
            message: "fetching pipelines".to_string(),
        });
        let pipelines = self
            .forge
            .finished_pipelines(project.id)
            .await
            .map_err(EntityError::Pipelines)?;
        let Some(pipeline) = pipelines.into_iter().next() else {
            info!(project = %entity.repository_name, "has no pipelines");
            return Ok(EntityOutcome::NoPipeline);
        };

        progress.emit(ProgressEvent::Update {
            entity,
            message: format!("fetching jobs of pipeline {}", pipeline.id),
        });
        let jobs = self
            .forge
            .pipeline_jobs(project.id, pipeline.id)
            .await
            .map_err(EntityError::Jobs)?;
        let Some(job) = jobs.iter().find(|job| job.name == SUMMARY_JOB_NAME) else {
            debug!(project = %entity.repository_name, pipeline = pipeline.id, "no summary job");
            return Ok(EntityOutcome::NoSummaryJob);
        };

        progress.emit(ProgressEvent::Update {
            entity,
            message: format!("downloading {GRADING_ARTIFACT}"),
        });
        let html = self
            .forge
            .download_artifact(project.id, job.id, GRADING_ARTIFACT)
            .await
            .map_err(EntityError::Artifact)?;

        let extract = GradingReportParser.parse(&html)?;
        let final_score = policy.apply(&extract);
        info!(
            project = %entity.repository_name,
            s = extract.tests_passed,
            t = extract.tests_total,
            score = extract.raw_score,
            final_score,
            "results"
        );

        let mut records = Vec::with_capacity(entity.members.len());
        let mut members_skipped = 0;
        for member in &entity.members {
            match self.forge.user(member).await {
                Ok(user) => records.push(ResultRecord::new(
                    &user.username,
                    &user.name,
                    &extract,
                    final_score,
                )),
                Err(err) => {
                    members_skipped += 1;
                    warn!(member = %member, error = %err, "cannot resolve user, skipping member");
                    progress.emit(ProgressEvent::Update {
                        entity,
                        message: format!("skipping {member}: {err}"),
                    });
                }
            }
        }

        file.append_all(&records).map_err(EntityError::Output)?;

        Ok(EntityOutcome::Recorded {
            extract,
            final_score,
            records: records.len(),
            members_skipped,
        })
    }
}
