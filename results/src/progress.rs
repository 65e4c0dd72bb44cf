//! Progress events emitted while a run walks the roster.
//!
//! The orchestrator reports what it is doing through [`Progress`]; how that is shown is up to the
//! implementation. [`ConsoleProgress`] prints one coloured line per step, [`SilentProgress`]
//! drops everything (tracing still records it).

use std::io::{self, Write};

use colored::Colorize;

use crate::error::EntityError;
use crate::orchestrator::EntityOutcome;
use crate::resolver::ResolvedEntity;

#[derive(Debug)]
pub enum ProgressEvent<'a> {
    /// Processing of a repository begins. `url` is its web address.
    Start {
        entity: &'a ResolvedEntity,
        url: &'a str,
    },
    /// A step inside the current repository, or a skipped member.
    Update {
        entity: &'a ResolvedEntity,
        message: String,
    },
    /// The repository was handled without error (possibly with nothing to record).
    Success {
        entity: &'a ResolvedEntity,
        outcome: &'a EntityOutcome,
    },
    /// The repository was skipped because of an error.
    Failure {
        entity: &'a ResolvedEntity,
        error: &'a EntityError,
    },
}

pub trait Progress {
    fn emit(&mut self, event: ProgressEvent<'_>);
}

pub struct SilentProgress;

impl Progress for SilentProgress {
    fn emit(&mut self, _event: ProgressEvent<'_>) {}
}

pub struct ConsoleProgress<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn emit(&mut self, event: ProgressEvent<'_>) {
        // Console output is best effort; a closed stdout must not stop the run.
        let _ = match event {
            ProgressEvent::Start { entity, url } => writeln!(
                self.out,
                "{} {} {}",
                "fetching project".cyan(),
                entity.repository_name.yellow(),
                format!("at {url}").magenta()
            ),
            ProgressEvent::Update { message, .. } => {
                writeln!(self.out, "    {} {}", "·".cyan(), message)
            }
            ProgressEvent::Success { entity, outcome } => writeln!(
                self.out,
                "{} {}: {}",
                "✓".green(),
                entity.repository_name,
                describe(outcome)
            ),
            ProgressEvent::Failure { entity, error } => writeln!(
                self.out,
                "{} {}: {}",
                "✗".red(),
                entity.repository_name,
                format!("problem: {error}").red()
            ),
        };
    }
}

fn describe(outcome: &EntityOutcome) -> String {
    match outcome {
        EntityOutcome::Recorded {
            extract,
            final_score,
            records,
            members_skipped,
        } => {
            let mut text = format!(
                "{}/{} tests, score {} → {}, {} record(s)",
                extract.tests_passed, extract.tests_total, extract.raw_score, final_score, records
            );
            if *members_skipped > 0 {
                text.push_str(&format!(", {members_skipped} member(s) skipped"));
            }
            text
        }
        EntityOutcome::NoPipeline => "no finished pipeline".to_string(),
        EntityOutcome::NoSummaryJob => "no summary report yet".to_string(),
        EntityOutcome::Failed { error } => error.clone(),
    }
}
