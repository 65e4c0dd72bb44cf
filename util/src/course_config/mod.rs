//! Course configuration files.
//!
//! A course is described by one JSON file, `<COURSE_CONFIG_DIR>/<course>.json`:
//!
//! ```json
//! {
//!   "name": "algdat",
//!   "path": "algdat/ss24",
//!   "students": ["alice", "bob"],
//!   "groups": [{ "name": "g1", "members": ["carol", "dave"] }],
//!   "assignments": {
//!     "blatt01": { "per": "student" },
//!     "projekt": { "per": "group", "path": "projekt-2024", "pass_threshold_percent": 80 }
//!   }
//! }
//! ```
//!
//! The roster lives on the course; each assignment picks whether it is worked on per student or
//! per group. `per` is kept as written so that an unknown mode is reported by whoever resolves
//! the roster, before any output is produced.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::ConfigError;
use crate::paths::course_config_path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupConfig {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignmentEntry {
    /// Path below the course path. Defaults to the assignment name.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default = "default_per")]
    pub per: String,

    #[serde(default = "default_pass_threshold_percent")]
    pub pass_threshold_percent: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub students: Vec<String>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub assignments: BTreeMap<String, AssignmentEntry>,
}

/// Everything the results pipeline needs to know about one assignment.
#[derive(Debug, Clone)]
pub struct AssignmentConfig {
    pub course: String,
    pub name: String,
    /// Full namespace path of the assignment group, e.g. `algdat/ss24/blatt01`.
    pub path: String,
    /// Web URL of the assignment group.
    pub url: String,
    /// Roster mode as written in the course file (`student` or `group`).
    pub per: String,
    pub students: Vec<String>,
    pub groups: Vec<GroupConfig>,
    pub pass_threshold_percent: u32,
}

impl CourseConfig {
    /// Load `<dir>/<course>.json`.
    pub fn load(dir: &Path, course: &str) -> Result<Self, ConfigError> {
        let path = course_config_path(dir, course);
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let cfg = Self::parse(&contents, &path)?;
        tracing::debug!(
            course = %cfg.name,
            path = %path.display(),
            assignments = cfg.assignments.len(),
            "loaded course config"
        );
        Ok(cfg)
    }

    /// Parse and validate course JSON. `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        let cfg: CourseConfig =
            serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(group) = self.groups.iter().find(|g| g.members.is_empty()) {
            return Err(ConfigError::EmptyGroup(group.name.clone()));
        }
        for (name, entry) in &self.assignments {
            if entry.pass_threshold_percent > 100 {
                return Err(ConfigError::Threshold {
                    assignment: name.clone(),
                    percent: entry.pass_threshold_percent,
                });
            }
        }
        Ok(())
    }

    /// Entries of `names` that match no student and no group of the course.
    pub fn unmatched_names<'n>(&self, names: &'n [String]) -> Vec<&'n str> {
        names
            .iter()
            .filter(|n| {
                !self.students.iter().any(|s| s == *n) && !self.groups.iter().any(|g| &g.name == *n)
            })
            .map(String::as_str)
            .collect()
    }

    /// Build the view of one assignment.
    ///
    /// When `only` is non-empty, the roster is restricted to the students and groups named in it.
    /// Unknown names are logged and ignored; if none of them is known the call fails.
    pub fn assignment(
        &self,
        name: &str,
        forge_url: &str,
        only: &[String],
    ) -> Result<AssignmentConfig, ConfigError> {
        let entry = self
            .assignments
            .get(name)
            .ok_or_else(|| ConfigError::UnknownAssignment {
                course: self.name.clone(),
                assignment: name.to_string(),
            })?;

        let path = format!(
            "{}/{}",
            self.path.trim_end_matches('/'),
            entry.path.as_deref().unwrap_or(name)
        );
        let url = format!("{}/{}", forge_url.trim_end_matches('/'), path);

        let unmatched = self.unmatched_names(only);
        if !only.is_empty() && unmatched.len() == only.len() {
            return Err(ConfigError::NoRosterMatch {
                course: self.name.clone(),
                names: only.to_vec(),
            });
        }
        if !unmatched.is_empty() {
            tracing::warn!(
                course = %self.name,
                names = ?unmatched,
                "ignoring names that are neither students nor groups"
            );
        }

        let keep = |n: &str| only.is_empty() || only.iter().any(|o| o == n);

        Ok(AssignmentConfig {
            course: self.name.clone(),
            name: name.to_string(),
            path,
            url,
            per: entry.per.clone(),
            students: self
                .students
                .iter()
                .filter(|s| keep(s))
                .cloned()
                .collect(),
            groups: self
                .groups
                .iter()
                .filter(|g| keep(&g.name))
                .cloned()
                .collect(),
            pass_threshold_percent: entry.pass_threshold_percent,
        })
    }
}

fn default_per() -> String {
    "student".to_string()
}

fn default_pass_threshold_percent() -> u32 {
    90
}
