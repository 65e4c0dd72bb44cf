//! Roster resolution.
//!
//! Turns the roster of an assignment into the list of repositories to visit. Each repository is
//! named `<assignment>-<student>` or `<assignment>-<group>` and carries the identifiers of the
//! people whose scores it yields.

use std::str::FromStr;

use serde::Serialize;
use util::course_config::{AssignmentConfig, GroupConfig};

use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RosterMode {
    PerStudent,
    PerGroup,
}

impl FromStr for RosterMode {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" | "students" => Ok(RosterMode::PerStudent),
            "group" | "groups" => Ok(RosterMode::PerGroup),
            _ => Err(FetchError::UnknownRosterMode(s.to_string())),
        }
    }
}

/// One unit of work: a repository and the members it is graded for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntity {
    pub repository_name: String,
    pub members: Vec<String>,
}

/// Resolve a roster for `mode`. Only the list matching the mode is consulted.
pub fn resolve(
    mode: RosterMode,
    assignment_name: &str,
    students: &[String],
    groups: &[GroupConfig],
) -> Vec<ResolvedEntity> {
    match mode {
        RosterMode::PerStudent => students
            .iter()
            .map(|student| ResolvedEntity {
                repository_name: format!("{assignment_name}-{student}"),
                members: vec![student.clone()],
            })
            .collect(),
        RosterMode::PerGroup => groups
            .iter()
            .map(|group| ResolvedEntity {
                repository_name: format!("{assignment_name}-{}", group.name),
                members: group.members.clone(),
            })
            .collect(),
    }
}

/// Parse the assignment's roster mode and resolve its roster.
///
/// Fails with [`FetchError::UnknownRosterMode`] before anything else happens.
pub fn resolve_assignment(
    assignment: &AssignmentConfig,
) -> Result<(RosterMode, Vec<ResolvedEntity>), FetchError> {
    let mode: RosterMode = assignment.per.parse()?;
    let entities = resolve(
        mode,
        &assignment.name,
        &assignment.students,
        &assignment.groups,
    );
    Ok((mode, entities))
}
