//! Static board configuration and runtime path resolution.
//!
//! The status sequence, module list, priorities and team roster are fixed
//! in-process data. [`BoardConfig`] wraps them so tests and embedders can
//! supply their own sequence (e.g. `[A, B, C]`) through the same validation.

use crate::error::{PlanError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Ordered board stages; order defines move-left/move-right adjacency
pub const STATUS_LIST: &[&str] = &["To Do", "In Progress", "Blocked", "In Review", "Done"];

pub const MODULES: &[&str] = &["Ingress", "Egress", "MDM Customization", "Planning", "General"];

pub const PRIORITIES: &[&str] = &["High", "Medium", "Low"];

pub const TEAM_MEMBERS: &[&str] = &[
    "SSA1",
    "SA2",
    "India PM",
    "Dev1",
    "Dev2",
    "Dev3",
    "Dev4",
    "Dev5",
    "Dev6",
    "Unassigned",
];

/// Default database file, relative to the working directory
pub const DEFAULT_DB_FILE: &str = "project_kanban.db";

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "VGPLAN_DB";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardConfig {
    pub statuses: Vec<String>,
    pub modules: Vec<String>,
    pub priorities: Vec<String>,
    pub team_members: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            statuses: to_owned_list(STATUS_LIST),
            modules: to_owned_list(MODULES),
            priorities: to_owned_list(PRIORITIES),
            team_members: to_owned_list(TEAM_MEMBERS),
        }
    }
}

impl BoardConfig {
    /// Default lists with a custom status sequence
    pub fn with_statuses<I, S>(statuses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = Self {
            statuses: statuses.into_iter().map(Into::into).collect(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Status names must be non-empty and unique, and there must be at least one
    pub fn validate(&self) -> Result<()> {
        if self.statuses.is_empty() {
            return Err(PlanError::validation(
                "status sequence must contain at least one status",
            ));
        }

        let mut seen = HashSet::new();
        for status in &self.statuses {
            if status.trim().is_empty() {
                return Err(PlanError::validation("status names must not be empty"));
            }
            if !seen.insert(status.as_str()) {
                return Err(PlanError::validation(format!(
                    "duplicate status in sequence: {}",
                    status
                )));
            }
        }

        Ok(())
    }

    /// Column that receives new and unplaceable tasks
    pub fn first_status(&self) -> &str {
        self.statuses
            .first()
            .map(String::as_str)
            .unwrap_or(STATUS_LIST[0])
    }

    pub fn status_index(&self, status: &str) -> Option<usize> {
        self.statuses.iter().position(|s| s == status)
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Resolve the database path
/// Priority: explicit flag > VGPLAN_DB env > project_kanban.db
pub fn resolve_db_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    PathBuf::from(DEFAULT_DB_FILE)
}
