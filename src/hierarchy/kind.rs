//! Hierarchy kinds and their rules table.
//!
//! Everything that differs between Phase, Epic, Task and Sub-Task lives in
//! [`KindRules`]; the engine and the tree code look rules up by kind instead of
//! branching on it.

use crate::error::{PlanError, Result};
use crate::sql_constants::{TableSpec, EPIC_TABLE, PHASE_TABLE, SUBTASK_TABLE, TASK_TABLE};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the synthetic root node
pub const ROOT_LABEL: &str = "All Project Phases";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyKind {
    Root,
    Phase,
    Epic,
    Task,
    Subtask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindRules {
    pub kind: HierarchyKind,
    pub parent: Option<HierarchyKind>,
    pub child: Option<HierarchyKind>,
    /// Noun used in labels and dialog titles
    pub noun: &'static str,
    /// Prefix of the display label; None only for Root
    pub label_prefix: Option<&'static str>,
    pub has_skill_sets: bool,
    /// Rows also live on the board and need an initial status
    pub carries_status: bool,
    /// Storage layout; None only for Root
    pub table: Option<&'static TableSpec>,
}

static RULES: [KindRules; 5] = [
    KindRules {
        kind: HierarchyKind::Root,
        parent: None,
        child: Some(HierarchyKind::Phase),
        noun: "Root",
        label_prefix: None,
        has_skill_sets: false,
        carries_status: false,
        table: None,
    },
    KindRules {
        kind: HierarchyKind::Phase,
        parent: Some(HierarchyKind::Root),
        child: Some(HierarchyKind::Epic),
        noun: "Phase",
        label_prefix: Some("Phase: "),
        has_skill_sets: true,
        carries_status: false,
        table: Some(&PHASE_TABLE),
    },
    KindRules {
        kind: HierarchyKind::Epic,
        parent: Some(HierarchyKind::Phase),
        child: Some(HierarchyKind::Task),
        noun: "Epic",
        label_prefix: Some("Epic: "),
        has_skill_sets: false,
        carries_status: false,
        table: Some(&EPIC_TABLE),
    },
    KindRules {
        kind: HierarchyKind::Task,
        parent: Some(HierarchyKind::Epic),
        child: Some(HierarchyKind::Subtask),
        noun: "Task",
        label_prefix: Some("Task: "),
        has_skill_sets: false,
        carries_status: true,
        table: Some(&TASK_TABLE),
    },
    KindRules {
        kind: HierarchyKind::Subtask,
        parent: Some(HierarchyKind::Task),
        child: None,
        noun: "Sub-Task",
        label_prefix: Some("Sub-Task: "),
        has_skill_sets: false,
        carries_status: false,
        table: Some(&SUBTASK_TABLE),
    },
];

impl HierarchyKind {
    pub const ALL: [HierarchyKind; 5] = [
        HierarchyKind::Root,
        HierarchyKind::Phase,
        HierarchyKind::Epic,
        HierarchyKind::Task,
        HierarchyKind::Subtask,
    ];

    /// Root = 0 … Subtask = 4
    pub fn depth(self) -> usize {
        self as usize
    }

    pub fn rules(self) -> &'static KindRules {
        &RULES[self.depth()]
    }

    pub fn child(self) -> Option<HierarchyKind> {
        self.rules().child
    }

    pub fn parent(self) -> Option<HierarchyKind> {
        self.rules().parent
    }

    /// Kinds that map to a stored row
    pub fn is_persisted(self) -> bool {
        self.rules().table.is_some()
    }

    /// Storage table of a persisted kind
    pub fn table(self) -> Result<&'static TableSpec> {
        self.rules().table.ok_or_else(|| {
            PlanError::validation("the root node is not stored and cannot be queried")
        })
    }

    pub fn noun(self) -> &'static str {
        self.rules().noun
    }
}

impl fmt::Display for HierarchyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// What kind of node may be created under `kind`
pub fn child_kind_of(kind: HierarchyKind) -> Option<HierarchyKind> {
    kind.child()
}
