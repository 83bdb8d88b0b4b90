//! SQL query constants and table descriptions
//!
//! Board task queries are complete statements. Hierarchy queries are built from
//! [`TableSpec`] entries so that one generic code path serves all four kinds;
//! every identifier interpolated into those statements comes from the constants
//! below, never from user input.

// ============================================================================
// Board Task Queries
// ============================================================================

/// Column list for board task queries
pub const TASK_COLUMNS: &str =
    "id, title, description, assignee, module, status, priority, due_date, epic_id";

/// All tasks in insertion order
pub const SELECT_ALL_TASKS: &str =
    const_format::formatcp!("SELECT {} FROM tasks ORDER BY id", TASK_COLUMNS);

pub const INSERT_TASK: &str = r#"
    INSERT INTO tasks (title, description, assignee, module, status, priority, due_date)
    VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

/// Rewrites every editable board field; epic_id is owned by the hierarchy
pub const UPDATE_TASK: &str = r#"
    UPDATE tasks
    SET title = ?, description = ?, assignee = ?, module = ?, status = ?, priority = ?, due_date = ?
    WHERE id = ?
"#;

pub const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?";

// ============================================================================
// Hierarchy Tables
// ============================================================================

/// Storage layout of one hierarchy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub table: &'static str,
    pub id_column: &'static str,
    pub name_column: &'static str,
    pub parent_column: Option<&'static str>,
    pub skill_sets_column: Option<&'static str>,
    pub status_column: Option<&'static str>,
}

pub const PHASE_TABLE: TableSpec = TableSpec {
    table: "project_phases",
    id_column: "phase_id",
    name_column: "phase_name",
    parent_column: None,
    skill_sets_column: Some("skill_sets"),
    status_column: None,
};

pub const EPIC_TABLE: TableSpec = TableSpec {
    table: "epics",
    id_column: "epic_id",
    name_column: "epic_name",
    parent_column: Some("phase_id"),
    skill_sets_column: None,
    status_column: None,
};

pub const TASK_TABLE: TableSpec = TableSpec {
    table: "tasks",
    id_column: "id",
    name_column: "title",
    parent_column: Some("epic_id"),
    skill_sets_column: None,
    status_column: Some("status"),
};

pub const SUBTASK_TABLE: TableSpec = TableSpec {
    table: "subtasks",
    id_column: "subtask_id",
    name_column: "subtask_name",
    parent_column: Some("task_id"),
    skill_sets_column: None,
    status_column: None,
};

/// Phases ordered by name, id as tie-breaker
pub const SELECT_PHASES: &str = r#"
    SELECT phase_id AS id, phase_name AS name, skill_sets
    FROM project_phases
    ORDER BY phase_name, phase_id
"#;

/// Count rows of a table (test and diagnostics helper)
pub fn count_rows(spec: &TableSpec) -> String {
    format!("SELECT COUNT(*) FROM {}", spec.table)
}
