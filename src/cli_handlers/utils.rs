//! Utility functions for CLI handlers
//!
//! Database opening, confirmation prompts, argument parsing and the text
//! renderings of the board and the hierarchy.

use crate::board::{BoardSnapshot, FocusKey};
use crate::config::{resolve_db_path, BoardConfig};
use crate::db::models::Task;
use crate::db::{create_pool, run_migrations};
use crate::error::{PlanError, Result};
use crate::hierarchy::Forest;
use clap::ValueEnum;
use dialoguer::{theme::ColorfulTheme, Confirm};
use serde::Serialize;
use sqlx::SqlitePool;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Open (creating if needed) the database and bring the schema up to date
pub async fn open_database(explicit: Option<PathBuf>) -> Result<SqlitePool> {
    let path = resolve_db_path(explicit);
    tracing::debug!(path = %path.display(), "Opening database");

    let pool = create_pool(&path).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Ask before a destructive action.
///
/// Without a terminal there is nobody to ask, so `--yes` is required.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(PlanError::validation(
            "refusing to delete without confirmation; pass --yes in non-interactive use",
        ));
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PlanError::Io(std::io::Error::other(e)))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse "down", "ctrl+right", "Ctrl+Backspace", ...
pub fn parse_key(raw: &str) -> Result<(FocusKey, bool)> {
    let lowered = raw.trim().to_ascii_lowercase();
    let (name, ctrl) = match lowered.strip_prefix("ctrl+") {
        Some(rest) => (rest, true),
        None => (lowered.as_str(), false),
    };

    let key = FocusKey::from_str(name, true).map_err(|_| {
        PlanError::validation(format!(
            "unknown key '{}' (expected up, down, left, right, enter, delete or backspace, optionally prefixed with ctrl+)",
            raw
        ))
    })?;
    Ok((key, ctrl))
}

/// Resolve a drop target given as a status name or a column index
pub fn parse_column(raw: &str, config: &BoardConfig) -> Result<usize> {
    if let Some(index) = config.status_index(raw) {
        return Ok(index);
    }
    if let Some(index) = config
        .statuses
        .iter()
        .position(|s| s.eq_ignore_ascii_case(raw))
    {
        return Ok(index);
    }
    raw.parse::<usize>().map_err(|_| {
        PlanError::validation(format!(
            "unknown column '{}' (expected a status name or an index below {})",
            raw,
            config.statuses.len()
        ))
    })
}

/// One-line task summary
pub fn task_line(task: &Task) -> String {
    let mut line = format!("#{} {}", task.id, task.title);
    if let Some(priority) = &task.priority {
        line.push_str(&format!(" [{}]", priority));
    }
    if let Some(assignee) = &task.assignee {
        line.push_str(&format!(" @{}", assignee));
    }
    if let Some(module) = &task.module {
        line.push_str(&format!(" ({})", module));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {}", due));
    }
    line
}

pub fn print_task(task: &Task) {
    println!("Task #{}: {}", task.id, task.title);
    println!("  Status:   {}", task.status);
    if let Some(priority) = &task.priority {
        println!("  Priority: {}", priority);
    }
    if let Some(assignee) = &task.assignee {
        println!("  Assignee: {}", assignee);
    }
    if let Some(module) = &task.module {
        println!("  Module:   {}", module);
    }
    if let Some(due) = task.due_date {
        println!("  Due:      {}", due);
    }
    if let Some(epic_id) = task.epic_id {
        println!("  Epic:     #{}", epic_id);
    }
    if let Some(description) = &task.description {
        println!("\n{}", description);
    }
}

pub fn print_board(snapshot: &BoardSnapshot) {
    if let Some(error) = &snapshot.load_error {
        println!("Error loading tasks: {}", error);
    }

    for (c, column) in snapshot.columns.iter().enumerate() {
        let header_mark = if snapshot.cursor.column == c && snapshot.cursor.task.is_none() {
            ">"
        } else {
            " "
        };
        println!("{} {} ({})", header_mark, column.status, column.len());

        for (i, task) in column.tasks.iter().enumerate() {
            let mark = if snapshot.cursor.column == c && snapshot.cursor.task == Some(i) {
                ">"
            } else {
                " "
            };
            println!("{}   {}", mark, task_line(task));
        }
    }
}

pub fn print_forest(forest: &Forest) {
    println!("{}", forest.root.label);
    for (depth, node) in forest.walk() {
        let indent = "  ".repeat(depth + 1);
        match node.entity.id {
            Some(id) => println!("{}{} (#{})", indent, node.label, id),
            None => println!("{}{}", indent, node.label),
        }
    }
}
