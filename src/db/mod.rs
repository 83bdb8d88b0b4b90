pub mod models;

use crate::config::TEAM_MEMBERS;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

pub async fn create_pool(db_path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS project_phases (
            phase_id INTEGER PRIMARY KEY AUTOINCREMENT,
            phase_name TEXT NOT NULL UNIQUE,
            skill_sets TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS epics (
            epic_id INTEGER PRIMARY KEY AUTOINCREMENT,
            epic_name TEXT NOT NULL,
            phase_id INTEGER NOT NULL,
            FOREIGN KEY (phase_id) REFERENCES project_phases(phase_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Board cards and hierarchy tasks share this table; epic_id is NULL for
    // cards created from the board
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            assignee TEXT,
            module TEXT,
            status TEXT NOT NULL,
            priority TEXT,
            due_date TEXT,
            epic_id INTEGER,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (epic_id) REFERENCES epics(epic_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subtasks (
            subtask_id INTEGER PRIMARY KEY AUTOINCREMENT,
            subtask_name TEXT NOT NULL,
            task_id INTEGER NOT NULL,
            FOREIGN KEY (task_id) REFERENCES tasks(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            member_id INTEGER PRIMARY KEY AUTOINCREMENT,
            member_name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Child lookups are always by parent, ordered by name
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_epics_phase ON epics(phase_id, epic_name)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tasks_epic ON tasks(epic_id, title)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_subtasks_task ON subtasks(task_id, subtask_name)")
        .execute(pool)
        .await?;

    for member in TEAM_MEMBERS {
        sqlx::query("INSERT OR IGNORE INTO team_members (member_name) VALUES (?)")
            .bind(member)
            .execute(pool)
            .await?;
    }

    tracing::debug!("Database tables checked/created");

    Ok(())
}
