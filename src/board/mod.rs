//! Kanban board engine.
//!
//! Owns one [`BoardColumn`] per configured status and a [`FocusCursor`].
//! Tasks are placed by exact status match; a task whose status is not in the
//! sequence is moved to the first column and the correction is written back.
//! Every mutation goes store-first and then refreshes from the store, so the
//! in-memory columns are untouched when a write fails.

pub mod column;
pub mod focus;

pub use column::BoardColumn;
pub use focus::{resolve_key, Direction, FocusCursor, FocusKey, KeyAction};

use crate::backend::EntityStore;
use crate::config::BoardConfig;
use crate::db::models::{Task, TaskDraft};
use crate::error::{PlanError, Result};
use serde::Serialize;

/// Result of a move or drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Task now sits in `column`; `task` is its index there, if it was found after refresh
    Moved { column: usize, task: Option<usize> },
    Unchanged,
}

/// What the presentation layer should do after a board intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BoardOutcome {
    Ignored,
    CursorMoved { cursor: FocusCursor },
    TaskMoved { task_id: i64, cursor: FocusCursor },
    /// Show the editor for this task; the cursor is unchanged
    OpenEditor { task_id: i64 },
    /// Ask the user, then send [`BoardIntent::ConfirmDelete`]
    ConfirmDelete { task_id: i64 },
    Created { task_id: i64 },
    Saved { task_id: i64 },
    Deleted { task_id: i64 },
    Refreshed,
}

/// User intents accepted by [`BoardEngine::dispatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIntent {
    FocusUp,
    FocusDown,
    FocusLeft,
    FocusRight,
    MoveLeft,
    MoveRight,
    Open,
    Delete,
    ConfirmDelete { task_id: i64 },
    Drop { task_id: i64, column: usize },
    Create(TaskDraft),
    Edit(Task),
    Refresh,
}

/// Owned copy of the board for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub columns: Vec<BoardColumn>,
    pub cursor: FocusCursor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused_task_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

pub struct BoardEngine<S> {
    store: S,
    config: BoardConfig,
    columns: Vec<BoardColumn>,
    cursor: FocusCursor,
    load_error: Option<String>,
}

impl<S: EntityStore> BoardEngine<S> {
    /// Create an empty board; call [`Self::refresh`] to load tasks
    pub fn new(store: S, config: BoardConfig) -> Result<Self> {
        config.validate()?;
        let columns = config.statuses.iter().map(BoardColumn::new).collect();

        Ok(Self {
            store,
            config,
            columns,
            cursor: FocusCursor::default(),
            load_error: None,
        })
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&BoardColumn> {
        self.columns.get(index)
    }

    pub fn cursor(&self) -> FocusCursor {
        self.cursor
    }

    /// Set the cursor; the task index is checked against the column
    pub fn set_cursor(&mut self, cursor: FocusCursor) -> Result<FocusCursor> {
        let column = self.columns.get(cursor.column).ok_or_else(|| {
            PlanError::validation(format!(
                "column {} is out of range (board has {} columns)",
                cursor.column,
                self.columns.len()
            ))
        })?;
        if let Some(task) = cursor.task {
            if task >= column.len() {
                return Err(PlanError::validation(format!(
                    "task {} is out of range (column '{}' has {} tasks)",
                    task,
                    column.status,
                    column.len()
                )));
            }
        }
        self.cursor = cursor;
        Ok(cursor)
    }

    pub fn focused_task(&self) -> Option<&Task> {
        let index = self.cursor.task?;
        self.columns.get(self.cursor.column)?.task(index)
    }

    pub fn find_task(&self, task_id: i64) -> Option<&Task> {
        let (column, index) = self.locate(task_id)?;
        self.columns[column].task(index)
    }

    /// (column, index) of a task
    pub fn locate(&self, task_id: i64) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(c, column)| column.position_of(task_id).map(|i| (c, i)))
    }

    /// Message of the last failed refresh, if the board is showing one
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(BoardColumn::len).sum()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            columns: self.columns.clone(),
            cursor: self.cursor,
            focused_task_id: self.focused_task().map(|t| t.id),
            load_error: self.load_error.clone(),
        }
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Rebuild the columns from `tasks`.
    ///
    /// Unknown statuses are rewritten to the first status and persisted one
    /// task at a time; persistence failures here are logged, not returned.
    #[tracing::instrument(skip(self, tasks), fields(count = tasks.len()))]
    pub async fn reload(&mut self, tasks: Vec<Task>) {
        self.load_error = None;
        for column in &mut self.columns {
            column.tasks.clear();
        }

        for mut task in tasks {
            let index = match self.config.status_index(&task.status) {
                Some(index) => index,
                None => {
                    tracing::warn!(
                        task_id = task.id,
                        status = %task.status,
                        fallback = self.config.first_status(),
                        "Unknown task status, moving task to the first column"
                    );
                    task.status = self.config.first_status().to_string();
                    match self.store.update_task(&task).await {
                        Ok(true) => {
                            crate::log_board_operation!("heal_status", task.id);
                        },
                        Ok(false) => {
                            crate::log_warning!("Healed task vanished from the store", task.id);
                        },
                        Err(e) => {
                            crate::log_error!(e, "persisting healed task status");
                        },
                    }
                    0
                },
            };
            self.columns[index].tasks.push(task);
        }

        self.clamp_cursor();
    }

    /// Fetch every task and reload.
    ///
    /// A fetch failure empties the board and records [`Self::load_error`].
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&mut self) {
        match self.store.fetch_all_tasks().await {
            Ok(tasks) => self.reload(tasks).await,
            Err(e) => {
                crate::log_error!(e, "board refresh");
                for column in &mut self.columns {
                    column.tasks.clear();
                }
                self.load_error = Some(e.to_string());
                self.clamp_cursor();
            },
        }
    }

    fn clamp_cursor(&mut self) {
        let last_column = self.columns.len().saturating_sub(1);
        self.cursor.column = self.cursor.column.min(last_column);

        let len = self.columns.get(self.cursor.column).map_or(0, BoardColumn::len);
        self.cursor.task = match self.cursor.task {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }

    /// Put the cursor on a task after a refresh
    fn focus_task(&mut self, task_id: i64, column: usize) -> MoveOutcome {
        match self.locate(task_id) {
            Some((column, index)) => {
                self.cursor = FocusCursor::new(column, Some(index));
                MoveOutcome::Moved {
                    column,
                    task: Some(index),
                }
            },
            None => {
                self.cursor = FocusCursor::column(column);
                self.clamp_cursor();
                MoveOutcome::Moved { column, task: None }
            },
        }
    }

    // ── Placement ───────────────────────────────────────────────────

    /// Move a task one column left or right.
    ///
    /// Moving past either end of the sequence is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn move_task(&mut self, task_id: i64, direction: Direction) -> Result<MoveOutcome> {
        let (column, index) = self.locate(task_id).ok_or(PlanError::NotFound {
            kind: "Task",
            id: task_id,
        })?;

        let Some(target) = direction.step(column, self.columns.len()) else {
            tracing::debug!(task_id, column, "Move past the end of the board ignored");
            return Ok(MoveOutcome::Unchanged);
        };

        let mut task = self.columns[column].tasks[index].clone();
        task.status = self.columns[target].status.clone();
        self.persist(&task).await?;
        crate::log_board_operation!("move", task_id, task.status);

        self.refresh().await;
        Ok(self.focus_task(task_id, target))
    }

    /// Drop a task onto a column by index.
    ///
    /// An unknown task id leaves the board untouched, whatever the column.
    #[tracing::instrument(skip(self))]
    pub async fn drop_task(&mut self, task_id: i64, column: usize) -> Result<MoveOutcome> {
        let Some(task) = self.find_task(task_id) else {
            tracing::debug!(task_id, "Dropped task is not on the board");
            return Ok(MoveOutcome::Unchanged);
        };
        let mut task = task.clone();

        task.status = self
            .columns
            .get(column)
            .map(|c| c.status.clone())
            .ok_or_else(|| {
                PlanError::validation(format!(
                    "column {} is out of range (board has {} columns)",
                    column,
                    self.columns.len()
                ))
            })?;
        self.persist(&task).await?;
        crate::log_board_operation!("drop", task_id, task.status);

        self.refresh().await;
        Ok(self.focus_task(task_id, column))
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Apply a key press to the cursor
    #[tracing::instrument(skip(self))]
    pub async fn advance_focus(&mut self, key: FocusKey, ctrl: bool) -> Result<BoardOutcome> {
        let tasks_in_column = self
            .columns
            .get(self.cursor.column)
            .map_or(0, BoardColumn::len);
        let action = resolve_key(self.cursor, self.columns.len(), tasks_in_column, key, ctrl);

        let outcome = match action {
            KeyAction::Ignore => BoardOutcome::Ignored,
            KeyAction::Focus(cursor) if cursor == self.cursor => BoardOutcome::Ignored,
            KeyAction::Focus(cursor) => {
                self.cursor = cursor;
                BoardOutcome::CursorMoved { cursor }
            },
            KeyAction::MoveFocused(direction) => match self.focused_task().map(|t| t.id) {
                Some(task_id) => match self.move_task(task_id, direction).await? {
                    MoveOutcome::Moved { .. } => BoardOutcome::TaskMoved {
                        task_id,
                        cursor: self.cursor,
                    },
                    MoveOutcome::Unchanged => BoardOutcome::Ignored,
                },
                None => BoardOutcome::Ignored,
            },
            KeyAction::OpenFocused => match self.focused_task() {
                Some(task) => BoardOutcome::OpenEditor { task_id: task.id },
                None => BoardOutcome::Ignored,
            },
            KeyAction::DeleteFocused => match self.focused_task() {
                Some(task) => BoardOutcome::ConfirmDelete { task_id: task.id },
                None => BoardOutcome::Ignored,
            },
        };

        Ok(outcome)
    }

    // ── Task CRUD ───────────────────────────────────────────────────

    #[tracing::instrument(skip(self))]
    pub async fn create_task(&mut self, draft: TaskDraft) -> Result<i64> {
        self.validate_fields(
            &draft.title,
            &draft.status,
            draft.module.as_deref(),
            draft.priority.as_deref(),
            draft.assignee.as_deref(),
        )?;

        let draft = TaskDraft {
            title: draft.title.trim().to_string(),
            ..draft
        };
        let task_id = self.store.insert_task(&draft).await?;
        crate::log_board_operation!("create", task_id, draft.status);

        let column = self.config.status_index(&draft.status).unwrap_or(0);
        self.refresh().await;
        self.focus_task(task_id, column);
        Ok(task_id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_task(&mut self, task: Task) -> Result<()> {
        self.validate_fields(
            &task.title,
            &task.status,
            task.module.as_deref(),
            task.priority.as_deref(),
            task.assignee.as_deref(),
        )?;

        let task = Task {
            title: task.title.trim().to_string(),
            ..task
        };
        self.persist(&task).await?;
        crate::log_board_operation!("update", task.id);

        let column = self.config.status_index(&task.status).unwrap_or(0);
        self.refresh().await;
        self.focus_task(task.id, column);
        Ok(())
    }

    /// Delete a task; the cursor falls back to its column
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&mut self, task_id: i64) -> Result<()> {
        if !self.store.delete_task(task_id).await? {
            return Err(PlanError::NotFound {
                kind: "Task",
                id: task_id,
            });
        }
        crate::log_board_operation!("delete", task_id);

        self.refresh().await;
        self.cursor.task = None;
        Ok(())
    }

    async fn persist(&self, task: &Task) -> Result<()> {
        if self.store.update_task(task).await? {
            Ok(())
        } else {
            Err(PlanError::NotFound {
                kind: "Task",
                id: task.id,
            })
        }
    }

    fn validate_fields(
        &self,
        title: &str,
        status: &str,
        module: Option<&str>,
        priority: Option<&str>,
        assignee: Option<&str>,
    ) -> Result<()> {
        if title.trim().is_empty() {
            return Err(PlanError::validation("task title must not be empty"));
        }
        if self.config.status_index(status).is_none() {
            return Err(PlanError::validation(format!(
                "unknown status '{}' (expected one of: {})",
                status,
                self.config.statuses.join(", ")
            )));
        }
        check_listed("module", module, &self.config.modules)?;
        check_listed("priority", priority, &self.config.priorities)?;
        check_listed("assignee", assignee, &self.config.team_members)?;
        Ok(())
    }

    // ── Intents ─────────────────────────────────────────────────────

    /// Route a presentation-layer intent to the matching operation
    pub async fn dispatch(&mut self, intent: BoardIntent) -> Result<BoardOutcome> {
        match intent {
            BoardIntent::FocusUp => self.advance_focus(FocusKey::Up, false).await,
            BoardIntent::FocusDown => self.advance_focus(FocusKey::Down, false).await,
            BoardIntent::FocusLeft => self.advance_focus(FocusKey::Left, false).await,
            BoardIntent::FocusRight => self.advance_focus(FocusKey::Right, false).await,
            BoardIntent::MoveLeft => self.advance_focus(FocusKey::Left, true).await,
            BoardIntent::MoveRight => self.advance_focus(FocusKey::Right, true).await,
            BoardIntent::Open => self.advance_focus(FocusKey::Enter, false).await,
            BoardIntent::Delete => self.advance_focus(FocusKey::Delete, true).await,
            BoardIntent::ConfirmDelete { task_id } => {
                self.delete_task(task_id).await?;
                Ok(BoardOutcome::Deleted { task_id })
            },
            BoardIntent::Drop { task_id, column } => {
                match self.drop_task(task_id, column).await? {
                    MoveOutcome::Moved { .. } => Ok(BoardOutcome::TaskMoved {
                        task_id,
                        cursor: self.cursor,
                    }),
                    MoveOutcome::Unchanged => Ok(BoardOutcome::Ignored),
                }
            },
            BoardIntent::Create(draft) => {
                let task_id = self.create_task(draft).await?;
                Ok(BoardOutcome::Created { task_id })
            },
            BoardIntent::Edit(task) => {
                let task_id = task.id;
                self.update_task(task).await?;
                Ok(BoardOutcome::Saved { task_id })
            },
            BoardIntent::Refresh => {
                self.refresh().await;
                Ok(BoardOutcome::Refreshed)
            },
        }
    }
}

/// Optional fields must come from their configured list when set
fn check_listed(field: &str, value: Option<&str>, allowed: &[String]) -> Result<()> {
    match value {
        Some(value) if !allowed.iter().any(|a| a == value) => Err(PlanError::validation(format!(
            "unknown {} '{}' (expected one of: {})",
            field,
            value,
            allowed.join(", ")
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use crate::test_utils::test_helpers::TestContext;

    fn abc() -> BoardConfig {
        BoardConfig::with_statuses(["A", "B", "C"]).unwrap()
    }

    async fn board(ctx: &TestContext, config: BoardConfig) -> BoardEngine<SqliteStore<'_>> {
        let mut board = BoardEngine::new(SqliteStore::new(ctx.pool()), config).unwrap();
        board.refresh().await;
        board
    }

    async fn seed(board: &mut BoardEngine<SqliteStore<'_>>, title: &str, status: &str) -> i64 {
        board
            .create_task(TaskDraft::new(title, status))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_rejects_empty_sequence() {
        let ctx = TestContext::new().await;
        let config = BoardConfig {
            statuses: Vec::new(),
            ..BoardConfig::default()
        };
        let result = BoardEngine::new(SqliteStore::new(ctx.pool()), config);
        assert!(matches!(result, Err(PlanError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_places_task_in_its_column() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;

        let id = seed(&mut board, "write docs", "B").await;

        assert_eq!(board.locate(id), Some((1, 0)));
        assert_eq!(board.cursor(), FocusCursor::new(1, Some(0)));
        assert_eq!(board.focused_task().unwrap().title, "write docs");
    }

    #[tokio::test]
    async fn test_move_along_the_sequence() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        let id = seed(&mut board, "t", "B").await;

        let outcome = board.move_task(id, Direction::Right).await.unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                column: 2,
                task: Some(0)
            }
        );
        assert_eq!(board.find_task(id).unwrap().status, "C");

        let outcome = board.move_task(id, Direction::Right).await.unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(board.find_task(id).unwrap().status, "C");

        board.move_task(id, Direction::Left).await.unwrap();
        board.move_task(id, Direction::Left).await.unwrap();
        assert_eq!(board.find_task(id).unwrap().status, "A");

        let outcome = board.move_task(id, Direction::Left).await.unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(board.cursor(), FocusCursor::new(0, Some(0)));
    }

    #[tokio::test]
    async fn test_move_unknown_task() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;

        let result = board.move_task(42, Direction::Right).await;
        assert!(matches!(result, Err(PlanError::NotFound { id: 42, .. })));
    }

    #[tokio::test]
    async fn test_drop_task() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        let id = seed(&mut board, "t", "A").await;

        let outcome = board.drop_task(id, 2).await.unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                column: 2,
                task: Some(0)
            }
        );
        assert_eq!(board.find_task(id).unwrap().status, "C");

        assert_eq!(board.drop_task(999, 1).await.unwrap(), MoveOutcome::Unchanged);
        assert!(matches!(
            board.drop_task(id, 3).await,
            Err(PlanError::Validation(_))
        ));

        // An unknown id wins over a bad column
        let before = board.snapshot();
        assert_eq!(board.drop_task(404, 9).await.unwrap(), MoveOutcome::Unchanged);
        assert_eq!(board.snapshot(), before);
    }

    #[tokio::test]
    async fn test_reload_heals_unknown_status() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        let id = seed(&mut board, "t", "B").await;

        sqlx::query("UPDATE tasks SET status = 'Unknown' WHERE id = ?")
            .bind(id)
            .execute(ctx.pool())
            .await
            .unwrap();

        board.refresh().await;
        assert_eq!(board.locate(id), Some((0, 0)));
        assert_eq!(board.find_task(id).unwrap().status, "A");

        let stored: String = sqlx::query_scalar("SELECT status FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_one(ctx.pool())
            .await
            .unwrap();
        assert_eq!(stored, "A");
    }

    #[tokio::test]
    async fn test_refresh_failure_records_error() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        seed(&mut board, "t", "A").await;

        ctx.pool().close().await;
        board.refresh().await;

        assert!(board.load_error().is_some());
        assert_eq!(board.task_count(), 0);
        assert_eq!(board.cursor(), FocusCursor::column(0));
    }

    #[tokio::test]
    async fn test_reload_clears_previous_load_error() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        seed(&mut board, "t", "A").await;
        let tasks: Vec<_> = board
            .columns()
            .iter()
            .flat_map(|c| c.tasks.clone())
            .collect();

        ctx.pool().close().await;
        board.refresh().await;
        assert!(board.load_error().is_some());

        board.reload(tasks).await;
        assert!(board.load_error().is_none());
        assert!(board.snapshot().load_error.is_none());
        assert_eq!(board.task_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_move_leaves_board_unchanged() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        let id = seed(&mut board, "t", "A").await;
        let before = board.snapshot();

        ctx.pool().close().await;
        let result = board.move_task(id, Direction::Right).await;

        assert!(matches!(result, Err(PlanError::Store(_))));
        assert_eq!(board.snapshot(), before);
    }

    #[tokio::test]
    async fn test_advance_focus_and_open() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        let first = seed(&mut board, "one", "A").await;
        seed(&mut board, "two", "A").await;
        board.set_cursor(FocusCursor::column(0)).unwrap();

        let outcome = board.advance_focus(FocusKey::Down, false).await.unwrap();
        assert_eq!(
            outcome,
            BoardOutcome::CursorMoved {
                cursor: FocusCursor::new(0, Some(0))
            }
        );

        let outcome = board.advance_focus(FocusKey::Enter, false).await.unwrap();
        assert_eq!(outcome, BoardOutcome::OpenEditor { task_id: first });
        assert_eq!(board.cursor(), FocusCursor::new(0, Some(0)));

        let outcome = board.advance_focus(FocusKey::Up, false).await.unwrap();
        assert_eq!(
            outcome,
            BoardOutcome::CursorMoved {
                cursor: FocusCursor::column(0)
            }
        );
        let outcome = board.advance_focus(FocusKey::Up, false).await.unwrap();
        assert_eq!(outcome, BoardOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_ctrl_right_moves_focused_task() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        let id = seed(&mut board, "t", "A").await;

        let outcome = board.advance_focus(FocusKey::Right, true).await.unwrap();
        assert_eq!(
            outcome,
            BoardOutcome::TaskMoved {
                task_id: id,
                cursor: FocusCursor::new(1, Some(0))
            }
        );
        assert_eq!(board.find_task(id).unwrap().status, "B");
    }

    #[tokio::test]
    async fn test_delete_flow() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        let id = seed(&mut board, "t", "B").await;

        let outcome = board.dispatch(BoardIntent::Delete).await.unwrap();
        assert_eq!(outcome, BoardOutcome::ConfirmDelete { task_id: id });
        assert!(board.find_task(id).is_some());

        let outcome = board
            .dispatch(BoardIntent::ConfirmDelete { task_id: id })
            .await
            .unwrap();
        assert_eq!(outcome, BoardOutcome::Deleted { task_id: id });
        assert!(board.find_task(id).is_none());
        assert_eq!(board.cursor(), FocusCursor::column(1));

        assert!(matches!(
            board.delete_task(id).await,
            Err(PlanError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, BoardConfig::default()).await;

        let cases = [
            TaskDraft::new("  ", "To Do"),
            TaskDraft::new("t", "Nope"),
            TaskDraft {
                module: Some("Unknown module".to_string()),
                ..TaskDraft::new("t", "To Do")
            },
            TaskDraft {
                priority: Some("Urgent".to_string()),
                ..TaskDraft::new("t", "To Do")
            },
            TaskDraft {
                assignee: Some("Nobody".to_string()),
                ..TaskDraft::new("t", "To Do")
            },
        ];

        for draft in cases {
            let result = board.create_task(draft).await;
            assert!(matches!(result, Err(PlanError::Validation(_))));
        }
        assert_eq!(board.task_count(), 0);
    }

    #[tokio::test]
    async fn test_update_task_moves_between_columns() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, BoardConfig::default()).await;
        let id = seed(&mut board, "t", "To Do").await;

        let mut task = board.find_task(id).unwrap().clone();
        task.status = "Done".to_string();
        task.priority = Some("High".to_string());
        board
            .dispatch(BoardIntent::Edit(task))
            .await
            .unwrap();

        assert_eq!(board.locate(id), Some((4, 0)));
        assert_eq!(board.find_task(id).unwrap().priority.as_deref(), Some("High"));
    }

    #[tokio::test]
    async fn test_set_cursor_bounds() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;

        assert!(board.set_cursor(FocusCursor::column(3)).is_err());
        assert!(board.set_cursor(FocusCursor::new(0, Some(0))).is_err());
        assert!(board.set_cursor(FocusCursor::column(2)).is_ok());
    }

    #[tokio::test]
    async fn test_snapshot_serializes() {
        let ctx = TestContext::new().await;
        let mut board = board(&ctx, abc()).await;
        let id = seed(&mut board, "t", "C").await;

        let json = serde_json::to_value(board.snapshot()).unwrap();
        assert_eq!(json["columns"].as_array().unwrap().len(), 3);
        assert_eq!(json["columns"][2]["tasks"][0]["id"], id);
        assert_eq!(json["focused_task_id"], id);
        assert!(json.get("load_error").is_none());
    }
}
