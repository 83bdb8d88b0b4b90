//! SQLite implementation of [`EntityStore`].
//!
//! Hierarchy statements are assembled from the table layout of the requested
//! kind with `QueryBuilder`, so the four kinds share one code path per
//! operation. Values are always bound, never interpolated.

use crate::backend::{EntityFields, EntityStore};
use crate::db::models::{ChildRecord, PhaseRecord, Task, TaskDraft};
use crate::error::{PlanError, Result};
use crate::hierarchy::HierarchyKind;
use crate::sql_constants::{
    self, DELETE_TASK, INSERT_TASK, SELECT_ALL_TASKS, SELECT_PHASES, UPDATE_TASK,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

#[derive(Debug, Clone, Copy)]
pub struct SqliteStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SqliteStore<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &'a SqlitePool {
        self.pool
    }

    /// Number of stored rows of a kind
    pub async fn count(&self, kind: HierarchyKind) -> Result<i64> {
        let spec = kind.table()?;
        let count = sqlx::query_scalar::<_, i64>(&sql_constants::count_rows(spec))
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

impl EntityStore for SqliteStore<'_> {
    async fn fetch_phases(&self) -> Result<Vec<PhaseRecord>> {
        let phases = sqlx::query_as::<_, PhaseRecord>(SELECT_PHASES)
            .fetch_all(self.pool)
            .await?;
        Ok(phases)
    }

    async fn fetch_children(&self, kind: HierarchyKind, parent_id: i64) -> Result<Vec<ChildRecord>> {
        let spec = kind.table()?;
        let parent_column = spec.parent_column.ok_or_else(|| {
            PlanError::validation(format!("{} rows have no parent column", kind))
        })?;

        let sql = format!(
            "SELECT {id} AS id, {name} AS name FROM {table} WHERE {parent} = ? ORDER BY {name}, {id}",
            id = spec.id_column,
            name = spec.name_column,
            table = spec.table,
            parent = parent_column,
        );

        let children = sqlx::query_as::<_, ChildRecord>(&sql)
            .bind(parent_id)
            .fetch_all(self.pool)
            .await?;
        Ok(children)
    }

    async fn insert(&self, kind: HierarchyKind, fields: &EntityFields) -> Result<i64> {
        let spec = kind.table()?;

        let mut columns = vec![spec.name_column];
        columns.extend(spec.skill_sets_column);
        columns.extend(spec.parent_column);
        columns.extend(spec.status_column);

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            spec.table,
            columns.join(", ")
        ));
        let mut values = builder.separated(", ");
        values.push_bind(fields.name.clone());
        if spec.skill_sets_column.is_some() {
            values.push_bind(fields.skill_sets.clone());
        }
        if spec.parent_column.is_some() {
            values.push_bind(fields.parent_id);
        }
        if spec.status_column.is_some() {
            values.push_bind(fields.status.clone());
        }
        values.push_unseparated(")");

        let result = builder.build().execute(self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, kind: HierarchyKind, id: i64, fields: &EntityFields) -> Result<bool> {
        let spec = kind.table()?;

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("UPDATE {} SET {} = ", spec.table, spec.name_column));
        builder.push_bind(fields.name.clone());
        if let Some(column) = spec.skill_sets_column {
            builder
                .push(format!(", {} = ", column))
                .push_bind(fields.skill_sets.clone());
        }
        builder
            .push(format!(" WHERE {} = ", spec.id_column))
            .push_bind(id);

        let result = builder.build().execute(self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_row(&self, kind: HierarchyKind, id: i64) -> Result<bool> {
        let spec = kind.table()?;
        let sql = format!("DELETE FROM {} WHERE {} = ?", spec.table, spec.id_column);

        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_all_tasks(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(SELECT_ALL_TASKS)
            .fetch_all(self.pool)
            .await?;
        Ok(tasks)
    }

    async fn insert_task(&self, draft: &TaskDraft) -> Result<i64> {
        let result = sqlx::query(INSERT_TASK)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.assignee)
            .bind(&draft.module)
            .bind(&draft.status)
            .bind(&draft.priority)
            .bind(draft.due_date)
            .execute(self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update_task(&self, task: &Task) -> Result<bool> {
        let result = sqlx::query(UPDATE_TASK)
            .bind(&task.title)
            .bind(&task.description)
            .bind(&task.assignee)
            .bind(&task.module)
            .bind(&task.status)
            .bind(&task.priority)
            .bind(task.due_date)
            .bind(task.id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_task(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(DELETE_TASK)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
