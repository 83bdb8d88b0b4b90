//! Common utilities for integration tests
//!
//! Database setup, a command builder for the `vgplan` binary with an isolated
//! environment, and a store wrapper that counts writes.

use assert_cmd::Command;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use vgplan::backend::{EntityFields, EntityStore};
use vgplan::db::models::{ChildRecord, PhaseRecord, Task, TaskDraft};
use vgplan::db::{create_pool, run_migrations};
use vgplan::error::Result;
use vgplan::hierarchy::HierarchyKind;

/// Get the path to the `vgplan` binary
#[allow(deprecated)]
#[allow(dead_code)]
pub fn vgplan_binary() -> PathBuf {
    std::env::var("CARGO_BIN_EXE_vgplan")
        .map(PathBuf::from)
        .unwrap_or_else(|_| assert_cmd::cargo::cargo_bin("vgplan"))
}

/// Create a Command for `vgplan` bound to `db` and isolated from the user's home
#[allow(dead_code)]
pub fn vgplan_command(db: &Path) -> Command {
    let mut cmd = Command::new(vgplan_binary());
    cmd.env("VGPLAN_DB", db)
        .env("HOME", "/nonexistent")
        .env("USERPROFILE", "/nonexistent")
        .env_remove("RUST_LOG");
    cmd
}

/// A temp dir and the database path inside it
#[allow(dead_code)]
pub fn setup_test_env() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db = temp_dir.path().join("board.db");
    (temp_dir, db)
}

#[allow(dead_code)]
pub async fn setup_test_db() -> (TempDir, SqlitePool) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let pool = create_pool(&db_path).await.unwrap();
    run_migrations(&pool).await.unwrap();
    (temp_dir, pool)
}

/// Store wrapper that counts writes before delegating
#[allow(dead_code)]
pub struct CountingStore<S> {
    inner: S,
    task_updates: AtomicUsize,
    inserts: AtomicUsize,
    deletes: AtomicUsize,
}

#[allow(dead_code)]
impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            task_updates: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn task_updates(&self) -> usize {
        self.task_updates.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

impl<S: EntityStore> EntityStore for CountingStore<S> {
    async fn fetch_phases(&self) -> Result<Vec<PhaseRecord>> {
        self.inner.fetch_phases().await
    }

    async fn fetch_children(&self, kind: HierarchyKind, parent_id: i64) -> Result<Vec<ChildRecord>> {
        self.inner.fetch_children(kind, parent_id).await
    }

    async fn insert(&self, kind: HierarchyKind, fields: &EntityFields) -> Result<i64> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(kind, fields).await
    }

    async fn update(&self, kind: HierarchyKind, id: i64, fields: &EntityFields) -> Result<bool> {
        self.inner.update(kind, id, fields).await
    }

    async fn delete_row(&self, kind: HierarchyKind, id: i64) -> Result<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_row(kind, id).await
    }

    async fn fetch_all_tasks(&self) -> Result<Vec<Task>> {
        self.inner.fetch_all_tasks().await
    }

    async fn insert_task(&self, draft: &TaskDraft) -> Result<i64> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_task(draft).await
    }

    async fn update_task(&self, task: &Task) -> Result<bool> {
        self.task_updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_task(task).await
    }

    async fn delete_task(&self, id: i64) -> Result<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_task(id).await
    }
}
