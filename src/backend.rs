//! Entity store abstraction shared by the hierarchy and board engines.
//!
//! The engines are generic over [`EntityStore`] so they can run against the
//! SQLite store in production and against wrapping stores in tests.

use std::future::Future;

use crate::db::models::{ChildRecord, PhaseRecord, Task, TaskDraft};
use crate::error::Result;
use crate::hierarchy::HierarchyKind;

/// Column values for a hierarchy insert or update.
///
/// The store writes only the fields its table has: `skill_sets` for phases,
/// `parent_id` for everything below a phase, `status` for hierarchy tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityFields {
    pub name: String,
    pub skill_sets: Option<String>,
    pub parent_id: Option<i64>,
    pub status: Option<String>,
}

pub trait EntityStore: Send + Sync {
    // ── Hierarchy ───────────────────────────────────────────────────

    /// All phases ordered by name
    fn fetch_phases(&self) -> impl Future<Output = Result<Vec<PhaseRecord>>> + Send;

    /// Children of `parent_id`, which must be a row of `kind`'s parent kind
    fn fetch_children(
        &self,
        kind: HierarchyKind,
        parent_id: i64,
    ) -> impl Future<Output = Result<Vec<ChildRecord>>> + Send;

    fn insert(
        &self,
        kind: HierarchyKind,
        fields: &EntityFields,
    ) -> impl Future<Output = Result<i64>> + Send;

    /// Returns false when no row has this id
    fn update(
        &self,
        kind: HierarchyKind,
        id: i64,
        fields: &EntityFields,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Returns false when no row has this id
    fn delete_row(&self, kind: HierarchyKind, id: i64)
        -> impl Future<Output = Result<bool>> + Send;

    // ── Board ───────────────────────────────────────────────────────

    fn fetch_all_tasks(&self) -> impl Future<Output = Result<Vec<Task>>> + Send;

    fn insert_task(&self, draft: &TaskDraft) -> impl Future<Output = Result<i64>> + Send;

    fn update_task(&self, task: &Task) -> impl Future<Output = Result<bool>> + Send;

    fn delete_task(&self, id: i64) -> impl Future<Output = Result<bool>> + Send;
}
