//! Project hierarchy engine: Phase → Epic → Task → Sub-Task.
//!
//! The engine keeps an in-memory [`Forest`] mirroring the store and exposes one
//! create/update/delete path for all four kinds. Kind-specific behaviour comes
//! from the [`KindRules`] table. Every successful mutation reloads the whole
//! forest; trees are small and a full reload can't drift from the store.

pub mod intent;
pub mod kind;
pub mod tree;

pub use intent::{resolve_edit, EditAction, EditForm, EditTarget, HierarchyIntent};
pub use kind::{child_kind_of, HierarchyKind, KindRules, ROOT_LABEL};
pub use tree::{display_label, strip_label, Forest, HierarchyEntity, HierarchyNode};

use crate::backend::{EntityFields, EntityStore};
use crate::config::BoardConfig;
use crate::error::{PlanError, Result};

pub struct HierarchyEngine<S> {
    store: S,
    /// Status given to hierarchy tasks so they show up on the board
    initial_task_status: String,
    forest: Forest,
}

impl<S: EntityStore> HierarchyEngine<S> {
    /// Create an engine with an empty forest; call [`Self::load`] before mutating
    pub fn new(store: S, config: &BoardConfig) -> Self {
        Self {
            store,
            initial_task_status: config.first_status().to_string(),
            forest: Forest::default(),
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Look up a node for selection; `Root` always resolves to the root
    pub fn select(&self, kind: HierarchyKind, id: Option<i64>) -> Option<&HierarchyNode> {
        match (kind, id) {
            (HierarchyKind::Root, _) => Some(&self.forest.root),
            (kind, Some(id)) => self.forest.find(kind, id),
            (_, None) => None,
        }
    }

    /// Reload the forest from the store.
    ///
    /// Never fails: a store error replaces the forest with a single error node.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> &Forest {
        match self.fetch_forest().await {
            Ok(forest) => {
                tracing::debug!(
                    phases = forest.count(HierarchyKind::Phase),
                    epics = forest.count(HierarchyKind::Epic),
                    tasks = forest.count(HierarchyKind::Task),
                    subtasks = forest.count(HierarchyKind::Subtask),
                    "Hierarchy loaded"
                );
                self.forest = forest;
            },
            Err(e) => {
                crate::log_error!(e, "hierarchy load");
                self.forest = Forest::failed(e.to_string());
            },
        }
        &self.forest
    }

    async fn fetch_forest(&self) -> Result<Forest> {
        let mut root = HierarchyNode::new(HierarchyEntity::root());
        root.children = self
            .store
            .fetch_phases()
            .await?
            .into_iter()
            .map(|phase| {
                HierarchyNode::new(HierarchyEntity {
                    kind: HierarchyKind::Phase,
                    id: Some(phase.id),
                    name: phase.name,
                    skill_sets: phase.skill_sets,
                    parent_id: None,
                })
            })
            .collect();
        root.sort_children();

        // Rows whose parent is gone are never reached from here
        let mut pending: Vec<&mut HierarchyNode> = root.children.iter_mut().collect();
        while let Some(node) = pending.pop() {
            let (Some(child_kind), Some(parent_id)) = (node.entity.kind.child(), node.entity.id)
            else {
                continue;
            };

            node.children = self
                .store
                .fetch_children(child_kind, parent_id)
                .await?
                .into_iter()
                .map(|child| {
                    HierarchyNode::new(HierarchyEntity {
                        kind: child_kind,
                        id: Some(child.id),
                        name: child.name,
                        skill_sets: None,
                        parent_id: Some(parent_id),
                    })
                })
                .collect();
            node.sort_children();
            pending.extend(node.children.iter_mut());
        }

        Ok(Forest { root, error: None })
    }

    /// Create a child of the given parent; returns the new row id.
    ///
    /// `parent_id` is ignored when the parent is the root (i.e. creating a phase).
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &mut self,
        parent_kind: HierarchyKind,
        parent_id: Option<i64>,
        name: &str,
        skill_sets: Option<&str>,
    ) -> Result<i64> {
        let kind = child_kind_of(parent_kind).ok_or_else(|| {
            PlanError::validation(format!("a {} cannot have child nodes", parent_kind))
        })?;
        let name = validate_name(kind, name)?;

        let parent_id = if parent_kind.is_persisted() {
            let id = parent_id.ok_or_else(|| {
                PlanError::validation(format!("a {} needs a parent {} id", kind, parent_kind))
            })?;
            if self.forest.find(parent_kind, id).is_none() {
                return Err(PlanError::NotFound {
                    kind: parent_kind.noun(),
                    id,
                });
            }
            Some(id)
        } else {
            None
        };

        let fields = self.fields_for(kind, name, skill_sets, parent_id);
        let id = self.store.insert(kind, &fields).await?;
        crate::log_hierarchy_operation!("create", kind, id);

        self.load().await;
        Ok(id)
    }

    /// Rename a node; skill sets are only written for phases
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &mut self,
        kind: HierarchyKind,
        id: i64,
        name: &str,
        skill_sets: Option<&str>,
    ) -> Result<()> {
        if !kind.is_persisted() {
            return Err(PlanError::validation("the root node cannot be edited"));
        }
        let name = validate_name(kind, name)?;
        self.node(kind, id)?;

        let fields = self.fields_for(kind, name, skill_sets, None);
        if !self.store.update(kind, id, &fields).await? {
            return Err(PlanError::NotFound {
                kind: kind.noun(),
                id,
            });
        }
        crate::log_hierarchy_operation!("update", kind, id);

        self.load().await;
        Ok(())
    }

    /// Delete exactly one row.
    ///
    /// Nodes that still have children are rejected instead of cascading.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self, kind: HierarchyKind, id: i64) -> Result<()> {
        if !kind.is_persisted() {
            return Err(PlanError::validation("the root node cannot be deleted"));
        }

        let node = self.node(kind, id)?;
        if !node.children.is_empty() {
            return Err(PlanError::validation(format!(
                "{} '{}' still has {} child node(s); delete them first",
                kind,
                node.entity.name,
                node.children.len()
            )));
        }

        if !self.store.delete_row(kind, id).await? {
            return Err(PlanError::NotFound {
                kind: kind.noun(),
                id,
            });
        }
        crate::log_hierarchy_operation!("delete", kind, id);

        self.load().await;
        Ok(())
    }

    /// A node of the loaded forest.
    ///
    /// Board tasks without an epic share the `tasks` table but are not part of
    /// the tree, so ids are resolved here rather than by the store.
    fn node(&self, kind: HierarchyKind, id: i64) -> Result<&HierarchyNode> {
        self.forest.find(kind, id).ok_or(PlanError::NotFound {
            kind: kind.noun(),
            id,
        })
    }

    /// Apply a front-end intent; returns the new id for `Create`
    pub async fn apply(&mut self, intent: HierarchyIntent) -> Result<Option<i64>> {
        match intent {
            HierarchyIntent::Create {
                parent_kind,
                parent_id,
                name,
                skill_sets,
            } => self
                .create(parent_kind, parent_id, &name, skill_sets.as_deref())
                .await
                .map(Some),
            HierarchyIntent::Edit {
                kind,
                id,
                name,
                skill_sets,
            } => self
                .update(kind, id, &name, skill_sets.as_deref())
                .await
                .map(|_| None),
            HierarchyIntent::Delete { kind, id } => self.delete(kind, id).await.map(|_| None),
        }
    }

    fn fields_for(
        &self,
        kind: HierarchyKind,
        name: &str,
        skill_sets: Option<&str>,
        parent_id: Option<i64>,
    ) -> EntityFields {
        let rules = kind.rules();
        EntityFields {
            name: name.to_string(),
            skill_sets: if rules.has_skill_sets {
                skill_sets
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            } else {
                None
            },
            parent_id,
            status: rules
                .carries_status
                .then(|| self.initial_task_status.clone()),
        }
    }
}

fn validate_name(kind: HierarchyKind, name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlanError::validation(format!(
            "{} name must not be empty",
            kind
        )));
    }
    Ok(name)
}
