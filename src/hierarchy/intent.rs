//! Editing intents for the hierarchy tree.
//!
//! [`resolve_edit`] turns "the user pressed New/Edit on this node" into a
//! concrete target (which kind, under which parent, prefilled with what), and
//! [`HierarchyIntent`] is what the front end hands back to the engine once the
//! form is filled in.

use super::kind::HierarchyKind;
use super::tree::{strip_label, HierarchyNode};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EditAction {
    New,
    Edit,
}

/// Initial contents of the create/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditForm {
    pub name: String,
    pub skill_sets: Option<String>,
    /// Whether the form shows the skill-sets field at all
    pub shows_skill_sets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditTarget {
    pub action: EditAction,
    pub kind: HierarchyKind,
    /// Parent of the new node (`New`) or the node's unchanged parent (`Edit`)
    pub parent_id: Option<i64>,
    /// The node being edited; None for `New`
    pub entity_id: Option<i64>,
    pub title: String,
    pub form: EditForm,
}

impl EditTarget {
    /// Convert the filled-in form into an engine intent
    pub fn into_intent(self, name: String, skill_sets: Option<String>) -> Option<HierarchyIntent> {
        match self.action {
            EditAction::New => Some(HierarchyIntent::Create {
                parent_kind: self.kind.parent()?,
                parent_id: self.parent_id,
                name,
                skill_sets,
            }),
            EditAction::Edit => Some(HierarchyIntent::Edit {
                kind: self.kind,
                id: self.entity_id?,
                name,
                skill_sets,
            }),
        }
    }
}

/// Decide what a New/Edit request on the selected node means.
///
/// Returns None for the no-op cases: nothing selected, `New` under a
/// sub-task, and `Edit` on the root.
pub fn resolve_edit(selected: Option<&HierarchyNode>, action: EditAction) -> Option<EditTarget> {
    let node = selected?;
    let entity = &node.entity;

    match action {
        EditAction::New => {
            let kind = entity.kind.child()?;
            Some(EditTarget {
                action,
                kind,
                parent_id: if kind == HierarchyKind::Phase {
                    None
                } else {
                    entity.id
                },
                entity_id: None,
                title: format!("Create {}", kind),
                form: EditForm {
                    shows_skill_sets: kind.rules().has_skill_sets,
                    ..EditForm::default()
                },
            })
        },
        EditAction::Edit => {
            if !entity.kind.is_persisted() {
                return None;
            }
            let has_skill_sets = entity.kind.rules().has_skill_sets;
            Some(EditTarget {
                action,
                kind: entity.kind,
                parent_id: entity.parent_id,
                entity_id: entity.id,
                title: format!("Edit {}", entity.kind),
                form: EditForm {
                    name: strip_label(entity.kind, &node.label).to_string(),
                    skill_sets: if has_skill_sets {
                        Some(entity.skill_sets.clone().unwrap_or_default())
                    } else {
                        None
                    },
                    shows_skill_sets: has_skill_sets,
                },
            })
        },
    }
}

/// A user intent against the hierarchy, consumed by [`super::HierarchyEngine::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyIntent {
    Create {
        parent_kind: HierarchyKind,
        parent_id: Option<i64>,
        name: String,
        skill_sets: Option<String>,
    },
    Edit {
        kind: HierarchyKind,
        id: i64,
        name: String,
        skill_sets: Option<String>,
    },
    Delete {
        kind: HierarchyKind,
        id: i64,
    },
}
