use super::kind::{HierarchyKind, ROOT_LABEL};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyEntity {
    pub kind: HierarchyKind,
    /// Absent only for the synthetic root
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_sets: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl HierarchyEntity {
    pub fn root() -> Self {
        Self {
            kind: HierarchyKind::Root,
            id: None,
            name: ROOT_LABEL.to_string(),
            skill_sets: None,
            parent_id: None,
        }
    }
}

/// Presentation label: kind prefix + name, or the fixed root label
pub fn display_label(entity: &HierarchyEntity) -> String {
    match entity.kind.rules().label_prefix {
        Some(prefix) => format!("{}{}", prefix, entity.name),
        None => ROOT_LABEL.to_string(),
    }
}

/// Inverse of [`display_label`] for the edit form
pub fn strip_label(kind: HierarchyKind, label: &str) -> &str {
    match kind.rules().label_prefix {
        Some(prefix) => label.strip_prefix(prefix).unwrap_or(label),
        None => "",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyNode {
    pub entity: HierarchyEntity,
    pub label: String,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(entity: HierarchyEntity) -> Self {
        let label = display_label(&entity);
        Self {
            entity,
            label,
            children: Vec::new(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            entity: HierarchyEntity {
                kind: HierarchyKind::Root,
                id: None,
                name: message.to_string(),
                skill_sets: None,
                parent_id: None,
            },
            label: format!("Error: {}", message),
            children: Vec::new(),
        }
    }

    /// Depth-first search for a stored node
    pub fn find(&self, kind: HierarchyKind, id: i64) -> Option<&HierarchyNode> {
        if self.entity.kind == kind && self.entity.id == Some(id) {
            return Some(self);
        }
        if self.entity.kind >= kind {
            return None;
        }
        self.children.iter().find_map(|child| child.find(kind, id))
    }

    pub fn count(&self, kind: HierarchyKind) -> usize {
        let own = usize::from(self.entity.kind == kind);
        own + self.children.iter().map(|c| c.count(kind)).sum::<usize>()
    }

    /// Siblings by name, id as tie-breaker
    pub(crate) fn sort_children(&mut self) {
        self.children.sort_by(|a, b| {
            a.entity
                .name
                .cmp(&b.entity.name)
                .then(a.entity.id.cmp(&b.entity.id))
        });
    }
}

/// The loaded hierarchy: a synthetic root owning the phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Forest {
    pub root: HierarchyNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for Forest {
    fn default() -> Self {
        Self {
            root: HierarchyNode::new(HierarchyEntity::root()),
            error: None,
        }
    }
}

impl Forest {
    pub fn new(phases: Vec<HierarchyNode>) -> Self {
        let mut forest = Self::default();
        forest.root.children = phases;
        forest
    }

    /// A forest whose only child is a placeholder carrying the failure message
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        let mut forest = Self::default();
        forest.root.children.push(HierarchyNode::error(&message));
        forest.error = Some(message);
        forest
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phases(&self) -> &[HierarchyNode] {
        if self.is_error() {
            return &[];
        }
        &self.root.children
    }

    pub fn find(&self, kind: HierarchyKind, id: i64) -> Option<&HierarchyNode> {
        if self.is_error() {
            return None;
        }
        self.phases().iter().find_map(|phase| phase.find(kind, id))
    }

    pub fn count(&self, kind: HierarchyKind) -> usize {
        self.phases().iter().map(|phase| phase.count(kind)).sum()
    }

    /// Pre-order walk yielding (depth, node), root excluded
    pub fn walk(&self) -> Vec<(usize, &HierarchyNode)> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, &HierarchyNode)> =
            self.root.children.iter().rev().map(|n| (0, n)).collect();
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        }
        out
    }
}
