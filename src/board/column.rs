use crate::db::models::Task;
use serde::Serialize;

/// One status column; tasks keep load order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    pub status: String,
    pub tasks: Vec<Task>,
}

impl BoardColumn {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            tasks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn position_of(&self, task_id: i64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}
