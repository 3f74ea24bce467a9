//! Task Models
//!
//! The persisted task record. Field names match the JSON written to storage.

use serde::{Deserialize, Serialize};

/// Task identifier
pub type TaskId = u32;

/// A single task in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within the collection, never reassigned
    pub id: TaskId,
    pub text: String,
    /// Older records may omit the flag
    #[serde(default)]
    pub complete: bool,
}

impl Task {
    /// Create a new, not yet completed task
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            complete: false,
        }
    }

    /// Copy of this task carrying different text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            id: self.id,
            text: text.into(),
            complete: self.complete,
        }
    }

    /// Copy of this task with the completion flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            id: self.id,
            text: self.text.clone(),
            complete: !self.complete,
        }
    }
}
