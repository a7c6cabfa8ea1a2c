//! Board data model: columns, tasks, and the snapshot handed to renderers.
//!
//! Tasks reference their column by id only. Grouping is derived by
//! filtering the task sequence, so the relative order of tasks that share a
//! column is their display order within that column.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a column or a task.
///
/// Ids are compared by equality only. Seeded boards use short literal ids
/// (`"todo"`, `"1"`); generated ids are whatever the configured generator
/// produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named lane on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique column identifier.
    pub id: Id,
    /// Lane heading. May be empty.
    pub title: String,
}

impl Column {
    /// Creates a column.
    pub fn new(id: impl Into<Id>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A unit of work owned by exactly one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: Id,
    /// Id of the owning column.
    pub column_id: Id,
    /// Free-form card text.
    pub content: String,
}

impl Task {
    /// Creates a task.
    pub fn new(id: impl Into<Id>, column_id: impl Into<Id>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            content: content.into(),
        }
    }
}

/// Full board state as seen by a presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Columns in lane order.
    pub columns: Vec<Column>,
    /// All tasks; relative order gives intra-column order.
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    /// Creates a snapshot from its two sequences.
    #[must_use]
    pub const fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    /// Returns the tasks belonging to `column_id`, in display order.
    #[must_use]
    pub fn tasks_for_column(&self, column_id: &Id) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| &t.column_id == column_id)
            .collect()
    }

    /// Returns `true` if the board has no columns and no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.tasks.is_empty()
    }
}
