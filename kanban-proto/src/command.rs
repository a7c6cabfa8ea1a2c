//! Serializable vocabulary for driving a board from outside the process.
//!
//! A presentation layer issues [`BoardCommand`]s for explicit edits and
//! [`DragEvent`]s for pointer gestures. Both are postcard-encodable via
//! [`crate::codec`].

use serde::{Deserialize, Serialize};

use crate::board::Id;

/// A single board mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardCommand {
    /// Append a new column.
    CreateColumn {
        /// Lane heading.
        title: String,
    },
    /// Rename a column.
    UpdateColumnTitle {
        /// Column to rename.
        id: Id,
        /// New heading.
        title: String,
    },
    /// Remove a column and every task in it.
    DeleteColumn {
        /// Column to remove.
        id: Id,
    },
    /// Append a placeholder task to a column.
    CreateTask {
        /// Owning column.
        column_id: Id,
    },
    /// Replace a task's content.
    UpdateTaskContent {
        /// Task to edit.
        id: Id,
        /// New content.
        content: String,
    },
    /// Remove a task.
    DeleteTask {
        /// Task to remove.
        id: Id,
    },
    /// Move a column to the position of another column.
    ReorderColumns {
        /// Column being moved.
        active: Id,
        /// Column whose position it takes.
        over: Id,
    },
    /// Move a task to the position of another task, adopting its column.
    ReorderTasks {
        /// Task being moved.
        active: Id,
        /// Task whose position it takes.
        over: Id,
    },
    /// Drop a task onto a column (after the column's last task).
    MoveTaskToColumn {
        /// Task being moved.
        task_id: Id,
        /// Destination column.
        column_id: Id,
    },
}

impl BoardCommand {
    /// Short, stable name of the command, used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateColumn { .. } => "create_column",
            Self::UpdateColumnTitle { .. } => "update_column_title",
            Self::DeleteColumn { .. } => "delete_column",
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTaskContent { .. } => "update_task_content",
            Self::DeleteTask { .. } => "delete_task",
            Self::ReorderColumns { .. } => "reorder_columns",
            Self::ReorderTasks { .. } => "reorder_tasks",
            Self::MoveTaskToColumn { .. } => "move_task_to_column",
        }
    }
}

/// A drag-gesture callback as delivered by an input library.
///
/// Only [`DragEvent::End`] with a target commits a change. `End` with
/// `over: None` means the item was released outside any drop target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragEvent {
    /// A drag began on `active`.
    Start {
        /// Item picked up.
        active: Id,
    },
    /// The dragged item hovers over `over`.
    Over {
        /// Item being dragged.
        active: Id,
        /// Current hover target.
        over: Id,
    },
    /// The item was released.
    End {
        /// Item being dragged.
        active: Id,
        /// Drop target, if any.
        over: Option<Id>,
    },
    /// The gesture was aborted (e.g. escape key).
    Cancel,
}
