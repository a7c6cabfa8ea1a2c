//! Board state: ordered columns and tasks with cascading deletes.
//!
//! Every operation naming an id that does not exist fails with a
//! not-found error and leaves the board untouched. Task creation and
//! column reassignment are validated, so a task never points at a column
//! that is gone. Column and task ids share one namespace, so an id alone
//! tells a drag gesture what is being moved.

pub mod ids;
pub mod reorder;
pub mod store;

pub use ids::{IdGenerator, IdStrategy, SequentialIdGenerator, UuidIdGenerator};
pub use reorder::array_move;
pub use store::{BoardStore, CommandOutcome};

use kanban_proto::board::Id;
use thiserror::Error;

/// Errors that can occur during board operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// No column with the given id.
    #[error("column not found: {0}")]
    ColumnNotFound(Id),
    /// No task with the given id.
    #[error("task not found: {0}")]
    TaskNotFound(Id),
    /// A task would reference a column that does not exist.
    #[error("invalid reference: column {0} does not exist")]
    InvalidReference(Id),
    /// Two columns share an id.
    #[error("duplicate column id: {0}")]
    DuplicateColumnId(Id),
    /// Two tasks share an id.
    #[error("duplicate task id: {0}")]
    DuplicateTaskId(Id),
    /// A column and a task share an id.
    #[error("id {0} names both a column and a task")]
    SharedId(Id),
    /// The id generator kept returning ids already in use.
    #[error("no unused id after {attempts} attempts")]
    IdsExhausted {
        /// Ids drawn before giving up.
        attempts: usize,
    },
}

impl BoardError {
    /// Returns `true` for the not-found family of errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ColumnNotFound(_) | Self::TaskNotFound(_))
    }
}
