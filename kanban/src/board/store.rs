//! Board store owning the canonical column and task sequences.
//!
//! `BoardStore` is the only writer of board state. Each operation either
//! applies completely or returns an error with the board unchanged, and
//! [`BoardStore::snapshot`] hands the presentation layer a copy to render.

use kanban_proto::board::{BoardSnapshot, Column, Id, Task};
use kanban_proto::command::BoardCommand;

use super::BoardError;
use super::ids::IdGenerator;
use super::reorder;

/// Default prefix for the content of freshly created tasks ("Task 3").
pub const DEFAULT_TASK_PLACEHOLDER_PREFIX: &str = "Task";

/// Ids drawn from the generator before creation gives up.
pub const MAX_ID_ATTEMPTS: usize = 1024;

/// Result of applying a [`BoardCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A column was appended.
    ColumnCreated(Column),
    /// A task was appended.
    TaskCreated(Task),
    /// The board changed.
    Updated,
    /// The command was valid but changed nothing (e.g. a drop onto itself).
    Unchanged,
}

/// Ordered, in-memory board of columns and tasks.
pub struct BoardStore {
    /// Columns in lane order.
    columns: Vec<Column>,
    /// All tasks; relative order is intra-column display order.
    tasks: Vec<Task>,
    /// Source of ids for created columns and tasks.
    ids: Box<dyn IdGenerator>,
    /// Content prefix for placeholder tasks.
    placeholder_prefix: String,
}

impl std::fmt::Debug for BoardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore")
            .field("columns", &self.columns)
            .field("tasks", &self.tasks)
            .field("placeholder_prefix", &self.placeholder_prefix)
            .finish_non_exhaustive()
    }
}

impl BoardStore {
    /// Creates an empty board that draws ids from `ids`.
    #[must_use]
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            columns: Vec::new(),
            tasks: Vec::new(),
            ids,
            placeholder_prefix: DEFAULT_TASK_PLACEHOLDER_PREFIX.to_string(),
        }
    }

    /// Creates a board pre-populated from `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateColumnId`] or
    /// [`BoardError::DuplicateTaskId`] if ids repeat,
    /// [`BoardError::SharedId`] if a column and a task share an id, or
    /// [`BoardError::InvalidReference`] if a task names a missing column.
    pub fn from_snapshot(
        snapshot: BoardSnapshot,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, BoardError> {
        validate_snapshot(&snapshot)?;
        let mut store = Self::new(ids);
        store.columns = snapshot.columns;
        store.tasks = snapshot.tasks;
        Ok(store)
    }

    /// Sets the content prefix used by [`create_task`](Self::create_task).
    #[must_use]
    pub fn with_placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_prefix = prefix.into();
        self
    }

    // --- queries ---

    /// Columns in lane order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All tasks in sequence order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Column ids in lane order.
    #[must_use]
    pub fn column_ids(&self) -> Vec<&Id> {
        self.columns.iter().map(|c| &c.id).collect()
    }

    /// Looks up a column by id.
    #[must_use]
    pub fn column(&self, id: &Id) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &Id) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Tasks owned by `column_id`, in display order.
    ///
    /// Returns an empty vec for an unknown column.
    #[must_use]
    pub fn tasks_for_column(&self, column_id: &Id) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| &t.column_id == column_id)
            .collect()
    }

    /// Copies the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(self.columns.clone(), self.tasks.clone())
    }

    // --- columns ---

    /// Appends a column with a fresh id. Any title, including an empty
    /// one, is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::IdsExhausted`] if the generator yields no
    /// unused id within [`MAX_ID_ATTEMPTS`] draws.
    pub fn create_column(&mut self, title: impl Into<String>) -> Result<Column, BoardError> {
        let id = self.fresh_id()?;
        let column = Column {
            id,
            title: title.into(),
        };
        tracing::debug!(column_id = %column.id, "column created");
        self.columns.push(column.clone());
        Ok(column)
    }

    /// Replaces the title of column `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ColumnNotFound`] if the column does not exist.
    pub fn update_column_title(&mut self, id: &Id, title: impl Into<String>) -> Result<(), BoardError> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| BoardError::ColumnNotFound(id.clone()))?;
        column.title = title.into();
        tracing::debug!(column_id = %id, "column renamed");
        Ok(())
    }

    /// Removes column `id` together with every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ColumnNotFound`] if the column does not exist.
    pub fn delete_column(&mut self, id: &Id) -> Result<(), BoardError> {
        let index = reorder::column_index(&self.columns, id)
            .ok_or_else(|| BoardError::ColumnNotFound(id.clone()))?;
        self.columns.remove(index);

        let before = self.tasks.len();
        self.tasks.retain(|t| &t.column_id != id);
        tracing::debug!(
            column_id = %id,
            cascaded_tasks = before - self.tasks.len(),
            "column deleted"
        );
        Ok(())
    }

    /// Moves column `active` to the position of column `over`.
    ///
    /// Returns `Ok(false)` when `active == over`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ColumnNotFound`] if either column is missing.
    pub fn reorder_columns(&mut self, active: &Id, over: &Id) -> Result<bool, BoardError> {
        let moved = reorder::reorder_columns(&mut self.columns, active, over)?;
        if moved {
            tracing::debug!(active = %active, over = %over, "columns reordered");
        }
        Ok(moved)
    }

    // --- tasks ---

    /// Appends a task to column `column_id` with placeholder content
    /// `"<prefix> <n>"`, where `n` is the new task count.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidReference`] if the column does not exist,
    /// or [`BoardError::IdsExhausted`] if no unused id could be drawn.
    pub fn create_task(&mut self, column_id: &Id) -> Result<Task, BoardError> {
        if self.column(column_id).is_none() {
            return Err(BoardError::InvalidReference(column_id.clone()));
        }
        let id = self.fresh_id()?;
        let task = Task {
            id,
            column_id: column_id.clone(),
            content: format!("{} {}", self.placeholder_prefix, self.tasks.len() + 1),
        };
        tracing::debug!(task_id = %task.id, column_id = %column_id, "task created");
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Replaces the content of task `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if the task does not exist.
    pub fn update_task_content(&mut self, id: &Id, content: impl Into<String>) -> Result<(), BoardError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))?;
        task.content = content.into();
        tracing::debug!(task_id = %id, "task content updated");
        Ok(())
    }

    /// Removes task `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if the task does not exist.
    pub fn delete_task(&mut self, id: &Id) -> Result<(), BoardError> {
        let index = reorder::task_index(&self.tasks, id)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))?;
        self.tasks.remove(index);
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Moves task `active` to the position of task `over`, adopting
    /// `over`'s column when they differ.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if either task is missing.
    pub fn reorder_tasks(&mut self, active: &Id, over: &Id) -> Result<bool, BoardError> {
        let moved = reorder::reorder_tasks(&mut self.tasks, active, over)?;
        if moved {
            tracing::debug!(active = %active, over = %over, "tasks reordered");
        }
        Ok(moved)
    }

    /// Drops task `task_id` onto column `column_id`, after its last task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if the task is missing, or
    /// [`BoardError::InvalidReference`] if the column does not exist.
    pub fn move_task_to_column(&mut self, task_id: &Id, column_id: &Id) -> Result<bool, BoardError> {
        let moved = reorder::move_task_to_column(&self.columns, &mut self.tasks, task_id, column_id)?;
        if moved {
            tracing::debug!(task_id = %task_id, column_id = %column_id, "task moved to column");
        }
        Ok(moved)
    }

    /// Applies a serialized command.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation; the board is left
    /// unchanged on error.
    pub fn apply(&mut self, command: &BoardCommand) -> Result<CommandOutcome, BoardError> {
        let changed = |moved: bool| {
            if moved {
                CommandOutcome::Updated
            } else {
                CommandOutcome::Unchanged
            }
        };

        let outcome = match command {
            BoardCommand::CreateColumn { title } => {
                CommandOutcome::ColumnCreated(self.create_column(title.clone())?)
            }
            BoardCommand::UpdateColumnTitle { id, title } => {
                self.update_column_title(id, title.clone())?;
                CommandOutcome::Updated
            }
            BoardCommand::DeleteColumn { id } => {
                self.delete_column(id)?;
                CommandOutcome::Updated
            }
            BoardCommand::CreateTask { column_id } => {
                CommandOutcome::TaskCreated(self.create_task(column_id)?)
            }
            BoardCommand::UpdateTaskContent { id, content } => {
                self.update_task_content(id, content.clone())?;
                CommandOutcome::Updated
            }
            BoardCommand::DeleteTask { id } => {
                self.delete_task(id)?;
                CommandOutcome::Updated
            }
            BoardCommand::ReorderColumns { active, over } => {
                changed(self.reorder_columns(active, over)?)
            }
            BoardCommand::ReorderTasks { active, over } => changed(self.reorder_tasks(active, over)?),
            BoardCommand::MoveTaskToColumn { task_id, column_id } => {
                changed(self.move_task_to_column(task_id, column_id)?)
            }
        };
        Ok(outcome)
    }

    /// Draws ids until one is used by neither a column nor a task.
    fn fresh_id(&mut self) -> Result<Id, BoardError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if self.column(&id).is_none() && self.task(&id).is_none() {
                return Ok(id);
            }
            tracing::trace!(id = %id, "generated id already in use, drawing another");
        }
        tracing::warn!(attempts = MAX_ID_ATTEMPTS, "id generator exhausted");
        Err(BoardError::IdsExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

/// Checks id uniqueness and task references of a seed snapshot.
fn validate_snapshot(snapshot: &BoardSnapshot) -> Result<(), BoardError> {
    let mut column_ids = std::collections::HashSet::new();
    for column in &snapshot.columns {
        if !column_ids.insert(&column.id) {
            return Err(BoardError::DuplicateColumnId(column.id.clone()));
        }
    }
    let mut task_ids = std::collections::HashSet::new();
    for task in &snapshot.tasks {
        if !task_ids.insert(&task.id) {
            return Err(BoardError::DuplicateTaskId(task.id.clone()));
        }
        if column_ids.contains(&task.id) {
            return Err(BoardError::SharedId(task.id.clone()));
        }
        if !column_ids.contains(&task.column_id) {
            return Err(BoardError::InvalidReference(task.column_id.clone()));
        }
    }
    Ok(())
}
