//! Drag-gesture session: turns start/over/end callbacks into one commit.
//!
//! Hover events only record the current target. The committed change is
//! derived from the `(active, over)` pair of the end event alone, so a
//! gesture released outside any target, or cancelled, leaves the board
//! exactly as it was before the drag began.

use kanban_proto::board::{BoardSnapshot, Id};
use kanban_proto::command::{BoardCommand, DragEvent};
use thiserror::Error;

use crate::board::{BoardError, BoardStore, CommandOutcome, reorder};

/// Errors raised by drag-gesture handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragError {
    /// A drag-start arrived while another drag is in progress.
    #[error("already dragging {0}")]
    AlreadyDragging(Id),
    /// An over/end event arrived with no drag in progress.
    #[error("no drag in progress")]
    NotDragging,
    /// An over/end event named a different item than the active drag.
    #[error("event for {got} does not match active drag of {expected}")]
    ActiveMismatch {
        /// Item picked up at drag-start.
        expected: Id,
        /// Item named by the event.
        got: Id,
    },
    /// The id is neither a column nor a task on the board.
    #[error("not found on board: {0}")]
    NotFound(Id),
    /// Committing the drop failed.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// What kind of item is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// A whole column (lane reorder).
    Column,
    /// A single task card.
    Task,
}

/// State of an in-flight gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    /// Item picked up.
    pub active: Id,
    /// Whether it is a column or a task.
    pub kind: DragKind,
    /// Last reported hover target.
    pub over: Option<Id>,
}

/// Tracks at most one drag gesture against a [`BoardStore`].
#[derive(Debug, Default)]
pub struct DragSession {
    current: Option<ActiveDrag>,
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture in flight, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&ActiveDrag> {
        self.current.as_ref()
    }

    /// Returns `true` while a gesture is in flight.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.current.is_some()
    }

    /// Begins dragging `active`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::AlreadyDragging`] if a gesture is in flight, or
    /// [`DragError::NotFound`] if `active` is not on the board.
    pub fn start(&mut self, store: &BoardStore, active: Id) -> Result<DragKind, DragError> {
        if let Some(current) = &self.current {
            return Err(DragError::AlreadyDragging(current.active.clone()));
        }
        let kind = classify(store, &active).ok_or_else(|| DragError::NotFound(active.clone()))?;
        tracing::debug!(active = %active, ?kind, "drag started");
        self.current = Some(ActiveDrag {
            active,
            kind,
            over: None,
        });
        Ok(kind)
    }

    /// Records `over` as the hover target. Never touches the board.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] or [`DragError::ActiveMismatch`].
    pub fn over(&mut self, active: &Id, over: Id) -> Result<(), DragError> {
        let current = self.current_for(active)?;
        current.over = Some(over);
        Ok(())
    }

    /// Board as it would look if the current hover target were committed.
    ///
    /// Returns `None` when idle, when nothing is hovered, or when the
    /// target is not a valid drop.
    #[must_use]
    pub fn preview(&self, store: &BoardStore) -> Option<BoardSnapshot> {
        let current = self.current.as_ref()?;
        let over = current.over.as_ref()?;
        let command = plan_drop(store, current, over).ok()?;
        let mut snapshot = store.snapshot();
        apply_reorder(&mut snapshot, &command).ok()?;
        Some(snapshot)
    }

    /// Finishes the gesture and commits the drop, if any.
    ///
    /// `over: None` (released outside any target) commits nothing and
    /// returns `Ok(None)`. The session is idle afterwards, including when
    /// the commit fails.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] or [`DragError::ActiveMismatch`]
    /// (the gesture stays in flight), [`DragError::NotFound`] for an unknown
    /// target, or [`DragError::Board`] if the commit is rejected.
    pub fn end(
        &mut self,
        store: &mut BoardStore,
        active: &Id,
        over: Option<&Id>,
    ) -> Result<Option<CommandOutcome>, DragError> {
        self.current_for(active)?;
        let Some(current) = self.current.take() else {
            return Err(DragError::NotDragging);
        };

        let Some(over) = over else {
            tracing::debug!(active = %active, "drag released outside any target");
            return Ok(None);
        };

        let command = plan_drop(store, &current, over)?;
        let outcome = store.apply(&command)?;
        tracing::debug!(active = %active, over = %over, command = command.name(), "drop committed");
        Ok(Some(outcome))
    }

    /// Aborts the gesture without committing. Returns `true` if a gesture
    /// was in flight.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.current.take().is_some();
        if was_dragging {
            tracing::debug!("drag cancelled");
        }
        was_dragging
    }

    /// Dispatches a [`DragEvent`] to the matching method.
    ///
    /// Only [`DragEvent::End`] with a target can return an outcome.
    ///
    /// # Errors
    ///
    /// Propagates the error of the dispatched method.
    pub fn handle(
        &mut self,
        store: &mut BoardStore,
        event: &DragEvent,
    ) -> Result<Option<CommandOutcome>, DragError> {
        match event {
            DragEvent::Start { active } => {
                self.start(store, active.clone())?;
                Ok(None)
            }
            DragEvent::Over { active, over } => {
                self.over(active, over.clone())?;
                Ok(None)
            }
            DragEvent::End { active, over } => self.end(store, active, over.as_ref()),
            DragEvent::Cancel => {
                self.cancel();
                Ok(None)
            }
        }
    }

    fn current_for(&mut self, active: &Id) -> Result<&mut ActiveDrag, DragError> {
        let current = self.current.as_mut().ok_or(DragError::NotDragging)?;
        if &current.active != active {
            return Err(DragError::ActiveMismatch {
                expected: current.active.clone(),
                got: active.clone(),
            });
        }
        Ok(current)
    }
}

fn classify(store: &BoardStore, id: &Id) -> Option<DragKind> {
    if store.column(id).is_some() {
        Some(DragKind::Column)
    } else if store.task(id).is_some() {
        Some(DragKind::Task)
    } else {
        None
    }
}

/// Chooses the board command for dropping `drag.active` onto `over`.
///
/// A column dropped on a task takes that task's column as its target lane;
/// a task dropped on a column moves to the end of that column.
fn plan_drop(store: &BoardStore, drag: &ActiveDrag, over: &Id) -> Result<BoardCommand, DragError> {
    let active = drag.active.clone();
    let command = match (drag.kind, classify(store, over)) {
        (DragKind::Column, Some(DragKind::Column)) => BoardCommand::ReorderColumns {
            active,
            over: over.clone(),
        },
        (DragKind::Column, Some(DragKind::Task)) => {
            let lane = store
                .task(over)
                .map(|t| t.column_id.clone())
                .ok_or_else(|| DragError::NotFound(over.clone()))?;
            BoardCommand::ReorderColumns { active, over: lane }
        }
        (DragKind::Task, Some(DragKind::Task)) => BoardCommand::ReorderTasks {
            active,
            over: over.clone(),
        },
        (DragKind::Task, Some(DragKind::Column)) => BoardCommand::MoveTaskToColumn {
            task_id: active,
            column_id: over.clone(),
        },
        (_, None) => return Err(DragError::NotFound(over.clone())),
    };
    Ok(command)
}

/// Runs a reorder command against a snapshot copy.
fn apply_reorder(snapshot: &mut BoardSnapshot, command: &BoardCommand) -> Result<bool, BoardError> {
    match command {
        BoardCommand::ReorderColumns { active, over } => {
            reorder::reorder_columns(&mut snapshot.columns, active, over)
        }
        BoardCommand::ReorderTasks { active, over } => {
            reorder::reorder_tasks(&mut snapshot.tasks, active, over)
        }
        BoardCommand::MoveTaskToColumn { task_id, column_id } => {
            reorder::move_task_to_column(&snapshot.columns, &mut snapshot.tasks, task_id, column_id)
        }
        _ => Ok(false),
    }
}
