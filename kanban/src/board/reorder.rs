//! Pure reorder functions over the column and task sequences.
//!
//! These operate on plain slices and vectors so the drag layer can run them
//! against a copy of the board to preview a drop. [`BoardStore`] calls the
//! same functions for committed changes.
//!
//! [`BoardStore`]: super::BoardStore

use kanban_proto::board::{Column, Id, Task};

use super::BoardError;

/// Moves the element at `from` to index `to`, shifting everything between.
///
/// Afterwards the moved element sits at `to` and every other element keeps
/// its relative order. Returns `false` (and leaves `items` alone) when the
/// indices are equal or out of range.
pub fn array_move<T>(items: &mut [T], from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
    true
}

/// Index of the column with `id`, if any.
pub fn column_index(columns: &[Column], id: &Id) -> Option<usize> {
    columns.iter().position(|c| &c.id == id)
}

/// Index of the task with `id`, if any.
pub fn task_index(tasks: &[Task], id: &Id) -> Option<usize> {
    tasks.iter().position(|t| &t.id == id)
}

/// Moves column `active` to the position currently held by column `over`.
///
/// Returns `Ok(false)` when `active == over`.
///
/// # Errors
///
/// Returns [`BoardError::ColumnNotFound`] if either id is missing.
pub fn reorder_columns(columns: &mut [Column], active: &Id, over: &Id) -> Result<bool, BoardError> {
    let from =
        column_index(columns, active).ok_or_else(|| BoardError::ColumnNotFound(active.clone()))?;
    let to = column_index(columns, over).ok_or_else(|| BoardError::ColumnNotFound(over.clone()))?;
    Ok(array_move(columns, from, to))
}

/// Moves task `active` to the position currently held by task `over`.
///
/// If `over` belongs to a different column, `active` adopts that column
/// before the move.
///
/// # Errors
///
/// Returns [`BoardError::TaskNotFound`] if either id is missing.
pub fn reorder_tasks(tasks: &mut [Task], active: &Id, over: &Id) -> Result<bool, BoardError> {
    let from = task_index(tasks, active).ok_or_else(|| BoardError::TaskNotFound(active.clone()))?;
    let to = task_index(tasks, over).ok_or_else(|| BoardError::TaskNotFound(over.clone()))?;
    if from == to {
        return Ok(false);
    }

    let target_column = tasks[to].column_id.clone();
    let reassigned = tasks[from].column_id != target_column;
    if reassigned {
        tasks[from].column_id = target_column;
    }
    let moved = array_move(tasks, from, to);
    Ok(reassigned || moved)
}

/// Moves `task_id` into `column_id`, placing it after that column's last
/// task. If the column is empty the task keeps its place in the sequence.
///
/// # Errors
///
/// Returns [`BoardError::TaskNotFound`] if the task is missing, or
/// [`BoardError::InvalidReference`] if the column does not exist.
pub fn move_task_to_column(
    columns: &[Column],
    tasks: &mut Vec<Task>,
    task_id: &Id,
    column_id: &Id,
) -> Result<bool, BoardError> {
    let from = task_index(tasks, task_id).ok_or_else(|| BoardError::TaskNotFound(task_id.clone()))?;
    if column_index(columns, column_id).is_none() {
        return Err(BoardError::InvalidReference(column_id.clone()));
    }

    let mut task = tasks.remove(from);
    let reassigned = task.column_id != *column_id;
    task.column_id = column_id.clone();

    let to = tasks
        .iter()
        .rposition(|t| &t.column_id == column_id)
        .map_or(from, |last| last + 1);
    tasks.insert(to, task);

    Ok(reassigned || to != from)
}
