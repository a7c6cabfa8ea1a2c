//! `kanban` — in-memory Kanban board engine.
//!
//! [`board::BoardStore`] owns the columns and tasks, [`drag::DragSession`]
//! turns drag-gesture callbacks into reorder commits, and [`shell`] drives
//! both from line-oriented text commands.

pub mod board;
pub mod config;
pub mod drag;
pub mod shell;
