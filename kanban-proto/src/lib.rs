//! Shared data model and command vocabulary for the Kanban board engine.

pub mod board;
pub mod codec;
pub mod command;
