//! Line-oriented command shell over a [`BoardStore`] and a [`DragSession`].
//!
//! Each input line is one command. Mutations print the resulting snapshot;
//! rejected commands print an `error:` line and the shell keeps going.
//!
//! ```text
//! column add Doing
//! task add todo
//! task edit 3 write the release notes
//! drag start 3
//! drag over 3 2
//! drag end 3 2
//! show todo
//! ```

use std::io::{self, BufRead, Write};

use kanban_proto::board::{BoardSnapshot, Id, Task};
use kanban_proto::command::{BoardCommand, DragEvent};
use thiserror::Error;

use crate::board::{BoardError, BoardStore, CommandOutcome};
use crate::config::OutputFormat;
use crate::drag::{DragError, DragSession};

const HELP: &str = "\
commands:
  column add <title>            column rename <id> <title>
  column delete <id>            column move <id> <over-id>
  task add <column-id>          task edit <id> <content>
  task delete <id>              task move <id> <over-id>
  task drop <id> <column-id>
  drag start <id>               drag over <id> <over-id>
  drag end <id> [over-id]       drag cancel
  show [column-id]              help
  quit";

/// Errors produced while parsing or executing a shell line.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The first words did not name a command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// A required argument was absent.
    #[error("{command}: missing {argument}")]
    MissingArgument {
        /// Command being parsed.
        command: &'static str,
        /// Name of the absent argument.
        argument: &'static str,
    },
    /// A board operation was rejected.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// A drag event was rejected.
    #[error(transparent)]
    Drag(#[from] DragError),
    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),
    /// JSON rendering failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// A board mutation.
    Board(BoardCommand),
    /// A drag-gesture event.
    Drag(DragEvent),
    /// Print the board, or one column's tasks.
    Show(Option<Id>),
    /// Print the command list.
    Help,
    /// Stop reading input.
    Quit,
}

/// What executing a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Board after a mutation (or for `show`).
    Snapshot(BoardSnapshot),
    /// A valid command that changed nothing.
    Unchanged,
    /// Projected board while hovering.
    Preview(BoardSnapshot),
    /// Tasks of a single column.
    Tasks(Vec<Task>),
    /// Drag ended with no drop, or a bookkeeping event.
    Nothing,
    /// Help text requested.
    Help,
    /// Input should stop.
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`ShellError::UnknownCommand`] or [`ShellError::MissingArgument`].
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (head, rest) = split_word(line);
    let (verb, args) = split_word(rest);
    let command = match (head, verb) {
        ("column", "add") => ShellCommand::Board(BoardCommand::CreateColumn {
            title: args.to_string(),
        }),
        ("column", "rename") => {
            let (id, title) = split_word(args);
            ShellCommand::Board(BoardCommand::UpdateColumnTitle {
                id: required("column rename", "id", id)?,
                title: title.to_string(),
            })
        }
        ("column", "delete") => ShellCommand::Board(BoardCommand::DeleteColumn {
            id: required("column delete", "id", args)?,
        }),
        ("column", "move") => {
            let (active, over) = two_ids("column move", args)?;
            ShellCommand::Board(BoardCommand::ReorderColumns { active, over })
        }
        ("task", "add") => ShellCommand::Board(BoardCommand::CreateTask {
            column_id: required("task add", "column-id", args)?,
        }),
        ("task", "edit") => {
            let (id, content) = split_word(args);
            ShellCommand::Board(BoardCommand::UpdateTaskContent {
                id: required("task edit", "id", id)?,
                content: content.to_string(),
            })
        }
        ("task", "delete") => ShellCommand::Board(BoardCommand::DeleteTask {
            id: required("task delete", "id", args)?,
        }),
        ("task", "move") => {
            let (active, over) = two_ids("task move", args)?;
            ShellCommand::Board(BoardCommand::ReorderTasks { active, over })
        }
        ("task", "drop") => {
            let (task_id, column_id) = two_ids("task drop", args)?;
            ShellCommand::Board(BoardCommand::MoveTaskToColumn { task_id, column_id })
        }
        ("drag", "start") => ShellCommand::Drag(DragEvent::Start {
            active: required("drag start", "id", args)?,
        }),
        ("drag", "over") => {
            let (active, over) = two_ids("drag over", args)?;
            ShellCommand::Drag(DragEvent::Over { active, over })
        }
        ("drag", "end") => {
            let (active, over) = split_word(args);
            ShellCommand::Drag(DragEvent::End {
                active: required("drag end", "id", active)?,
                over: (!over.is_empty()).then(|| Id::from(over)),
            })
        }
        ("drag", "cancel") => ShellCommand::Drag(DragEvent::Cancel),
        ("show", column) => {
            let column = format!("{column} {args}");
            let column = column.trim();
            ShellCommand::Show((!column.is_empty()).then(|| Id::from(column)))
        }
        ("help", _) => ShellCommand::Help,
        ("quit" | "exit", _) => ShellCommand::Quit,
        _ => return Err(ShellError::UnknownCommand(line.to_string())),
    };
    Ok(Some(command))
}

/// Splits off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    s.split_once(char::is_whitespace)
        .map_or((s, ""), |(word, rest)| (word, rest.trim_start()))
}

fn required(command: &'static str, argument: &'static str, value: &str) -> Result<Id, ShellError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ShellError::MissingArgument { command, argument });
    }
    Ok(Id::from(value))
}

fn two_ids(command: &'static str, args: &str) -> Result<(Id, Id), ShellError> {
    let (first, second) = split_word(args);
    Ok((
        required(command, "id", first)?,
        required(command, "over-id", second)?,
    ))
}

/// Interactive session: one board, one drag gesture at a time.
#[derive(Debug)]
pub struct Shell {
    store: BoardStore,
    drag: DragSession,
    format: OutputFormat,
}

impl Shell {
    /// Creates a shell over `store`.
    #[must_use]
    pub fn new(store: BoardStore, format: OutputFormat) -> Self {
        Self {
            store,
            drag: DragSession::new(),
            format,
        }
    }

    /// The board being edited.
    #[must_use]
    pub const fn store(&self) -> &BoardStore {
        &self.store
    }

    /// The drag session.
    #[must_use]
    pub const fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Board`] or [`ShellError::Drag`] when the
    /// operation is rejected; the board is unchanged in that case.
    pub fn execute(&mut self, command: ShellCommand) -> Result<Reply, ShellError> {
        let reply = match command {
            ShellCommand::Board(command) => match self.store.apply(&command)? {
                CommandOutcome::Unchanged => Reply::Unchanged,
                _ => Reply::Snapshot(self.store.snapshot()),
            },
            ShellCommand::Drag(event) => match self.drag.handle(&mut self.store, &event)? {
                Some(CommandOutcome::Unchanged) => Reply::Unchanged,
                Some(_) => Reply::Snapshot(self.store.snapshot()),
                None if matches!(event, DragEvent::Over { .. }) => self
                    .drag
                    .preview(&self.store)
                    .map_or(Reply::Nothing, Reply::Preview),
                None => Reply::Nothing,
            },
            ShellCommand::Show(None) => Reply::Snapshot(self.store.snapshot()),
            ShellCommand::Show(Some(column_id)) => {
                if self.store.column(&column_id).is_none() {
                    return Err(BoardError::ColumnNotFound(column_id).into());
                }
                Reply::Tasks(
                    self.store
                        .tasks_for_column(&column_id)
                        .into_iter()
                        .cloned()
                        .collect(),
                )
            }
            ShellCommand::Help => Reply::Help,
            ShellCommand::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    /// Parses and executes one line.
    ///
    /// # Errors
    ///
    /// Returns any parse or execution error.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Reply>, ShellError> {
        parse_line(line)?.map(|command| self.execute(command)).transpose()
    }

    /// Reads commands from `input` until end of input or `quit`, writing
    /// replies and errors to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.execute_line(&line) {
                Ok(None) => {}
                Ok(Some(Reply::Quit)) => break,
                Ok(Some(reply)) => {
                    if let Err(e) = self.render(&reply, output) {
                        tracing::error!(error = %e, "failed to render reply");
                        return Err(io::Error::other(e));
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, line = %line, "command rejected");
                    writeln!(output, "error: {e}")?;
                }
            }
        }
        output.flush()
    }

    /// Writes `reply` in the configured format.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] or [`ShellError::Json`].
    pub fn render<W: Write>(&self, reply: &Reply, output: &mut W) -> Result<(), ShellError> {
        match (self.format, reply) {
            (_, Reply::Help) => writeln!(output, "{HELP}")?,
            (_, Reply::Quit | Reply::Nothing) => {}
            (OutputFormat::Text, Reply::Unchanged) => writeln!(output, "(unchanged)")?,
            (OutputFormat::Text, Reply::Snapshot(snapshot)) => write_board(output, snapshot)?,
            (OutputFormat::Text, Reply::Preview(snapshot)) => {
                writeln!(output, "preview:")?;
                write_board(output, snapshot)?;
            }
            (OutputFormat::Text, Reply::Tasks(tasks)) => {
                for task in tasks {
                    writeln!(output, "{}: {}", task.id, task.content)?;
                }
            }
            (OutputFormat::Json, Reply::Unchanged) => {
                writeln!(output, "{}", serde_json::json!({ "unchanged": true }))?;
            }
            (OutputFormat::Json, Reply::Snapshot(snapshot)) => {
                writeln!(output, "{}", serde_json::to_string(snapshot)?)?;
            }
            (OutputFormat::Json, Reply::Preview(snapshot)) => {
                writeln!(output, "{}", serde_json::json!({ "preview": snapshot }))?;
            }
            (OutputFormat::Json, Reply::Tasks(tasks)) => {
                writeln!(output, "{}", serde_json::to_string(tasks)?)?;
            }
        }
        Ok(())
    }
}

/// Text rendering: one header per lane, tasks indented beneath.
fn write_board<W: Write>(output: &mut W, snapshot: &BoardSnapshot) -> io::Result<()> {
    if snapshot.columns.is_empty() {
        return writeln!(output, "(no columns)");
    }
    for column in &snapshot.columns {
        writeln!(output, "[{}] {}", column.id, column.title)?;
        let tasks = snapshot.tasks_for_column(&column.id);
        if tasks.is_empty() {
            writeln!(output, "  (empty)")?;
        }
        for task in tasks {
            writeln!(output, "  - {}: {}", task.id, task.content)?;
        }
    }
    Ok(())
}
