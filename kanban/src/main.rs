//! `kanban` — in-memory Kanban board driven by line commands.
//!
//! Reads commands from stdin (or `--script`) and prints the board after
//! every change. Configuration via CLI flags, environment variables, or
//! config file (`~/.config/kanban/config.toml`).
//!
//! ```bash
//! # Interactive, starting from the seed board
//! cargo run --bin kanban
//!
//! # Scripted, JSON snapshots, sequential ids
//! cargo run --bin kanban -- --script board.txt --json --id-strategy sequential
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use kanban::config::{BoardConfig, CliArgs};
use kanban::shell::Shell;

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Logs go to a file; stdout carries the board.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match BoardConfig::load_or_default(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let store = match config.build_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        columns = store.columns().len(),
        tasks = store.tasks().len(),
        id_strategy = ?config.id_strategy,
        "kanban starting"
    );

    let mut shell = Shell::new(store, config.output_format);
    let mut stdout = io::stdout().lock();
    let result = match &config.script {
        Some(path) => shell.run(BufReader::new(File::open(path)?), &mut stdout),
        None => shell.run(io::stdin().lock(), &mut stdout),
    };

    tracing::info!("kanban exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("kanban.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
