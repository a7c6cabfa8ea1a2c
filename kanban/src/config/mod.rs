//! Configuration for the `kanban` binary.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/kanban/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;

use kanban_proto::board::{BoardSnapshot, Column, Task};

use crate::board::store::DEFAULT_TASK_PLACEHOLDER_PREFIX;
use crate::board::{BoardError, BoardStore, IdStrategy};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The configured seed board breaks a board invariant.
    #[error("invalid seed board: {0}")]
    InvalidSeed(#[from] BoardError),
}

/// How the shell prints snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lanes.
    #[default]
    Text,
    /// One JSON object per snapshot.
    Json,
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    board: BoardFileConfig,
    output: OutputFileConfig,
}

/// `[board]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    task_placeholder_prefix: Option<String>,
    id_strategy: Option<IdStrategy>,
    seed_default_board: Option<bool>,
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

/// `[output]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct OutputFileConfig {
    format: Option<OutputFormat>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// The board every session starts from unless configured otherwise: one
/// `todo` lane holding a single task.
#[must_use]
pub fn default_seed() -> BoardSnapshot {
    BoardSnapshot::new(
        vec![Column::new("todo", "tarefas")],
        vec![Task::new("1", "todo", "teste1")],
    )
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Content prefix for placeholder tasks.
    pub task_placeholder_prefix: String,
    /// Id generator for created columns and tasks.
    pub id_strategy: IdStrategy,
    /// Initial board contents.
    pub seed: BoardSnapshot,
    /// Snapshot output format.
    pub output_format: OutputFormat,
    /// Command script to run instead of reading stdin.
    pub script: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            task_placeholder_prefix: DEFAULT_TASK_PLACEHOLDER_PREFIX.to_string(),
            id_strategy: IdStrategy::default(),
            seed: default_seed(),
            output_format: OutputFormat::default(),
            script: None,
        }
    }
}

impl BoardConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit config file cannot be read or
    /// parsed, or if the default file exists but is malformed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, file))
    }

    /// Like [`load`](Self::load), but a broken default config file only
    /// logs a warning and falls back to compiled defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file named by `--config` cannot be
    /// read or parsed.
    pub fn load_or_default(cli: &CliArgs) -> Result<Self, ConfigError> {
        match Self::load(cli) {
            Ok(config) => Ok(config),
            Err(e) if cli.config.is_some() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring default config file");
                Ok(Self::resolve(cli, ConfigFile::default()))
            }
        }
    }

    /// Resolve a `BoardConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. An explicit `[[board.columns]]` seed
    /// replaces the default board; `--empty` or
    /// `seed_default_board = false` without one starts empty.
    fn resolve(cli: &CliArgs, file: ConfigFile) -> Self {
        let defaults = Self::default();

        let seed = if cli.empty {
            BoardSnapshot::default()
        } else if !file.board.columns.is_empty() || !file.board.tasks.is_empty() {
            BoardSnapshot::new(file.board.columns, file.board.tasks)
        } else if file.board.seed_default_board.unwrap_or(true) {
            defaults.seed
        } else {
            BoardSnapshot::default()
        };

        let output_format = if cli.json {
            OutputFormat::Json
        } else {
            file.output.format.unwrap_or(defaults.output_format)
        };

        Self {
            task_placeholder_prefix: file
                .board
                .task_placeholder_prefix
                .unwrap_or(defaults.task_placeholder_prefix),
            id_strategy: cli
                .id_strategy
                .or(file.board.id_strategy)
                .unwrap_or(defaults.id_strategy),
            seed,
            output_format,
            script: cli.script.clone(),
        }
    }

    /// Builds the store described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeed`] if the seed board has repeated
    /// ids or tasks pointing at missing columns.
    pub fn build_store(&self) -> Result<BoardStore, ConfigError> {
        let store = BoardStore::from_snapshot(self.seed.clone(), self.id_strategy.build())?
            .with_placeholder_prefix(self.task_placeholder_prefix.clone());
        Ok(store)
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "In-memory Kanban board driven by line commands")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/kanban/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read commands from this file instead of stdin.
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Print snapshots as JSON.
    #[arg(long)]
    pub json: bool,

    /// Start with an empty board instead of the seed board.
    #[arg(long)]
    pub empty: bool,

    /// Id generator for new columns and tasks.
    #[arg(long, value_enum, env = "KANBAN_ID_STRATEGY")]
    pub id_strategy: Option<IdStrategy>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "KANBAN_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/kanban.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("kanban").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
