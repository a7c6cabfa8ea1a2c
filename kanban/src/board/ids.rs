//! Id generation for newly created columns and tasks.
//!
//! The store receives its generator at construction so tests can use a
//! predictable sequence while the binary uses time-ordered UUIDs.

use kanban_proto::board::Id;
use uuid::Uuid;

/// Source of fresh ids.
///
/// A generator may repeat an id that is already in use (for example a
/// counter colliding with a seeded id); the store skips such ids and asks
/// again, so generators must eventually yield an unused value.
pub trait IdGenerator {
    /// Returns the next candidate id.
    fn next_id(&mut self) -> Id;
}

/// Time-ordered UUID v7 ids rendered as hyphenated text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> Id {
        Id::new(Uuid::now_v7().to_string())
    }
}

/// Deterministic `prefix` + counter ids (`"1"`, `"2"`, … by default).
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    /// Creates a generator yielding `prefix1`, `prefix2`, …
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Creates a generator whose first id is `prefix{start}`.
    #[must_use]
    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> Id {
        let id = Id::new(format!("{}{}", self.prefix, self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Which generator the binary should build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// [`UuidIdGenerator`].
    #[default]
    Uuid,
    /// [`SequentialIdGenerator`] with no prefix.
    Sequential,
}

impl IdStrategy {
    /// Builds the generator for this strategy.
    #[must_use]
    pub fn build(self) -> Box<dyn IdGenerator> {
        match self {
            Self::Uuid => Box::new(UuidIdGenerator),
            Self::Sequential => Box::new(SequentialIdGenerator::default()),
        }
    }
}
