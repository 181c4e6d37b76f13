//! Persistence for player progression
//!
//! Stores hand out a version with every load and only accept a save against
//! the version that was loaded. The coordinator retries on
//! [`StoreError::VersionConflict`], which is what keeps several processes
//! sharing one database from double-applying a settlement.

mod db;
mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use crate::domain::UserProgressionStats;

/// A value together with the store version it was read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    /// 0 means the record has never been saved
    pub version: u64,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn new(version: u64, value: T) -> Self {
        Self { version, value }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Version conflict: expected {expected}, found {found}")]
    VersionConflict { expected: u64, found: u64 },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to (de)serialize stats: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Progression persistence used by the settlement coordinator
pub trait StatsStore: Send + Sync {
    /// Load a player's stats. Unknown players get default stats at version 0.
    fn load(&self, player_id: &str) -> Result<Versioned<UserProgressionStats>, StoreError>;

    /// Atomically replace a player's stats if the stored version still equals
    /// `expected_version`. Returns the new version.
    fn save(
        &self,
        player_id: &str,
        stats: &UserProgressionStats,
        expected_version: u64,
    ) -> Result<u64, StoreError>;
}
