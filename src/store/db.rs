//! SQLite-backed progression store
//!
//! One row per player: scalar counters as columns, collections as JSON text.
//! The `version` column carries the compare-and-swap counter, so several
//! processes may share one database file.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use super::{StatsStore, StoreError, Versioned};
use crate::config::Config;
use crate::domain::UserProgressionStats;

const SCHEMA_VERSION: i32 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS player_progression (
    player_id TEXT PRIMARY KEY,
    version INTEGER NOT NULL,
    games_completed INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    experience INTEGER NOT NULL DEFAULT 0,
    coins INTEGER NOT NULL DEFAULT 0,
    best_times TEXT NOT NULL DEFAULT '{}',          -- JSON: difficulty -> seconds
    difficulty_completed TEXT NOT NULL DEFAULT '{}',
    unlocked_achievements TEXT NOT NULL DEFAULT '[]',
    recent_results TEXT NOT NULL DEFAULT '[]',
    processed_games TEXT NOT NULL DEFAULT '[]',     -- JSON: [{game_id, receipt}]
    updated_at INTEGER NOT NULL
);
"#;

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at the default location (~/.puzzle-settle/progression.db)
    pub fn open_default() -> Result<Self> {
        Self::open(&Config::global_config_dir().join("progression.db"))
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create db dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progression db: {}", path.display()))?;

        // WAL so a reader in another process never blocks a settlement
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        Self::from_connection(conn)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Backend("Progression DB lock poisoned".to_string()))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);
        if version < SCHEMA_VERSION {
            conn.execute(
                "INSERT OR REPLACE INTO schema_version VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;
        }
        Ok(())
    }

    /// Player ids with stored progression
    pub fn players(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT player_id FROM player_progression ORDER BY player_id")?;
        let ids = stmt
            .query_map([], |r| r.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}

/// Raw row before JSON columns are decoded
struct ProgressionRow {
    version: u64,
    games_completed: u32,
    level: u32,
    experience: u64,
    coins: u64,
    best_times: String,
    difficulty_completed: String,
    unlocked: String,
    recent_results: String,
    processed: String,
}

impl ProgressionRow {
    fn into_versioned(self) -> Result<Versioned<UserProgressionStats>, StoreError> {
        let stats = UserProgressionStats {
            games_completed: self.games_completed,
            level: self.level.max(1),
            experience: self.experience,
            coins: self.coins,
            best_times: serde_json::from_str(&self.best_times)?,
            difficulty_completed: serde_json::from_str(&self.difficulty_completed)?,
            unlocked_achievement_ids: serde_json::from_str(&self.unlocked)?,
            recent_results: serde_json::from_str(&self.recent_results)?,
            processed: serde_json::from_str(&self.processed)?,
        };
        Ok(Versioned::new(self.version, stats))
    }
}

fn read_row(conn: &Connection, player_id: &str) -> Result<Option<ProgressionRow>, StoreError> {
    let row = conn
        .query_row(
            r#"
            SELECT version, games_completed, level, experience, coins,
                   best_times, difficulty_completed, unlocked_achievements,
                   recent_results, processed_games
            FROM player_progression
            WHERE player_id = ?1
            "#,
            params![player_id],
            |r| {
                Ok(ProgressionRow {
                    version: r.get(0)?,
                    games_completed: r.get(1)?,
                    level: r.get(2)?,
                    experience: r.get(3)?,
                    coins: r.get(4)?,
                    best_times: r.get(5)?,
                    difficulty_completed: r.get(6)?,
                    unlocked: r.get(7)?,
                    recent_results: r.get(8)?,
                    processed: r.get(9)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

impl StatsStore for SqliteStore {
    fn load(&self, player_id: &str) -> Result<Versioned<UserProgressionStats>, StoreError> {
        let conn = self.conn()?;
        match read_row(&conn, player_id)? {
            Some(row) => row.into_versioned(),
            None => Ok(Versioned::new(0, UserProgressionStats::default())),
        }
    }

    fn save(
        &self,
        player_id: &str,
        stats: &UserProgressionStats,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        let mut conn = self.conn()?;
        // IMMEDIATE takes the write lock up front, so the version check and
        // the write see the same row even across processes
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let found: u64 = tx
            .query_row(
                "SELECT version FROM player_progression WHERE player_id = ?1",
                params![player_id],
                |r| r.get(0),
            )
            .optional()?
            .unwrap_or(0);
        if found != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                found,
            });
        }

        let version = found + 1;
        tx.execute(
            r#"
            INSERT INTO player_progression (
                player_id, version, games_completed, level, experience, coins,
                best_times, difficulty_completed, unlocked_achievements,
                recent_results, processed_games, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(player_id) DO UPDATE SET
                version = excluded.version,
                games_completed = excluded.games_completed,
                level = excluded.level,
                experience = excluded.experience,
                coins = excluded.coins,
                best_times = excluded.best_times,
                difficulty_completed = excluded.difficulty_completed,
                unlocked_achievements = excluded.unlocked_achievements,
                recent_results = excluded.recent_results,
                processed_games = excluded.processed_games,
                updated_at = excluded.updated_at
            "#,
            params![
                player_id,
                version,
                stats.games_completed,
                stats.level,
                stats.experience,
                stats.coins,
                serde_json::to_string(&stats.best_times)?,
                serde_json::to_string(&stats.difficulty_completed)?,
                serde_json::to_string(&stats.unlocked_achievement_ids)?,
                serde_json::to_string(&stats.recent_results)?,
                serde_json::to_string(&stats.processed)?,
                chrono::Utc::now().timestamp_millis(),
            ],
        )?;
        tx.commit()?;

        tracing::debug!("Saved progression for {} at version {}", player_id, version);
        Ok(version)
    }
}
