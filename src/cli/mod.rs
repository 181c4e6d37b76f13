//! CLI command implementations

pub mod achievements;
pub mod init;
pub mod settle;
pub mod stats;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use puzzle_settle::config::Config;
use puzzle_settle::settlement::{SettlementCoordinator, SystemClock};
use puzzle_settle::store::SqliteStore;

/// Load the config from `path`, or the global config when none was given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
}

/// Open the progression database at `path`, or the default location
pub fn open_store(path: Option<&Path>) -> Result<SqliteStore> {
    match path {
        Some(path) => SqliteStore::open(path),
        None => SqliteStore::open_default(),
    }
}

pub fn coordinator(config: &Config, store: SqliteStore) -> SettlementCoordinator {
    SettlementCoordinator::from_config(config, Arc::new(store), Arc::new(SystemClock))
}
