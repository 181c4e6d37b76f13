use std::collections::HashMap;
use std::sync::Mutex;

use super::{StatsStore, StoreError, Versioned};
use crate::domain::UserProgressionStats;

/// In-process store, for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: Mutex<HashMap<String, Versioned<UserProgressionStats>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a player, bumping the version as a save would
    pub fn insert(&self, player_id: &str, stats: UserProgressionStats) -> Result<u64, StoreError> {
        let mut players = self.lock()?;
        let version = players.get(player_id).map_or(0, |v| v.version) + 1;
        players.insert(player_id.to_string(), Versioned::new(version, stats));
        Ok(version)
    }

    pub fn len(&self) -> usize {
        self.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Versioned<UserProgressionStats>>>, StoreError> {
        self.players
            .lock()
            .map_err(|_| StoreError::Backend("Memory store lock poisoned".to_string()))
    }
}

impl StatsStore for MemoryStore {
    fn load(&self, player_id: &str) -> Result<Versioned<UserProgressionStats>, StoreError> {
        Ok(self
            .lock()?
            .get(player_id)
            .cloned()
            .unwrap_or_else(|| Versioned::new(0, UserProgressionStats::default())))
    }

    fn save(
        &self,
        player_id: &str,
        stats: &UserProgressionStats,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        let mut players = self.lock()?;
        let found = players.get(player_id).map_or(0, |v| v.version);
        if found != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                found,
            });
        }

        let version = found + 1;
        players.insert(player_id.to_string(), Versioned::new(version, stats.clone()));
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_player_loads_defaults() {
        let store = MemoryStore::new();
        let loaded = store.load("nobody").unwrap();
        assert_eq!(loaded.version, 0);
        assert_eq!(loaded.value, UserProgressionStats::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_is_compare_and_swap() {
        let store = MemoryStore::new();
        let mut stats = UserProgressionStats::default();
        stats.coins = 10;

        assert_eq!(store.save("p1", &stats, 0).unwrap(), 1);

        let err = store.save("p1", &stats, 0).unwrap_err();
        assert!(err.is_conflict());

        stats.coins = 20;
        assert_eq!(store.save("p1", &stats, 1).unwrap(), 2);
        assert_eq!(store.load("p1").unwrap().value.coins, 20);
    }
}
