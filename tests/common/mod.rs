//! Shared test utilities for settlement integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use puzzle_settle::config::Config;
use puzzle_settle::{
    Difficulty, FixedClock, GameOutcome, MemoryStore, SettlementCoordinator, StatsStore,
    StoreError, UserProgressionStats, Versioned,
};

/// A Wednesday, so no weekend or time-of-day achievements fire
pub const WEDNESDAY_NOON: &str = "2025-03-05T12:00:00+00:00";

pub struct Harness {
    pub coordinator: SettlementCoordinator,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
}

/// Coordinator over a fresh memory store with the clock fixed at `now`
pub fn harness_at(now: &str) -> Harness {
    harness_with(&Config::default(), now)
}

pub fn harness_with(config: &Config, now: &str) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::parse(now).expect("Invalid test timestamp"));
    let coordinator = SettlementCoordinator::from_config(config, store.clone(), clock.clone());
    Harness {
        coordinator,
        store,
        clock,
    }
}

/// A slow, sloppy game that earns no bonus-related achievements
pub fn plain_game(game_id: &str, difficulty: Difficulty) -> GameOutcome {
    GameOutcome::new(game_id, difficulty)
        .with_time(1_000)
        .with_moves(50)
        .with_pieces(9)
}

/// Memory store whose saves can be made to fail
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_saves: AtomicBool,
}

impl StatsStore for FlakyStore {
    fn load(&self, player_id: &str) -> Result<Versioned<UserProgressionStats>, StoreError> {
        self.inner.load(player_id)
    }

    fn save(
        &self,
        player_id: &str,
        stats: &UserProgressionStats,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("disk full".to_string()));
        }
        self.inner.save(player_id, stats, expected_version)
    }
}

/// Memory store where another writer sneaks in before the next `n` saves
#[derive(Default)]
pub struct RacingStore {
    pub inner: MemoryStore,
    pub interleaved_writes: AtomicU32,
}

impl StatsStore for RacingStore {
    fn load(&self, player_id: &str) -> Result<Versioned<UserProgressionStats>, StoreError> {
        self.inner.load(player_id)
    }

    fn save(
        &self,
        player_id: &str,
        stats: &UserProgressionStats,
        expected_version: u64,
    ) -> Result<u64, StoreError> {
        let pending = self.interleaved_writes.load(Ordering::SeqCst);
        if pending > 0 {
            self.interleaved_writes.store(pending - 1, Ordering::SeqCst);
            let current = self.inner.load(player_id)?;
            self.inner.save(player_id, &current.value, current.version)?;
        }
        self.inner.save(player_id, stats, expected_version)
    }
}
