//! Puzzle Settle - game-completion settlement for a casual puzzle game
//!
//! Given a finished puzzle, puzzle-settle computes the coin and experience
//! reward, folds experience into the player's level, decides which
//! achievements newly unlock, and persists all of it exactly once per game.
//!
//! ## Components
//!
//! 1. **RewardCalculator**: base reward from difficulty, time and moves.
//! 2. **LevelingEngine**: quadratic experience curve.
//! 3. **AchievementEngine**: data-driven catalog behind an official allow-list.
//! 4. **SettlementCoordinator**: the idempotent `settle` entry point, and the
//!    only component that writes player stats.

pub mod config;
pub mod domain;
pub mod settlement;
pub mod store;

pub use domain::*;
pub use settlement::{
    AchievementCatalog, AchievementEngine, Clock, FixedClock, LevelingEngine, RewardCalculator,
    SettlementCoordinator, SettlementError, SystemClock,
};
pub use store::{MemoryStore, SqliteStore, StatsStore, StoreError, Versioned};
