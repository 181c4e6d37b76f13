//! Game-completion settlement
//!
//! Turns a finished game into coins, experience, levels and achievements,
//! exactly once per game id.
//!
//! # Flow
//!
//! ```text
//! GameOutcome ──► SettlementCoordinator::settle
//!                   │  load stats (versioned)
//!                   │  replay? ──► stored receipt
//!                   │  RewardCalculator ──► base reward + record bonus
//!                   │  LevelingEngine   ──► level after base reward
//!                   │  AchievementEngine──► new official achievements
//!                   │  LevelingEngine   ──► level after achievement rewards
//!                   ▼  save (compare-and-swap)
//!                SettlementReceipt
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let coordinator = SettlementCoordinator::from_config(
//!     &config,
//!     Arc::new(SqliteStore::open_default()?),
//!     Arc::new(SystemClock),
//! );
//! let receipt = coordinator.settle("player-1", outcome)?;
//! ```

pub mod achievements;
mod clock;
mod coordinator;
mod error;
mod levels;
mod rewards;

pub use achievements::{
    AchievementCatalog, AchievementContext, AchievementDefinition, AchievementEngine, Evaluation,
    Rule, ACHIEVEMENTS,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use coordinator::{SettlementCoordinator, SettlementPlan};
pub use error::{PredicateError, SettlementError};
pub use levels::{ExperienceGain, LevelProgress, LevelingEngine};
pub use rewards::{BaseReward, MoveTier, RewardCalculator};
