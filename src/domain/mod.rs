//! Core domain types for settlement

mod achievement;
mod difficulty;
mod game;
mod progression;
mod receipt;

pub use achievement::{AchievementCategory, AwardedAchievement};
pub use difficulty::Difficulty;
pub use game::{GameOutcome, GameResult};
pub use progression::{ProcessedGame, RecentResult, UserProgressionStats};
pub use receipt::SettlementReceipt;
