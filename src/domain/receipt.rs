use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::AwardedAchievement;

/// Outcome of settling one game
///
/// This is the only channel through which coins, experience, level-ups and
/// achievements reach the caller. Replaying a settled game returns the stored
/// receipt unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub game_id: String,
    pub settled_at: DateTime<FixedOffset>,
    /// Base reward plus record and achievement bonuses
    pub coins_awarded: u64,
    pub experience_awarded: u64,
    pub leveled_up: bool,
    pub levels_gained: u32,
    pub new_level: u32,
    pub total_experience: u64,
    pub total_coins: u64,
    pub new_achievements: Vec<AwardedAchievement>,
    pub is_new_record: bool,
}

impl SettlementReceipt {
    /// A receipt that awards nothing
    pub fn empty(game_id: impl Into<String>, settled_at: DateTime<FixedOffset>) -> Self {
        Self {
            game_id: game_id.into(),
            settled_at,
            coins_awarded: 0,
            experience_awarded: 0,
            leveled_up: false,
            levels_gained: 0,
            new_level: 1,
            total_experience: 0,
            total_coins: 0,
            new_achievements: Vec::new(),
            is_new_record: false,
        }
    }

    pub fn achievement_ids(&self) -> impl Iterator<Item = &str> {
        self.new_achievements.iter().map(|a| a.id.as_str())
    }
}
