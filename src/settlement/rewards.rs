//! Base reward calculation
//!
//! `base * time_bonus * move_bonus * difficulty_multiplier`, rounded once at the
//! very end. Every multiplier is at least 1.0, so a completion never earns less
//! than the base row for its difficulty.

use serde::{Deserialize, Serialize};

use crate::config::{DifficultyRewards, FlatReward, RewardConfig};
use crate::domain::{AchievementCategory, Difficulty};

/// Coins and experience earned by the completion itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseReward {
    pub coins: u64,
    pub experience: u64,
}

/// Move-efficiency tier, most generous first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTier {
    /// At or under the perfect-move baseline
    Perfect,
    /// Within `excellent_ratio` of the baseline
    Excellent,
    None,
}

/// Pure reward calculator over an injected reward table
#[derive(Debug, Clone, Default)]
pub struct RewardCalculator {
    config: RewardConfig,
}

impl RewardCalculator {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Compute the reward for a completion. Total: never panics, never fails.
    pub fn compute_base_reward(
        &self,
        difficulty: Difficulty,
        completion_time_secs: u32,
        moves: u32,
        perfect_moves: Option<u32>,
    ) -> BaseReward {
        let row = self.config.row(difficulty);

        let mut coin_factor = 1.0;
        let mut exp_factor = 1.0;

        if earns_time_bonus(&row, completion_time_secs) {
            coin_factor *= at_least_one(self.config.fast.coins);
            exp_factor *= at_least_one(self.config.fast.experience);
        }

        match self.move_tier(moves, perfect_moves) {
            MoveTier::Perfect => {
                coin_factor *= at_least_one(self.config.perfect.coins);
                exp_factor *= at_least_one(self.config.perfect.experience);
            }
            MoveTier::Excellent => {
                coin_factor *= at_least_one(self.config.excellent.coins);
                exp_factor *= at_least_one(self.config.excellent.experience);
            }
            MoveTier::None => {}
        }

        let difficulty_factor = at_least_one(row.multiplier);
        let reward = BaseReward {
            coins: round_reward(row.coins as f64 * (coin_factor * difficulty_factor)),
            experience: round_reward(row.experience as f64 * (exp_factor * difficulty_factor)),
        };

        tracing::debug!(
            "Base reward for {} ({}s, {} moves, perfect {:?}): {} coins, {} exp",
            difficulty,
            completion_time_secs,
            moves,
            perfect_moves,
            reward.coins,
            reward.experience
        );

        reward
    }

    /// Whether `completion_time_secs` earns the fast-completion bonus.
    /// The threshold is inclusive.
    pub fn earns_time_bonus(&self, difficulty: Difficulty, completion_time_secs: u32) -> bool {
        earns_time_bonus(&self.config.row(difficulty), completion_time_secs)
    }

    /// Move-efficiency tier; a missing or zero baseline never earns a tier
    pub fn move_tier(&self, moves: u32, perfect_moves: Option<u32>) -> MoveTier {
        let Some(perfect) = perfect_moves.filter(|p| *p > 0) else {
            return MoveTier::None;
        };

        if moves <= perfect {
            MoveTier::Perfect
        } else if (moves as f64) <= perfect as f64 * self.config.excellent_ratio {
            MoveTier::Excellent
        } else {
            MoveTier::None
        }
    }

    pub fn new_record_bonus(&self) -> FlatReward {
        self.config.new_record
    }

    pub fn achievement_reward(&self, category: AchievementCategory) -> FlatReward {
        self.config.achievement.for_category(category)
    }
}

fn earns_time_bonus(row: &DifficultyRewards, completion_time_secs: u32) -> bool {
    completion_time_secs <= row.time_threshold_secs
}

/// Multipliers below 1.0 (or NaN) are treated as 1.0
fn at_least_one(factor: f64) -> f64 {
    if factor.is_finite() && factor >= 1.0 {
        factor
    } else {
        1.0
    }
}

fn round_reward(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}
