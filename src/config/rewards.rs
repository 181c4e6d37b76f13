//! Reward tables

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AchievementCategory, Difficulty};

/// Per-difficulty reward row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRewards {
    pub coins: u64,
    pub experience: u64,
    /// Applied to the whole composed reward
    pub multiplier: f64,
    /// Completions at or under this many seconds earn the fast bonus
    pub time_threshold_secs: u32,
}

impl DifficultyRewards {
    pub const fn new(coins: u64, experience: u64, multiplier: f64, time_threshold_secs: u32) -> Self {
        Self {
            coins,
            experience,
            multiplier,
            time_threshold_secs,
        }
    }

    /// Row used when neither the requested difficulty nor `easy` is configured
    pub const EASY_FALLBACK: DifficultyRewards = DifficultyRewards::new(10, 5, 1.0, 120);
}

/// Bonus multiplier, separately for coins and experience
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusMultiplier {
    pub coins: f64,
    pub experience: f64,
}

/// Fixed reward amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatReward {
    pub coins: u64,
    pub experience: u64,
}

/// Reward paid per surfaced achievement, by category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRewards {
    #[serde(default = "default_progress_reward")]
    pub progress: FlatReward,
    #[serde(default = "default_performance_reward")]
    pub performance: FlatReward,
    #[serde(default = "default_special_reward")]
    pub special: FlatReward,
    #[serde(default = "default_milestone_reward")]
    pub milestone: FlatReward,
}

impl AchievementRewards {
    pub fn for_category(&self, category: AchievementCategory) -> FlatReward {
        match category {
            AchievementCategory::Progress => self.progress,
            AchievementCategory::Performance => self.performance,
            AchievementCategory::Special => self.special,
            AchievementCategory::Milestone => self.milestone,
        }
    }
}

impl Default for AchievementRewards {
    fn default() -> Self {
        Self {
            progress: default_progress_reward(),
            performance: default_performance_reward(),
            special: default_special_reward(),
            milestone: default_milestone_reward(),
        }
    }
}

/// Reward configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Rows keyed by difficulty name. A missing row falls back to `easy`.
    #[serde(default = "default_difficulty_table")]
    pub difficulty: BTreeMap<String, DifficultyRewards>,

    /// Completion at or under the time threshold
    #[serde(default = "default_fast_bonus")]
    pub fast: BonusMultiplier,

    /// Moves at or under the perfect-move baseline
    #[serde(default = "default_perfect_bonus")]
    pub perfect: BonusMultiplier,

    /// Moves within `excellent_ratio` of the baseline
    #[serde(default = "default_excellent_bonus")]
    pub excellent: BonusMultiplier,

    #[serde(default = "default_excellent_ratio")]
    pub excellent_ratio: f64,

    #[serde(default)]
    pub achievement: AchievementRewards,

    /// Paid when a completion sets a new best time for its difficulty
    #[serde(default = "default_new_record")]
    pub new_record: FlatReward,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty_table(),
            fast: default_fast_bonus(),
            perfect: default_perfect_bonus(),
            excellent: default_excellent_bonus(),
            excellent_ratio: default_excellent_ratio(),
            achievement: AchievementRewards::default(),
            new_record: default_new_record(),
        }
    }
}

impl RewardConfig {
    /// Row for `difficulty`, falling back to `easy` and then the built-in easy row
    pub fn row(&self, difficulty: Difficulty) -> DifficultyRewards {
        self.difficulty
            .get(difficulty.as_str())
            .or_else(|| self.difficulty.get(Difficulty::Easy.as_str()))
            .copied()
            .unwrap_or(DifficultyRewards::EASY_FALLBACK)
    }

    pub(crate) fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for difficulty in Difficulty::all() {
            if !self.difficulty.contains_key(difficulty.as_str()) {
                warnings.push(format!(
                    "rewards.difficulty.{} is missing, the easy row will be used",
                    difficulty
                ));
            }
        }
        for (name, row) in &self.difficulty {
            if Difficulty::parse(name).is_none() {
                warnings.push(format!("rewards.difficulty.{} is not a known difficulty", name));
            }
            if !(row.multiplier >= 1.0) {
                warnings.push(format!(
                    "rewards.difficulty.{}.multiplier = {} is below 1.0 and will be treated as 1.0",
                    name, row.multiplier
                ));
            }
        }

        let bonuses = [
            ("fast", self.fast),
            ("perfect", self.perfect),
            ("excellent", self.excellent),
        ];
        for (name, bonus) in bonuses {
            if !(bonus.coins >= 1.0) || !(bonus.experience >= 1.0) {
                warnings.push(format!(
                    "rewards.{} multipliers below 1.0 will be treated as 1.0",
                    name
                ));
            }
        }
        if !(self.excellent_ratio >= 1.0) {
            warnings.push("rewards.excellent_ratio below 1.0 disables the excellent tier".to_string());
        }

        warnings
    }
}

fn default_difficulty_table() -> BTreeMap<String, DifficultyRewards> {
    [
        (Difficulty::Easy, DifficultyRewards::new(10, 5, 1.0, 120)),
        (Difficulty::Medium, DifficultyRewards::new(20, 15, 1.2, 180)),
        (Difficulty::Hard, DifficultyRewards::new(35, 30, 1.5, 300)),
        (Difficulty::Expert, DifficultyRewards::new(50, 50, 2.0, 600)),
    ]
    .into_iter()
    .map(|(d, row)| (d.as_str().to_string(), row))
    .collect()
}

fn default_fast_bonus() -> BonusMultiplier {
    BonusMultiplier {
        coins: 1.5,
        experience: 1.3,
    }
}

fn default_perfect_bonus() -> BonusMultiplier {
    BonusMultiplier {
        coins: 1.5,
        experience: 1.5,
    }
}

fn default_excellent_bonus() -> BonusMultiplier {
    BonusMultiplier {
        coins: 1.3,
        experience: 1.2,
    }
}

fn default_excellent_ratio() -> f64 {
    1.2
}

fn default_new_record() -> FlatReward {
    FlatReward {
        coins: 20,
        experience: 15,
    }
}

fn default_progress_reward() -> FlatReward {
    FlatReward {
        coins: 25,
        experience: 20,
    }
}

fn default_performance_reward() -> FlatReward {
    FlatReward {
        coins: 50,
        experience: 40,
    }
}

fn default_special_reward() -> FlatReward {
    FlatReward {
        coins: 30,
        experience: 25,
    }
}

fn default_milestone_reward() -> FlatReward {
    FlatReward {
        coins: 100,
        experience: 80,
    }
}
