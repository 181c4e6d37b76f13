//! Experience and level curve
//!
//! The curve is a closed-form quadratic in the level, so lookups need no
//! tables and no mutable state.

use serde::{Deserialize, Serialize};

use crate::config::LevelingConfig;

/// Result of folding experience into a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceGain {
    pub new_level: u32,
    pub new_experience: u64,
    pub leveled_up: bool,
    pub levels_gained: u32,
}

/// Progress within the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    /// Total experience at which `level` starts
    pub current_level_exp: u64,
    /// Total experience at which the next level starts (None at max level)
    pub next_level_exp: Option<u64>,
    pub exp_to_next: u64,
    /// 0.0 - 100.0
    pub percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LevelingEngine {
    config: LevelingConfig,
}

impl LevelingEngine {
    pub fn new(config: LevelingConfig) -> Self {
        Self { config }
    }

    pub fn max_level(&self) -> u32 {
        self.config.max_level.max(1)
    }

    /// Total experience needed to reach `level`; 0 for level 1 and below
    pub fn required_experience_for_level(&self, level: u32) -> u64 {
        if level <= 1 {
            return 0;
        }
        let n = u64::from(level - 1);
        self.config
            .quadratic
            .saturating_mul(n.saturating_mul(n))
            .saturating_add(self.config.linear.saturating_mul(n))
    }

    /// Highest level whose requirement is covered by `total_experience`
    pub fn level_from_experience(&self, total_experience: u64) -> u32 {
        let max = self.max_level();
        let mut level = 1;
        while level < max && self.required_experience_for_level(level + 1) <= total_experience {
            level += 1;
        }
        level
    }

    /// Add experience. Negative deltas are ignored and the level never drops
    /// below `current_level`.
    pub fn add_experience(&self, current_level: u32, current_experience: u64, delta: i64) -> ExperienceGain {
        let gained = u64::try_from(delta).unwrap_or(0);
        let new_experience = current_experience.saturating_add(gained);
        let new_level = self
            .level_from_experience(new_experience)
            .max(current_level.max(1));
        let levels_gained = new_level.saturating_sub(current_level);

        ExperienceGain {
            new_level,
            new_experience,
            leveled_up: levels_gained > 0,
            levels_gained,
        }
    }

    /// Progress towards the next level. The percentage is clamped to 0-100
    /// even when `current_experience` is already past the next threshold.
    pub fn level_progress(&self, level: u32, current_experience: u64) -> LevelProgress {
        let level = level.clamp(1, self.max_level());
        let current_level_exp = self.required_experience_for_level(level);

        if level >= self.max_level() {
            return LevelProgress {
                level,
                current_level_exp,
                next_level_exp: None,
                exp_to_next: 0,
                percentage: 100.0,
            };
        }

        let next = self.required_experience_for_level(level + 1);
        let span = next.saturating_sub(current_level_exp);
        let in_level = current_experience.saturating_sub(current_level_exp);
        let percentage = if span == 0 {
            100.0
        } else {
            (in_level as f64 * 100.0 / span as f64).clamp(0.0, 100.0)
        };

        LevelProgress {
            level,
            current_level_exp,
            next_level_exp: Some(next),
            exp_to_next: next.saturating_sub(current_experience),
            percentage,
        }
    }

    /// Display title for a level
    pub fn title(&self, level: u32) -> &'static str {
        if level >= self.max_level() {
            return "Grandmaster";
        }
        match level {
            0..=4 => "Beginner",
            5..=9 => "Apprentice",
            10..=19 => "Puzzler",
            20..=29 => "Expert",
            _ => "Master",
        }
    }
}
