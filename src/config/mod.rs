//! Configuration loading and management
//!
//! Reward tables, the leveling curve, the official achievement allow-list and
//! coordinator limits live in one TOML file. Every section has defaults, so an
//! empty file (or no file at all) yields the canonical configuration.

mod achievements;
mod io;
mod leveling;
mod rewards;
mod settlement;

pub use achievements::{default_official, AchievementConfig};
pub use leveling::LevelingConfig;
pub use rewards::{AchievementRewards, BonusMultiplier, DifficultyRewards, FlatReward, RewardConfig};
pub use settlement::SettlementSettings;

use serde::{Deserialize, Serialize};

use crate::settlement::ACHIEVEMENTS;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rewards: RewardConfig,

    #[serde(default)]
    pub leveling: LevelingConfig,

    #[serde(default)]
    pub achievements: AchievementConfig,

    #[serde(default)]
    pub settlement: SettlementSettings,
}

impl Config {
    /// Check the configuration for values that will be clamped or ignored.
    ///
    /// Never fails: the engines default every questionable value.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.rewards.warnings();
        warnings.extend(self.leveling.warnings());
        warnings.extend(self.settlement.warnings());

        for id in &self.achievements.official {
            if !ACHIEVEMENTS.iter().any(|a| a.id == id.as_str()) {
                warnings.push(format!(
                    "achievements.official lists '{}' which has no catalog definition",
                    id
                ));
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: Config = toml::from_str(
            r#"
            [leveling]
            max_level = 30

            [rewards.fast]
            coins = 2.0
            experience = 1.5

            [settlement]
            processed_capacity = 16
            "#,
        )
        .unwrap();

        assert_eq!(config.leveling.max_level, 30);
        assert_eq!(config.leveling.quadratic, 50);
        assert_eq!(config.rewards.fast.coins, 2.0);
        assert_eq!(config.rewards.perfect, RewardConfig::default().perfect);
        assert_eq!(config.settlement.processed_capacity, 16);
        assert_eq!(config.settlement.max_attempts, 3);
    }

    #[test]
    fn test_unknown_official_id_is_reported() {
        let mut config = Config::default();
        config.achievements.official.push("puzzle_designer".to_string());
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("puzzle_designer"));
    }

    #[test]
    fn test_default_official_ids_are_all_defined() {
        for id in default_official() {
            assert!(
                ACHIEVEMENTS.iter().any(|a| a.id == id),
                "official id {} missing from catalog",
                id
            );
        }
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
