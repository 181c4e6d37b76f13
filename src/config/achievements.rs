use serde::{Deserialize, Serialize};

/// Achievement settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementConfig {
    /// Official allow-list. Only these achievements are ever shown to players,
    /// even if other catalog entries qualify.
    #[serde(default = "default_official")]
    pub official: Vec<String>,
}

impl Default for AchievementConfig {
    fn default() -> Self {
        Self {
            official: default_official(),
        }
    }
}

/// Achievements shown to players out of the box
pub fn default_official() -> Vec<String> {
    [
        // progress
        "first_game",
        "games_10",
        "games_50",
        "games_100",
        "games_500",
        // difficulty
        "easy_master",
        "hard_challenger",
        "expert_elite",
        // speed
        "speed_demon",
        "lightning_fast",
        "time_master",
        // skill
        "perfectionist",
        "efficient_solver",
        "no_mistakes",
        // time of day
        "night_owl",
        "early_bird",
        "weekend_warrior",
        // level
        "level_10",
        "level_25",
        "max_level",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
