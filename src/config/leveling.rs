use serde::{Deserialize, Serialize};

/// Leveling curve coefficients
///
/// Experience required to reach level `L` is
/// `quadratic * (L - 1)^2 + linear * (L - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelingConfig {
    #[serde(default = "default_quadratic")]
    pub quadratic: u64,

    #[serde(default = "default_linear")]
    pub linear: u64,

    #[serde(default = "default_max_level")]
    pub max_level: u32,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            quadratic: default_quadratic(),
            linear: default_linear(),
            max_level: default_max_level(),
        }
    }
}

impl LevelingConfig {
    pub(crate) fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.quadratic == 0 && self.linear == 0 {
            warnings.push(
                "leveling.quadratic and leveling.linear are both 0, every player sits at max level"
                    .to_string(),
            );
        }
        if self.max_level == 0 {
            warnings.push("leveling.max_level = 0 will be treated as 1".to_string());
        }
        warnings
    }
}

fn default_quadratic() -> u64 {
    50
}

fn default_linear() -> u64 {
    250
}

fn default_max_level() -> u32 {
    50
}
