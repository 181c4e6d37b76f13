use serde::{Deserialize, Serialize};

/// Settlement coordinator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSettings {
    /// Settled game ids remembered per player for replay detection
    #[serde(default = "default_processed_capacity")]
    pub processed_capacity: usize,

    /// Recent results remembered per player for streak achievements
    #[serde(default = "default_recent_results_capacity")]
    pub recent_results_capacity: usize,

    /// Attempts before a version conflict is reported to the caller
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for SettlementSettings {
    fn default() -> Self {
        Self {
            processed_capacity: default_processed_capacity(),
            recent_results_capacity: default_recent_results_capacity(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl SettlementSettings {
    pub(crate) fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.processed_capacity == 0 {
            warnings.push("settlement.processed_capacity = 0 will be treated as 1".to_string());
        }
        if self.recent_results_capacity < 3 {
            warnings.push(
                "settlement.recent_results_capacity below 3 prevents efficient_solver from unlocking"
                    .to_string(),
            );
        }
        if self.max_attempts == 0 {
            warnings.push("settlement.max_attempts = 0 will be treated as 1".to_string());
        }
        warnings
    }
}

fn default_processed_capacity() -> usize {
    256
}

fn default_recent_results_capacity() -> usize {
    10
}

fn default_max_attempts() -> u32 {
    3
}
