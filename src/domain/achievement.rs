use serde::{Deserialize, Serialize};

/// Achievement category, also selects the reward paid on unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Progress,
    Performance,
    Special,
    Milestone,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Progress => "Progress",
            Self::Performance => "Performance",
            Self::Special => "Special",
            Self::Milestone => "Milestones",
        }
    }
}

/// An achievement as reported in a settlement receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardedAchievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: AchievementCategory,
    /// Coins paid for this unlock
    pub coins: u64,
    /// Experience paid for this unlock
    pub experience: u64,
}
