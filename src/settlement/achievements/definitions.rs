//! Achievement catalog
//!
//! Every achievement the game knows about, with its unlock rule. Whether an
//! achievement is ever shown to players is decided separately by the official
//! allow-list.

use crate::domain::{AchievementCategory, Difficulty};

use super::checker::{
    early_bird, efficient_solver, night_owl, no_mistakes, perfectionist, super_efficient,
    time_master, weekend_warrior, AchievementContext,
};
use crate::settlement::PredicateError;

/// Hand-written rule
pub type Predicate = fn(&AchievementContext<'_>) -> Result<bool, PredicateError>;

/// Unlock rule for an achievement
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Total completions equal exactly `n` after this game
    GamesCompleted(u32),
    /// Completions on one difficulty equal exactly `n` after this game
    DifficultyCompleted(Difficulty, u32),
    /// Game on `difficulty` finished in at most this many seconds
    FinishedWithin(Difficulty, u32),
    /// Level after the reward is at least `n`
    LevelAtLeast(u32),
    /// Level after the reward is the configured max level
    MaxLevel,
    Custom(Predicate),
}

impl Rule {
    pub fn evaluate(&self, ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
        let game = ctx.game;
        match *self {
            Rule::GamesCompleted(n) => Ok(ctx.after.games_completed == n),
            Rule::DifficultyCompleted(difficulty, n) => {
                Ok(game.difficulty == difficulty && ctx.after.completed_on(difficulty) == n)
            }
            Rule::FinishedWithin(difficulty, secs) => {
                Ok(game.difficulty == difficulty && game.completion_time_secs <= secs)
            }
            Rule::LevelAtLeast(n) => Ok(ctx.after.level >= n),
            Rule::MaxLevel => Ok(ctx.after.level >= ctx.max_level),
            Rule::Custom(predicate) => predicate(ctx),
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub rule: Rule,
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[AchievementDefinition] = &[
    // === PROGRESS ===
    AchievementDefinition {
        id: "first_game",
        name: "First Steps",
        description: "Complete your first puzzle",
        icon: "🎯",
        category: AchievementCategory::Progress,
        rule: Rule::GamesCompleted(1),
    },
    AchievementDefinition {
        id: "games_10",
        name: "Puzzle Novice",
        description: "Complete 10 puzzles",
        icon: "🏅",
        category: AchievementCategory::Progress,
        rule: Rule::GamesCompleted(10),
    },
    AchievementDefinition {
        id: "games_50",
        name: "Puzzle Enthusiast",
        description: "Complete 50 puzzles",
        icon: "🏆",
        category: AchievementCategory::Progress,
        rule: Rule::GamesCompleted(50),
    },
    AchievementDefinition {
        id: "games_100",
        name: "Puzzle Master",
        description: "Complete 100 puzzles",
        icon: "👑",
        category: AchievementCategory::Milestone,
        rule: Rule::GamesCompleted(100),
    },
    AchievementDefinition {
        id: "games_500",
        name: "Puzzle Legend",
        description: "Complete 500 puzzles",
        icon: "🎖️",
        category: AchievementCategory::Milestone,
        rule: Rule::GamesCompleted(500),
    },
    AchievementDefinition {
        id: "easy_master",
        name: "Easy Does It",
        description: "Complete 20 easy puzzles",
        icon: "😊",
        category: AchievementCategory::Progress,
        rule: Rule::DifficultyCompleted(Difficulty::Easy, 20),
    },
    AchievementDefinition {
        id: "hard_challenger",
        name: "Hard Challenger",
        description: "Complete 10 hard puzzles",
        icon: "😤",
        category: AchievementCategory::Progress,
        rule: Rule::DifficultyCompleted(Difficulty::Hard, 10),
    },
    AchievementDefinition {
        id: "expert_elite",
        name: "Expert Elite",
        description: "Complete 5 expert puzzles",
        icon: "🔥",
        category: AchievementCategory::Milestone,
        rule: Rule::DifficultyCompleted(Difficulty::Expert, 5),
    },
    // === PERFORMANCE ===
    AchievementDefinition {
        id: "speed_demon",
        name: "Speed Demon",
        description: "Complete a medium puzzle within 3 minutes",
        icon: "⚡",
        category: AchievementCategory::Performance,
        rule: Rule::FinishedWithin(Difficulty::Medium, 180),
    },
    AchievementDefinition {
        id: "lightning_fast",
        name: "Lightning Fast",
        description: "Complete an easy puzzle within 1 minute",
        icon: "🌩️",
        category: AchievementCategory::Performance,
        rule: Rule::FinishedWithin(Difficulty::Easy, 60),
    },
    AchievementDefinition {
        id: "expert_speedster",
        name: "Expert Speedster",
        description: "Complete an expert puzzle within 10 minutes",
        icon: "🏎️",
        category: AchievementCategory::Performance,
        rule: Rule::FinishedWithin(Difficulty::Expert, 600),
    },
    AchievementDefinition {
        id: "time_master",
        name: "Time Master",
        description: "Beat your own best time on a difficulty",
        icon: "⏱️",
        category: AchievementCategory::Performance,
        rule: Rule::Custom(time_master),
    },
    AchievementDefinition {
        id: "perfectionist",
        name: "Perfectionist",
        description: "Complete a puzzle in the minimum number of moves",
        icon: "💎",
        category: AchievementCategory::Performance,
        rule: Rule::Custom(perfectionist),
    },
    AchievementDefinition {
        id: "super_efficient",
        name: "Super Efficient",
        description: "Complete a puzzle using at most 30% of the standard moves",
        icon: "🚀",
        category: AchievementCategory::Performance,
        rule: Rule::Custom(super_efficient),
    },
    AchievementDefinition {
        id: "efficient_solver",
        name: "Efficient Solver",
        description: "Three puzzles in a row using at most 1.5 moves per piece",
        icon: "🧠",
        category: AchievementCategory::Performance,
        rule: Rule::Custom(efficient_solver),
    },
    AchievementDefinition {
        id: "no_mistakes",
        name: "No Mistakes",
        description: "Complete a puzzle without a single wasted move",
        icon: "✅",
        category: AchievementCategory::Performance,
        rule: Rule::Custom(no_mistakes),
    },
    // === SPECIAL ===
    AchievementDefinition {
        id: "night_owl",
        name: "Night Owl",
        description: "Complete a puzzle between midnight and 5 AM",
        icon: "🦉",
        category: AchievementCategory::Special,
        rule: Rule::Custom(night_owl),
    },
    AchievementDefinition {
        id: "early_bird",
        name: "Early Bird",
        description: "Complete a puzzle between 5 AM and 7 AM",
        icon: "🐦",
        category: AchievementCategory::Special,
        rule: Rule::Custom(early_bird),
    },
    AchievementDefinition {
        id: "weekend_warrior",
        name: "Weekend Warrior",
        description: "Complete a puzzle on the weekend",
        icon: "🏖️",
        category: AchievementCategory::Special,
        rule: Rule::Custom(weekend_warrior),
    },
    // === MILESTONE ===
    AchievementDefinition {
        id: "level_10",
        name: "Rising Star",
        description: "Reach level 10",
        icon: "⭐",
        category: AchievementCategory::Milestone,
        rule: Rule::LevelAtLeast(10),
    },
    AchievementDefinition {
        id: "level_25",
        name: "Seasoned Solver",
        description: "Reach level 25",
        icon: "🌟",
        category: AchievementCategory::Milestone,
        rule: Rule::LevelAtLeast(25),
    },
    AchievementDefinition {
        id: "max_level",
        name: "Living Legend",
        description: "Reach the maximum level",
        icon: "👑",
        category: AchievementCategory::Milestone,
        rule: Rule::MaxLevel,
    },
];

impl AchievementDefinition {
    /// Look up a definition in the built-in catalog
    pub fn get(id: &str) -> Option<&'static AchievementDefinition> {
        ACHIEVEMENTS.iter().find(|a| a.id == id)
    }

    /// Get total number of built-in achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}
