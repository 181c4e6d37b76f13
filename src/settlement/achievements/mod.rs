//! Achievement catalog and evaluation
//!
//! Definitions are static data; most rules are declarative [`Rule`] variants
//! and the rest are plain functions in `checker`.

mod checker;
mod definitions;
mod engine;

pub use checker::AchievementContext;
pub use definitions::{AchievementDefinition, Predicate, Rule, ACHIEVEMENTS};
pub use engine::{AchievementCatalog, AchievementEngine, Evaluation};
