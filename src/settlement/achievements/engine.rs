//! Achievement evaluation
//!
//! Runs every catalog rule once per settlement and intersects the result with
//! the official allow-list. A rule that errors or panics only affects itself.

use std::collections::{BTreeSet, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::config::AchievementConfig;
use crate::domain::{GameResult, UserProgressionStats};

use super::checker::AchievementContext;
use super::definitions::{AchievementDefinition, ACHIEVEMENTS};

/// Catalog of definitions plus the official allow-list. Immutable once built.
#[derive(Debug, Clone)]
pub struct AchievementCatalog {
    definitions: Vec<AchievementDefinition>,
    official: BTreeSet<String>,
}

impl AchievementCatalog {
    pub fn new<I, S>(definitions: Vec<AchievementDefinition>, official: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            definitions,
            official: official.into_iter().map(Into::into).collect(),
        }
    }

    /// Built-in catalog with the configured allow-list
    pub fn from_config(config: &AchievementConfig) -> Self {
        Self::new(ACHIEVEMENTS.to_vec(), config.official.iter().cloned())
    }

    pub fn definitions(&self) -> &[AchievementDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&AchievementDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn is_official(&self, id: &str) -> bool {
        self.official.contains(id)
    }

    /// Definitions players can see
    pub fn official(&self) -> impl Iterator<Item = &AchievementDefinition> {
        self.definitions.iter().filter(|d| self.is_official(d.id))
    }
}

impl Default for AchievementCatalog {
    fn default() -> Self {
        Self::from_config(&AchievementConfig::default())
    }
}

/// Result of one evaluation pass
#[derive(Debug, Default)]
pub struct Evaluation<'c> {
    /// Newly qualifying, official achievements in catalog order
    pub unlocked: Vec<&'c AchievementDefinition>,
    /// Qualified but not on the allow-list; never shown to players
    pub withheld: Vec<&'static str>,
    /// Rules that failed and were treated as not unlocked
    pub failed: Vec<&'static str>,
}

impl Evaluation<'_> {
    pub fn unlocked_ids(&self) -> Vec<&'static str> {
        self.unlocked.iter().map(|d| d.id).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AchievementEngine {
    catalog: AchievementCatalog,
}

impl AchievementEngine {
    pub fn new(catalog: AchievementCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &AchievementCatalog {
        &self.catalog
    }

    /// Evaluate the catalog for one completed game.
    ///
    /// Rules see `after` (the post-reward stats); anything already in
    /// `unlocked_ids` is skipped, so an achievement is reported at most once.
    pub fn evaluate<'c>(
        &'c self,
        game: &GameResult,
        before: &UserProgressionStats,
        after: &UserProgressionStats,
        unlocked_ids: &BTreeSet<String>,
        max_level: u32,
    ) -> Evaluation<'c> {
        let ctx = AchievementContext {
            game,
            before,
            after,
            max_level,
        };
        let mut evaluation = Evaluation::default();
        let mut seen = HashSet::new();

        for def in &self.catalog.definitions {
            if unlocked_ids.contains(def.id) || !seen.insert(def.id) {
                continue;
            }

            let qualified = match catch_unwind(AssertUnwindSafe(|| def.rule.evaluate(&ctx))) {
                Ok(Ok(qualified)) => qualified,
                Ok(Err(e)) => {
                    tracing::warn!("Achievement rule {} failed for game {}: {}", def.id, game.game_id, e);
                    evaluation.failed.push(def.id);
                    false
                }
                Err(_) => {
                    tracing::error!("Achievement rule {} panicked for game {}", def.id, game.game_id);
                    evaluation.failed.push(def.id);
                    false
                }
            };

            if !qualified {
                continue;
            }

            if self.catalog.is_official(def.id) {
                evaluation.unlocked.push(def);
            } else {
                tracing::debug!("Achievement {} qualified but is not official, withholding", def.id);
                evaluation.withheld.push(def.id);
            }
        }

        evaluation
    }
}
