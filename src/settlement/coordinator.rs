//! Settlement coordinator
//!
//! The only writer of [`UserProgressionStats`]. One settlement is:
//! load, replay check, plan, compare-and-swap save. All of it runs under a
//! per-player lock, and the store's version check covers writers in other
//! processes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::{Config, SettlementSettings};
use crate::domain::{
    AwardedAchievement, GameOutcome, GameResult, RecentResult, SettlementReceipt,
    UserProgressionStats,
};
use crate::store::{StatsStore, StoreError};

use super::achievements::{AchievementCatalog, AchievementEngine};
use super::clock::Clock;
use super::error::SettlementError;
use super::levels::LevelingEngine;
use super::rewards::RewardCalculator;

/// Stats and receipt computed for one game, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    pub stats: UserProgressionStats,
    pub receipt: SettlementReceipt,
    /// Achievements that qualified but are not official
    pub withheld: Vec<&'static str>,
}

pub struct SettlementCoordinator {
    store: Arc<dyn StatsStore>,
    clock: Arc<dyn Clock>,
    rewards: RewardCalculator,
    leveling: LevelingEngine,
    achievements: AchievementEngine,
    settings: SettlementSettings,
    /// One entry per player with a settlement in flight
    player_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SettlementCoordinator {
    pub fn new(
        store: Arc<dyn StatsStore>,
        clock: Arc<dyn Clock>,
        rewards: RewardCalculator,
        leveling: LevelingEngine,
        achievements: AchievementEngine,
        settings: SettlementSettings,
    ) -> Self {
        Self {
            store,
            clock,
            rewards,
            leveling,
            achievements,
            settings,
            player_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Build every engine from one loaded configuration
    pub fn from_config(config: &Config, store: Arc<dyn StatsStore>, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            store,
            clock,
            RewardCalculator::new(config.rewards.clone()),
            LevelingEngine::new(config.leveling),
            AchievementEngine::new(AchievementCatalog::from_config(&config.achievements)),
            config.settlement,
        )
    }

    pub fn rewards(&self) -> &RewardCalculator {
        &self.rewards
    }

    pub fn leveling(&self) -> &LevelingEngine {
        &self.leveling
    }

    pub fn achievements(&self) -> &AchievementEngine {
        &self.achievements
    }

    /// Current stats for a player, without settling anything
    pub fn stats(&self, player_id: &str) -> Result<UserProgressionStats, SettlementError> {
        self.store
            .load(player_id)
            .map(|v| v.value)
            .map_err(|source| persistence(player_id, source))
    }

    /// Settle one completed game.
    ///
    /// Safe to call again with the same `game_id`: a game that was already
    /// settled returns the stored receipt and changes nothing. On error no
    /// stats were changed.
    pub fn settle(
        &self,
        player_id: &str,
        outcome: GameOutcome,
    ) -> Result<SettlementReceipt, SettlementError> {
        if player_id.trim().is_empty() {
            return Err(SettlementError::Input("player id is empty".to_string()));
        }
        if outcome.game_id.trim().is_empty() {
            return Err(SettlementError::Input("game id is empty".to_string()));
        }

        let lock = self.player_lock(player_id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            self.settle_locked(player_id, outcome)
        };
        self.release_player_lock(player_id, lock);
        result
    }

    fn settle_locked(
        &self,
        player_id: &str,
        outcome: GameOutcome,
    ) -> Result<SettlementReceipt, SettlementError> {
        let completed_at = self.clock.now();
        if let Some(reported) = outcome.client_reported_at {
            let skew = reported.signed_duration_since(completed_at).num_seconds();
            if skew.abs() > 60 {
                tracing::warn!(
                    "Game {} client clock is {}s off server time, ignoring it",
                    outcome.game_id,
                    skew
                );
            }
        }
        let game = outcome.into_result(completed_at);
        let max_attempts = self.settings.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let loaded = self
                .store
                .load(player_id)
                .map_err(|source| persistence(player_id, source))?;

            if let Some(receipt) = loaded.value.processed_receipt(&game.game_id) {
                tracing::info!(
                    "Game {} already settled for {}, replaying receipt",
                    game.game_id,
                    player_id
                );
                return Ok(receipt.clone());
            }

            let plan = self.plan(&game, &loaded.value);
            for id in &plan.withheld {
                tracing::debug!("Withheld unofficial achievement {} for {}", id, player_id);
            }

            match self.store.save(player_id, &plan.stats, loaded.version) {
                Ok(version) => {
                    tracing::info!(
                        "Settled game {} for {}: +{} coins, +{} exp, level {}, {} new achievement(s) (v{})",
                        game.game_id,
                        player_id,
                        plan.receipt.coins_awarded,
                        plan.receipt.experience_awarded,
                        plan.receipt.new_level,
                        plan.receipt.new_achievements.len(),
                        version
                    );
                    return Ok(plan.receipt);
                }
                Err(StoreError::VersionConflict { expected, found }) => {
                    tracing::warn!(
                        "Version conflict settling {} for {} (expected v{}, found v{}), attempt {}/{}",
                        game.game_id,
                        player_id,
                        expected,
                        found,
                        attempt,
                        max_attempts
                    );
                }
                Err(source) => return Err(persistence(player_id, source)),
            }
        }

        Err(SettlementError::Conflict {
            player_id: player_id.to_string(),
            attempts: max_attempts,
        })
    }

    /// Compute the new stats and the receipt for `game`. Pure: touches
    /// neither the store nor the clock.
    pub fn plan(&self, game: &GameResult, before: &UserProgressionStats) -> SettlementPlan {
        let difficulty = game.difficulty;
        let base = self.rewards.compute_base_reward(
            difficulty,
            game.completion_time_secs,
            game.moves,
            game.perfect_moves,
        );

        let is_new_record = before
            .best_time(difficulty)
            .is_none_or(|best| game.completion_time_secs < best);

        let mut coins = base.coins;
        let mut experience = base.experience;
        if is_new_record {
            let bonus = self.rewards.new_record_bonus();
            coins = coins.saturating_add(bonus.coins);
            experience = experience.saturating_add(bonus.experience);
        }

        // Post-reward stats: what the achievement rules see
        let mut after = before.clone();
        after.games_completed = after.games_completed.saturating_add(1);
        let completed = after.difficulty_completed.entry(difficulty).or_insert(0);
        *completed = completed.saturating_add(1);
        if is_new_record {
            after.best_times.insert(difficulty, game.completion_time_secs);
        }
        after.push_recent(
            RecentResult {
                difficulty,
                moves: game.moves,
                total_pieces: game.total_pieces,
            },
            self.settings.recent_results_capacity,
        );
        let gain = self
            .leveling
            .add_experience(before.level, before.experience, to_delta(experience));
        after.level = gain.new_level;
        after.experience = gain.new_experience;
        after.coins = before.coins.saturating_add(coins);

        let evaluation = self.achievements.evaluate(
            game,
            before,
            &after,
            &before.unlocked_achievement_ids,
            self.leveling.max_level(),
        );

        let mut new_achievements = Vec::with_capacity(evaluation.unlocked.len());
        for def in &evaluation.unlocked {
            let reward = self.rewards.achievement_reward(def.category);
            coins = coins.saturating_add(reward.coins);
            experience = experience.saturating_add(reward.experience);
            after.unlocked_achievement_ids.insert(def.id.to_string());
            new_achievements.push(AwardedAchievement {
                id: def.id.to_string(),
                name: def.name.to_string(),
                description: def.description.to_string(),
                icon: def.icon.to_string(),
                category: def.category,
                coins: reward.coins,
                experience: reward.experience,
            });
        }

        // Fold again so the stored level reflects achievement rewards too
        let gain = self
            .leveling
            .add_experience(before.level, before.experience, to_delta(experience));
        after.level = gain.new_level;
        after.experience = gain.new_experience;
        after.coins = before.coins.saturating_add(coins);

        let receipt = SettlementReceipt {
            game_id: game.game_id.clone(),
            settled_at: game.completed_at,
            coins_awarded: coins,
            experience_awarded: experience,
            leveled_up: gain.leveled_up,
            levels_gained: gain.levels_gained,
            new_level: gain.new_level,
            total_experience: gain.new_experience,
            total_coins: after.coins,
            new_achievements,
            is_new_record,
        };
        after.record_processed(receipt.clone(), self.settings.processed_capacity);

        SettlementPlan {
            stats: after,
            receipt,
            withheld: evaluation.withheld,
        }
    }

    fn player_lock(&self, player_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.player_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(player_id.to_string()).or_default().clone()
    }

    /// Drop the table entry once nobody else holds or waits on it
    fn release_player_lock(&self, player_id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.player_locks.lock().unwrap_or_else(|e| e.into_inner());
        // Two references left: the table's and ours
        if Arc::strong_count(&lock) == 2 {
            locks.remove(player_id);
        }
    }

    #[cfg(test)]
    fn tracked_players(&self) -> usize {
        self.player_locks.lock().map(|l| l.len()).unwrap_or(0)
    }
}

fn persistence(player_id: &str, source: StoreError) -> SettlementError {
    SettlementError::Persistence {
        player_id: player_id.to_string(),
        source,
    }
}

fn to_delta(experience: u64) -> i64 {
    i64::try_from(experience).unwrap_or(i64::MAX)
}
