//! Per-player progression aggregate

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::{Difficulty, SettlementReceipt};

/// One entry of the recent-results log (used by streak-style achievements)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentResult {
    pub difficulty: Difficulty,
    pub moves: u32,
    pub total_pieces: u32,
}

/// A settled game id together with the receipt handed out for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedGame {
    pub game_id: String,
    pub receipt: SettlementReceipt,
}

/// Everything settlement knows about a player
///
/// Only the settlement coordinator mutates this. Counters never decrease and
/// the unlocked set never shrinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProgressionStats {
    pub games_completed: u32,
    pub level: u32,
    /// Cumulative experience
    pub experience: u64,
    pub coins: u64,
    /// Best completion time (seconds) per difficulty
    pub best_times: BTreeMap<Difficulty, u32>,
    pub difficulty_completed: BTreeMap<Difficulty, u32>,
    pub unlocked_achievement_ids: BTreeSet<String>,
    /// Most recent results, oldest first
    pub recent_results: VecDeque<RecentResult>,
    /// Recently settled games, oldest first
    pub processed: VecDeque<ProcessedGame>,
}

impl Default for UserProgressionStats {
    fn default() -> Self {
        Self {
            games_completed: 0,
            level: 1,
            experience: 0,
            coins: 0,
            best_times: BTreeMap::new(),
            difficulty_completed: BTreeMap::new(),
            unlocked_achievement_ids: BTreeSet::new(),
            recent_results: VecDeque::new(),
            processed: VecDeque::new(),
        }
    }
}

impl UserProgressionStats {
    pub fn best_time(&self, difficulty: Difficulty) -> Option<u32> {
        self.best_times.get(&difficulty).copied()
    }

    pub fn completed_on(&self, difficulty: Difficulty) -> u32 {
        self.difficulty_completed.get(&difficulty).copied().unwrap_or(0)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked_achievement_ids.contains(id)
    }

    /// Receipt previously issued for `game_id`, if it is still in the window
    pub fn processed_receipt(&self, game_id: &str) -> Option<&SettlementReceipt> {
        self.processed
            .iter()
            .find(|p| p.game_id == game_id)
            .map(|p| &p.receipt)
    }

    /// Remember a settled game, evicting the oldest entries past `capacity`
    pub fn record_processed(&mut self, receipt: SettlementReceipt, capacity: usize) {
        self.processed.push_back(ProcessedGame {
            game_id: receipt.game_id.clone(),
            receipt,
        });
        truncate_front(&mut self.processed, capacity);
    }

    pub fn push_recent(&mut self, result: RecentResult, capacity: usize) {
        self.recent_results.push_back(result);
        truncate_front(&mut self.recent_results, capacity);
    }

    /// Last `n` results, oldest first
    pub fn last_results(&self, n: usize) -> impl Iterator<Item = &RecentResult> {
        let skip = self.recent_results.len().saturating_sub(n);
        self.recent_results.iter().skip(skip)
    }
}

fn truncate_front<T>(log: &mut VecDeque<T>, capacity: usize) {
    let capacity = capacity.max(1);
    while log.len() > capacity {
        log.pop_front();
    }
}
