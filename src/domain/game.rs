//! Game completion reports
//!
//! A [`GameOutcome`] is what the client reports. It becomes a [`GameResult`]
//! only once the settlement side stamps it with its own completion time.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Difficulty;

/// Raw completion report as sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Client-chosen idempotency key, stable across retries
    pub game_id: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub completion_time_secs: u32,
    pub moves: u32,
    /// Theoretical minimum move count for the layout
    #[serde(default)]
    pub perfect_moves: Option<u32>,
    pub total_pieces: u32,
    /// Client clock at completion. Logged only, never used for rule evaluation.
    #[serde(default)]
    pub client_reported_at: Option<DateTime<FixedOffset>>,
}

impl GameOutcome {
    pub fn new(game_id: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            game_id: game_id.into(),
            difficulty,
            completion_time_secs: 0,
            moves: 0,
            perfect_moves: None,
            total_pieces: 1,
            client_reported_at: None,
        }
    }

    pub fn with_time(mut self, secs: u32) -> Self {
        self.completion_time_secs = secs;
        self
    }

    pub fn with_moves(mut self, moves: u32) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_perfect_moves(mut self, perfect: u32) -> Self {
        self.perfect_moves = Some(perfect);
        self
    }

    pub fn with_pieces(mut self, pieces: u32) -> Self {
        self.total_pieces = pieces;
        self
    }

    /// Stamp the outcome with the server-assigned completion time
    pub fn into_result(self, completed_at: DateTime<FixedOffset>) -> GameResult {
        GameResult {
            game_id: self.game_id,
            difficulty: self.difficulty,
            completion_time_secs: self.completion_time_secs,
            moves: self.moves,
            perfect_moves: self.perfect_moves,
            total_pieces: self.total_pieces,
            completed_at,
        }
    }
}

/// A completed game as seen by the rule engines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: String,
    pub difficulty: Difficulty,
    pub completion_time_secs: u32,
    pub moves: u32,
    pub perfect_moves: Option<u32>,
    pub total_pieces: u32,
    /// Server clock at settlement
    pub completed_at: DateTime<FixedOffset>,
}

impl GameResult {
    /// Perfect-move baseline, ignoring a meaningless zero
    pub fn move_baseline(&self) -> Option<u32> {
        self.perfect_moves.filter(|p| *p > 0)
    }
}
