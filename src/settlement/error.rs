//! Error types for settlement

use crate::store::StoreError;

/// Why a settlement did not apply
///
/// A failed settlement never leaves partial state behind. Callers may retry
/// with the same game id.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error("Invalid game result: {0}")]
    Input(String),

    #[error("Progression store failed for player {player_id}: {source}")]
    Persistence {
        player_id: String,
        #[source]
        source: StoreError,
    },

    #[error("Concurrent update conflict for player {player_id} after {attempts} attempts")]
    Conflict { player_id: String, attempts: u32 },
}

impl SettlementError {
    /// Whether resubmitting the same game id may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Input(_) => false,
            Self::Persistence { .. } | Self::Conflict { .. } => true,
        }
    }
}

/// Error raised by a single achievement rule
///
/// Isolated to that rule: evaluation of the rest of the catalog continues and
/// the rule counts as not unlocked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredicateError {
    #[error("Game reports zero pieces")]
    NoPieces,

    #[error("Recent result reports zero pieces")]
    CorruptRecentResult,

    #[error("Rule failed: {0}")]
    Failed(String),
}
