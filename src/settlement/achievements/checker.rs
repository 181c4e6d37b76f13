//! Hand-written achievement rules
//!
//! Rules see the game, the stats snapshot taken before settlement and the
//! stats after the base reward was folded in. Time-of-day rules read the
//! server-assigned `completed_at`, never the client clock.

use chrono::{Datelike, Timelike, Weekday};

use crate::domain::{GameResult, UserProgressionStats};
use crate::settlement::PredicateError;

/// Moves per piece allowed for `efficient_solver`
const EFFICIENT_MOVES_PER_PIECE: f64 = 1.5;

/// Share of the perfect-move baseline allowed for `super_efficient`
const SUPER_EFFICIENT_RATIO: f64 = 0.3;

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct AchievementContext<'a> {
    pub game: &'a GameResult,
    /// Snapshot before this settlement touched anything
    pub before: &'a UserProgressionStats,
    /// Counters, best times, recent results and level after the base reward
    pub after: &'a UserProgressionStats,
    pub max_level: u32,
}

/// Strictly beat an existing best time for this difficulty
pub fn time_master(ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
    Ok(ctx
        .before
        .best_time(ctx.game.difficulty)
        .is_some_and(|best| ctx.game.completion_time_secs < best))
}

/// Exactly the perfect-move count
pub fn perfectionist(ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
    Ok(ctx
        .game
        .move_baseline()
        .is_some_and(|perfect| ctx.game.moves == perfect))
}

pub fn super_efficient(ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
    Ok(ctx
        .game
        .move_baseline()
        .is_some_and(|perfect| f64::from(ctx.game.moves) <= f64::from(perfect) * SUPER_EFFICIENT_RATIO))
}

/// Last three results (this game included) each used at most 1.5 moves per piece
pub fn efficient_solver(ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
    let last_three: Vec<_> = ctx.after.last_results(3).collect();
    if last_three.len() < 3 {
        return Ok(false);
    }

    for result in last_three {
        if result.total_pieces == 0 {
            return Err(PredicateError::CorruptRecentResult);
        }
        if f64::from(result.moves) > f64::from(result.total_pieces) * EFFICIENT_MOVES_PER_PIECE {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Every move placed a piece
pub fn no_mistakes(ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
    if ctx.game.total_pieces == 0 {
        return Err(PredicateError::NoPieces);
    }
    Ok(ctx.game.moves <= ctx.game.total_pieces)
}

/// Midnight to 5 AM
pub fn night_owl(ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
    Ok(ctx.game.completed_at.hour() < 5)
}

/// 5 AM to 7 AM
pub fn early_bird(ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
    Ok((5..7).contains(&ctx.game.completed_at.hour()))
}

pub fn weekend_warrior(ctx: &AchievementContext<'_>) -> Result<bool, PredicateError> {
    Ok(matches!(
        ctx.game.completed_at.weekday(),
        Weekday::Sat | Weekday::Sun
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Difficulty, GameOutcome, RecentResult};
    use chrono::DateTime;

    fn game_at(rfc3339: &str) -> GameResult {
        GameOutcome::new("g", Difficulty::Easy)
            .with_time(90)
            .with_moves(12)
            .with_pieces(9)
            .into_result(DateTime::parse_from_rfc3339(rfc3339).unwrap())
    }

    fn ctx<'a>(
        game: &'a GameResult,
        before: &'a UserProgressionStats,
        after: &'a UserProgressionStats,
    ) -> AchievementContext<'a> {
        AchievementContext {
            game,
            before,
            after,
            max_level: 50,
        }
    }

    #[test]
    fn test_time_of_day_rules_use_offset_local_hour() {
        let stats = UserProgressionStats::default();

        // 03:30 in the server's zone, 19:30 UTC the day before
        let night = game_at("2025-03-05T03:30:00+08:00");
        assert!(night_owl(&ctx(&night, &stats, &stats)).unwrap());
        assert!(!early_bird(&ctx(&night, &stats, &stats)).unwrap());

        let dawn = game_at("2025-03-05T06:59:59+00:00");
        assert!(!night_owl(&ctx(&dawn, &stats, &stats)).unwrap());
        assert!(early_bird(&ctx(&dawn, &stats, &stats)).unwrap());

        let seven = game_at("2025-03-05T07:00:00+00:00");
        assert!(!early_bird(&ctx(&seven, &stats, &stats)).unwrap());
    }

    #[test]
    fn test_weekend() {
        let stats = UserProgressionStats::default();
        let saturday = game_at("2025-03-08T12:00:00+00:00");
        let wednesday = game_at("2025-03-05T12:00:00+00:00");
        assert!(weekend_warrior(&ctx(&saturday, &stats, &stats)).unwrap());
        assert!(!weekend_warrior(&ctx(&wednesday, &stats, &stats)).unwrap());
    }

    #[test]
    fn test_time_master_needs_previous_best() {
        let game = game_at("2025-03-05T12:00:00+00:00");
        let fresh = UserProgressionStats::default();
        assert!(!time_master(&ctx(&game, &fresh, &fresh)).unwrap());

        let mut before = UserProgressionStats::default();
        before.best_times.insert(Difficulty::Easy, 91);
        assert!(time_master(&ctx(&game, &before, &fresh)).unwrap());

        before.best_times.insert(Difficulty::Easy, 90);
        assert!(!time_master(&ctx(&game, &before, &fresh)).unwrap());
    }

    #[test]
    fn test_efficient_solver_needs_three_results() {
        let game = game_at("2025-03-05T12:00:00+00:00");
        let before = UserProgressionStats::default();
        let mut after = UserProgressionStats::default();
        let efficient = RecentResult {
            difficulty: Difficulty::Easy,
            moves: 13,
            total_pieces: 9,
        };

        after.push_recent(efficient.clone(), 10);
        after.push_recent(efficient.clone(), 10);
        assert!(!efficient_solver(&ctx(&game, &before, &after)).unwrap());

        after.push_recent(efficient, 10);
        assert!(efficient_solver(&ctx(&game, &before, &after)).unwrap());

        after.push_recent(
            RecentResult {
                difficulty: Difficulty::Easy,
                moves: 14,
                total_pieces: 9,
            },
            10,
        );
        assert!(!efficient_solver(&ctx(&game, &before, &after)).unwrap());
    }

    #[test]
    fn test_zero_pieces_is_an_error() {
        let mut game = game_at("2025-03-05T12:00:00+00:00");
        game.total_pieces = 0;
        let stats = UserProgressionStats::default();
        assert_eq!(
            no_mistakes(&ctx(&game, &stats, &stats)),
            Err(PredicateError::NoPieces)
        );
    }

    #[test]
    fn test_perfectionist_needs_exact_move_count() {
        let stats = UserProgressionStats::default();
        let mut game = game_at("2025-03-05T12:00:00+00:00");
        game.perfect_moves = Some(12);
        game.moves = 12;
        assert!(perfectionist(&ctx(&game, &stats, &stats)).unwrap());

        game.moves = 11;
        assert!(!perfectionist(&ctx(&game, &stats, &stats)).unwrap());

        game.moves = 13;
        assert!(!perfectionist(&ctx(&game, &stats, &stats)).unwrap());
    }

    #[test]
    fn test_move_rules_ignore_zero_baseline() {
        let mut game = game_at("2025-03-05T12:00:00+00:00");
        game.moves = 0;
        game.perfect_moves = Some(0);
        let stats = UserProgressionStats::default();
        assert!(!perfectionist(&ctx(&game, &stats, &stats)).unwrap());
        assert!(!super_efficient(&ctx(&game, &stats, &stats)).unwrap());
    }
}
