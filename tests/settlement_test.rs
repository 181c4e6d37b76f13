//! Settlement behaviour through the public coordinator API

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{harness_at, harness_with, plain_game, FlakyStore, RacingStore, WEDNESDAY_NOON};
use puzzle_settle::config::Config;
use puzzle_settle::{
    Difficulty, FixedClock, GameOutcome, SettlementCoordinator, SettlementError, StatsStore,
    UserProgressionStats,
};

#[test]
fn test_replay_returns_identical_receipt_without_mutation() {
    let h = harness_at(WEDNESDAY_NOON);
    let outcome = GameOutcome::new("game-1", Difficulty::Medium)
        .with_time(150)
        .with_moves(20)
        .with_perfect_moves(18)
        .with_pieces(16);

    let first = h.coordinator.settle("alice", outcome.clone()).unwrap();
    let after_first = h.store.load("alice").unwrap();

    // A later retry, even from a different moment, changes nothing
    h.clock.advance(chrono::Duration::hours(3));
    let second = h.coordinator.settle("alice", outcome).unwrap();
    let after_second = h.store.load("alice").unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(after_first, after_second);
    assert_eq!(after_second.value.games_completed, 1);
}

#[test]
fn test_progression_is_monotonic() {
    let h = harness_at(WEDNESDAY_NOON);
    let difficulties = Difficulty::all();
    let mut previous = UserProgressionStats::default();

    for i in 0..40u32 {
        let difficulty = difficulties[(i as usize) % difficulties.len()];
        let outcome = GameOutcome::new(format!("g-{}", i), difficulty)
            .with_time(60 + (i * 37) % 500)
            .with_moves(10 + i % 7)
            .with_perfect_moves(10)
            .with_pieces(12);
        let receipt = h.coordinator.settle("bob", outcome).unwrap();
        let stats = h.store.load("bob").unwrap().value;

        assert!(stats.coins >= previous.coins);
        assert!(stats.experience >= previous.experience);
        assert!(stats.games_completed > previous.games_completed);
        assert!(stats.level >= previous.level);
        assert!(stats.unlocked_achievement_ids.is_superset(&previous.unlocked_achievement_ids));
        assert_eq!(stats.coins, previous.coins + receipt.coins_awarded);
        assert_eq!(stats.level, receipt.new_level);

        for id in receipt.achievement_ids() {
            assert!(!previous.is_unlocked(id), "{} reported twice", id);
        }
        previous = stats;
    }
}

#[test]
fn test_tenth_game_unlocks_games_10_only() {
    let h = harness_at(WEDNESDAY_NOON);
    h.store
        .insert(
            "carol",
            UserProgressionStats {
                games_completed: 9,
                ..UserProgressionStats::default()
            },
        )
        .unwrap();

    let receipt = h
        .coordinator
        .settle("carol", plain_game("g-10", Difficulty::Hard))
        .unwrap();

    let ids: Vec<_> = receipt.achievement_ids().collect();
    assert!(ids.contains(&"games_10"));
    assert!(!ids.contains(&"first_game"));
}

#[test]
fn test_already_unlocked_achievement_is_not_reemitted() {
    let h = harness_at(WEDNESDAY_NOON);
    let mut seeded = UserProgressionStats::default();
    seeded.unlocked_achievement_ids.insert("first_game".to_string());
    h.store.insert("dave", seeded).unwrap();

    let receipt = h
        .coordinator
        .settle("dave", plain_game("g-1", Difficulty::Easy))
        .unwrap();
    assert_eq!(receipt.achievement_ids().count(), 0);
}

#[test]
fn test_allow_list_filters_new_achievements() {
    // Fast expert game qualifies for expert_speedster, which is not official
    let h = harness_at(WEDNESDAY_NOON);
    h.store
        .insert(
            "erin",
            UserProgressionStats {
                games_completed: 3,
                ..UserProgressionStats::default()
            },
        )
        .unwrap();
    let receipt = h
        .coordinator
        .settle(
            "erin",
            GameOutcome::new("g-4", Difficulty::Expert)
                .with_time(400)
                .with_moves(300)
                .with_pieces(64),
        )
        .unwrap();
    assert!(receipt.new_achievements.is_empty());
    assert!(!h.store.load("erin").unwrap().value.is_unlocked("expert_speedster"));

    // Shrinking the list hides even default achievements
    let mut config = Config::default();
    config.achievements.official = vec!["games_10".to_string()];
    let h = harness_with(&config, "2025-03-08T03:30:00+00:00");
    let receipt = h
        .coordinator
        .settle(
            "erin",
            GameOutcome::new("g-1", Difficulty::Easy)
                .with_time(30)
                .with_moves(9)
                .with_perfect_moves(9)
                .with_pieces(9),
        )
        .unwrap();
    assert!(receipt.new_achievements.is_empty());
}

#[test]
fn test_time_of_day_uses_server_clock() {
    // Client claims 3 AM, the server says mid-afternoon
    let h = harness_at("2025-03-05T14:00:00+08:00");
    let mut spoofed = plain_game("g-1", Difficulty::Easy);
    spoofed.client_reported_at =
        Some(chrono::DateTime::parse_from_rfc3339("2025-03-05T03:00:00+08:00").unwrap());

    let receipt = h.coordinator.settle("frank", spoofed).unwrap();
    assert!(!receipt.achievement_ids().any(|id| id == "night_owl"));

    let h = harness_at("2025-03-05T03:30:00+08:00");
    let receipt = h
        .coordinator
        .settle("frank", plain_game("g-1", Difficulty::Easy))
        .unwrap();
    assert!(receipt.achievement_ids().any(|id| id == "night_owl"));
    assert_eq!(receipt.settled_at.to_rfc3339(), "2025-03-05T03:30:00+08:00");
}

#[test]
fn test_failed_save_leaves_no_trace_and_retry_applies_once() {
    let store = Arc::new(FlakyStore::default());
    let clock = Arc::new(FixedClock::parse(WEDNESDAY_NOON).unwrap());
    let coordinator = SettlementCoordinator::from_config(&Config::default(), store.clone(), clock);

    store.fail_saves.store(true, Ordering::SeqCst);
    let err = coordinator
        .settle("gina", plain_game("g-1", Difficulty::Hard))
        .unwrap_err();
    assert!(matches!(err, SettlementError::Persistence { .. }));
    assert!(err.is_retryable());
    assert_eq!(store.load("gina").unwrap().version, 0);

    store.fail_saves.store(false, Ordering::SeqCst);
    let receipt = coordinator
        .settle("gina", plain_game("g-1", Difficulty::Hard))
        .unwrap();
    let stats = store.load("gina").unwrap().value;
    assert_eq!(stats.games_completed, 1);
    assert_eq!(stats.coins, receipt.coins_awarded);
}

#[test]
fn test_version_conflicts_are_retried_then_surfaced() {
    let store = Arc::new(RacingStore::default());
    let clock = Arc::new(FixedClock::parse(WEDNESDAY_NOON).unwrap());
    let coordinator = SettlementCoordinator::from_config(&Config::default(), store.clone(), clock);

    store.interleaved_writes.store(2, Ordering::SeqCst);
    coordinator
        .settle("hank", plain_game("g-1", Difficulty::Easy))
        .unwrap();
    assert_eq!(store.load("hank").unwrap().value.games_completed, 1);

    store.interleaved_writes.store(10, Ordering::SeqCst);
    let err = coordinator
        .settle("hank", plain_game("g-2", Difficulty::Easy))
        .unwrap_err();
    match err {
        SettlementError::Conflict { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(store.load("hank").unwrap().value.games_completed, 1);
}

#[test]
fn test_missing_difficulty_settles_as_easy() {
    let h = harness_at(WEDNESDAY_NOON);
    let outcome: GameOutcome = serde_json::from_str(
        r#"{"game_id": "g-1", "completion_time_secs": 500, "moves": 50, "total_pieces": 9}"#,
    )
    .unwrap();
    let receipt = h.coordinator.settle("ivy", outcome).unwrap();

    // easy base 10/5 plus the first-record bonus 20/15 plus first_game 25/20
    assert_eq!(receipt.coins_awarded, 55);
    assert_eq!(receipt.experience_awarded, 40);
    assert_eq!(h.store.load("ivy").unwrap().value.completed_on(Difficulty::Easy), 1);

    // A difficulty this build does not know settles the same way
    let outcome: GameOutcome = serde_json::from_str(
        r#"{"game_id": "g-1", "difficulty": "nightmare", "completion_time_secs": 500, "moves": 50, "total_pieces": 9}"#,
    )
    .unwrap();
    assert_eq!(outcome.difficulty, Difficulty::Easy);
    let receipt = h.coordinator.settle("judy", outcome).unwrap();
    assert_eq!(receipt.coins_awarded, 55);
    assert_eq!(receipt.experience_awarded, 40);
    assert_eq!(h.store.load("judy").unwrap().value.completed_on(Difficulty::Easy), 1);
}

#[test]
fn test_processed_window_is_bounded() {
    let mut config = Config::default();
    config.settlement.processed_capacity = 2;
    let h = harness_with(&config, WEDNESDAY_NOON);

    for id in ["g-1", "g-2", "g-3"] {
        h.coordinator.settle("jack", plain_game(id, Difficulty::Easy)).unwrap();
    }
    let stats = h.store.load("jack").unwrap().value;
    assert_eq!(stats.processed.len(), 2);
    assert!(stats.processed_receipt("g-1").is_none());

    // Still inside the window: replayed
    h.coordinator.settle("jack", plain_game("g-3", Difficulty::Easy)).unwrap();
    assert_eq!(h.store.load("jack").unwrap().value.games_completed, 3);
}
