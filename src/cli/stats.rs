//! Stats command implementation

use anyhow::Result;

use puzzle_settle::config::Config;
use puzzle_settle::store::SqliteStore;
use puzzle_settle::Difficulty;

/// Show a player's progression
pub fn stats_command(config: &Config, store: SqliteStore, player: &str, json: bool) -> Result<()> {
    let coordinator = super::coordinator(config, store);
    let stats = coordinator.stats(player)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let leveling = coordinator.leveling();
    let progress = leveling.level_progress(stats.level, stats.experience);

    println!("Player {}\n", player);
    println!(
        "  Level {} ({})  {:.1}%",
        progress.level,
        leveling.title(progress.level),
        progress.percentage
    );
    match progress.next_level_exp {
        Some(next) => println!(
            "  Experience: {} / {} ({} to next level)",
            stats.experience, next, progress.exp_to_next
        ),
        None => println!("  Experience: {} (max level)", stats.experience),
    }
    println!("  Coins:      {}", stats.coins);
    println!("  Games:      {}", stats.games_completed);

    println!("\n  Difficulty  Completed  Best time");
    for &difficulty in Difficulty::all() {
        let best = stats
            .best_time(difficulty)
            .map(|secs| format!("{}:{:02}", secs / 60, secs % 60))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<10}  {:>9}  {:>9}",
            difficulty.as_str(),
            stats.completed_on(difficulty),
            best
        );
    }

    println!(
        "\n  Achievements: {} unlocked",
        stats.unlocked_achievement_ids.len()
    );

    Ok(())
}
