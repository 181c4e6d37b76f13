//! Achievements command implementation

use anyhow::Result;

use puzzle_settle::config::Config;
use puzzle_settle::store::SqliteStore;
use puzzle_settle::AchievementCategory;

/// List the catalog, marking official entries and (with a player) unlocked ones
pub fn achievements_command(
    config: &Config,
    store: SqliteStore,
    player: Option<&str>,
    all: bool,
) -> Result<()> {
    let coordinator = super::coordinator(config, store);
    let unlocked = match player {
        Some(player) => coordinator.stats(player)?.unlocked_achievement_ids,
        None => Default::default(),
    };

    let catalog = coordinator.achievements().catalog();
    let visible: Vec<_> = catalog
        .definitions()
        .iter()
        .filter(|d| all || catalog.is_official(d.id))
        .collect();

    for category in [
        AchievementCategory::Progress,
        AchievementCategory::Performance,
        AchievementCategory::Special,
        AchievementCategory::Milestone,
    ] {
        println!("\n{}:", category.label());
        for def in visible.iter().filter(|d| d.category == category) {
            let mark = if unlocked.contains(def.id) { "x" } else { " " };
            println!(
                "  [{}] {} {:<18} {}{}",
                mark,
                def.icon,
                def.name,
                def.description,
                if catalog.is_official(def.id) { "" } else { " (unofficial)" }
            );
        }
    }

    match player {
        Some(player) => println!(
            "\n{} of {} shown achievements unlocked by {}",
            visible.iter().filter(|d| unlocked.contains(d.id)).count(),
            visible.len(),
            player
        ),
        None => println!("\n{} achievements", visible.len()),
    }

    Ok(())
}
