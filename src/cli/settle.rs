//! Settle command implementation

use anyhow::{Context, Result};

use puzzle_settle::config::Config;
use puzzle_settle::store::SqliteStore;
use puzzle_settle::{Difficulty, GameOutcome, SettlementReceipt};

/// Game fields given on the command line
pub struct SettleArgs {
    pub player: String,
    pub game_id: Option<String>,
    pub difficulty: String,
    pub time: u32,
    pub moves: u32,
    pub perfect_moves: Option<u32>,
    pub pieces: u32,
    pub json: bool,
}

/// Settle one game and print the receipt
pub fn settle_command(config: &Config, store: SqliteStore, args: SettleArgs) -> Result<()> {
    let game_id = args
        .game_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let mut outcome = GameOutcome::new(game_id, Difficulty::parse_lossy(&args.difficulty))
        .with_time(args.time)
        .with_moves(args.moves)
        .with_pieces(args.pieces);
    if let Some(perfect) = args.perfect_moves {
        outcome = outcome.with_perfect_moves(perfect);
    }

    let coordinator = super::coordinator(config, store);
    let receipt = coordinator
        .settle(&args.player, outcome)
        .with_context(|| format!("Failed to settle game for {}", args.player))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        print_receipt(&receipt);
    }

    Ok(())
}

fn print_receipt(receipt: &SettlementReceipt) {
    println!("Game {}", receipt.game_id);
    println!("  Settled at: {}", receipt.settled_at.format("%Y-%m-%d %H:%M:%S %:z"));
    println!(
        "  Awarded:    +{} coins, +{} exp{}",
        receipt.coins_awarded,
        receipt.experience_awarded,
        if receipt.is_new_record { " (new record!)" } else { "" }
    );

    if receipt.leveled_up {
        println!(
            "  Level up:   {} (+{})",
            receipt.new_level, receipt.levels_gained
        );
    } else {
        println!("  Level:      {}", receipt.new_level);
    }
    println!(
        "  Totals:     {} coins, {} exp",
        receipt.total_coins, receipt.total_experience
    );

    if !receipt.new_achievements.is_empty() {
        println!("\n  New achievements:");
        for achievement in &receipt.new_achievements {
            println!(
                "    {} {} - {} (+{} coins, +{} exp)",
                achievement.icon,
                achievement.name,
                achievement.description,
                achievement.coins,
                achievement.experience
            );
        }
    }
}
