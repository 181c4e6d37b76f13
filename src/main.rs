use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "puzzle-settle")]
#[command(about = "Settle finished puzzle games into coins, levels and achievements")]
#[command(version)]
struct Cli {
    /// Path to the progression database (defaults to ~/.puzzle-settle/progression.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Path to the config file (defaults to ~/.puzzle-settle/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Settle a completed game for a player
    Settle {
        /// Player id
        player: String,

        /// Idempotency key; reuse it when retrying (random if omitted)
        #[arg(long)]
        game_id: Option<String>,

        /// easy, medium, hard or expert
        #[arg(short, long, default_value = "easy")]
        difficulty: String,

        /// Completion time in seconds
        #[arg(short, long)]
        time: u32,

        /// Moves used
        #[arg(short, long)]
        moves: u32,

        /// Minimum possible moves for the layout
        #[arg(long)]
        perfect_moves: Option<u32>,

        /// Number of pieces in the puzzle
        #[arg(long, default_value_t = 9)]
        pieces: u32,

        /// Print the receipt as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a player's level, coins and best times
    Stats {
        player: String,

        /// Print raw stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// List achievements
    Achievements {
        /// Mark achievements unlocked by this player
        #[arg(long)]
        player: Option<String>,

        /// Include achievements that are not on the official list
        #[arg(long)]
        all: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init { force } = cli.command {
        return cli::init::init_command(cli.config, force);
    }

    let config = cli::load_config(cli.config.as_deref())?;
    let store = cli::open_store(cli.db.as_deref())?;

    match cli.command {
        Commands::Settle {
            player,
            game_id,
            difficulty,
            time,
            moves,
            perfect_moves,
            pieces,
            json,
        } => {
            let args = cli::settle::SettleArgs {
                player,
                game_id,
                difficulty,
                time,
                moves,
                perfect_moves,
                pieces,
                json,
            };
            cli::settle::settle_command(&config, store, args)?;
        }
        Commands::Stats { player, json } => {
            cli::stats::stats_command(&config, store, &player, json)?;
        }
        Commands::Achievements { player, all } => {
            cli::achievements::achievements_command(&config, store, player.as_deref(), all)?;
        }
        Commands::Init { .. } => {}
    }

    Ok(())
}
