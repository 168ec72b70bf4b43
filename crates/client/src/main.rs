//! Headless client for the dungeon crawler.
//!
//! Run with: `dungeon <command>`
mod commands;
mod dirs;
mod explorer;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Generate, Play, Scores};

/// Seeded dungeon crawler
#[derive(Parser)]
#[command(name = "dungeon")]
#[command(about = "Procedural dungeon levels and turn-based combat", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a level on autopilot
    Play(Play),

    /// Generate a level and print it
    Generate(Generate),

    /// Show the high score table
    Scores(Scores),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (for SAVE_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::setup_logging(&dirs::log_dir())?;

    match cli.command {
        Command::Play(cmd) => cmd.execute().await,
        Command::Generate(cmd) => cmd.execute(),
        Command::Scores(cmd) => cmd.execute(),
    }
}
