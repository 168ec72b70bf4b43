//! Subcommand implementations.

mod generate;
mod play;
mod scores;

pub use generate::Generate;
pub use play::Play;
pub use scores::Scores;

use anyhow::{Context, Result};
use game_content::{ContentFactory, GameContent};
use runtime::{Game, GameBuilder, RuntimeConfig};

/// Content from `DUNGEON_CONTENT_DIR` when set, the bundled files otherwise.
fn load_content(config: &RuntimeConfig) -> Result<GameContent> {
    match &config.content_dir {
        Some(dir) => ContentFactory::new(dir)
            .load()
            .with_context(|| format!("Failed to load content from {}", dir.display())),
        None => ContentFactory::bundled(),
    }
}

/// A game backed by the file repositories under the configured save dir.
fn open_game(config: RuntimeConfig) -> Result<Game> {
    let content = load_content(&config)?;
    let save_dir = config.save_dir.clone();
    let game = GameBuilder::new()
        .config(config)
        .content(content)
        .file_repositories(&save_dir)
        .with_context(|| format!("Failed to open save directory {}", save_dir.display()))?
        .build()?;
    Ok(game)
}
