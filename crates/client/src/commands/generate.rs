use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_core::DungeonGenerator;
use runtime::RuntimeConfig;

use crate::render;

/// Generate a level and print it
#[derive(Parser, Debug)]
pub struct Generate {
    /// Level seed
    pub seed: u64,

    /// Override the configured room count
    #[arg(long)]
    pub rooms: Option<u32>,

    /// Write the level export as JSON to this file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Skip the ASCII map
    #[arg(short, long)]
    pub quiet: bool,
}

impl Generate {
    pub fn execute(self) -> Result<()> {
        let content = super::load_content(&RuntimeConfig::from_env())?;
        let mut config = content.config.generator.clone();
        if let Some(rooms) = self.rooms {
            config = config.with_room_count(rooms);
        }
        config.validate()?;

        let level = DungeonGenerator::new(config).generate(self.seed);
        let spawns = level.spawns();

        if !self.quiet {
            print!(
                "{}",
                render::render(level.grid(), spawns, level.start_position())
            );
        }
        println!(
            "{} seed {}  rooms {}  enemies {}  hostages {}  items {}  boss {}",
            style("level").bold(),
            level.seed(),
            level.rooms().len(),
            spawns.enemies.len(),
            spawns.hostages.len(),
            spawns.items.len(),
            spawns.boss.map_or("none", |b| if b.gated { "gated" } else { "yes" }),
        );
        println!(
            "{} {}",
            style("fingerprint").bold(),
            hex::encode(level.fingerprint())
        );

        if let Some(path) = self.export {
            let json = serde_json::to_string_pretty(&level.export())?;
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("exported to {}", style(path.display()).cyan());
        }
        Ok(())
    }
}
