use anyhow::Result;
use clap::Parser;
use console::style;
use runtime::RuntimeConfig;

/// Show the high score table
#[derive(Parser, Debug)]
pub struct Scores {
    /// Show at most this many entries
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl Scores {
    pub fn execute(self) -> Result<()> {
        let game = super::open_game(RuntimeConfig::from_env())?;
        let scores = game.high_scores();
        if scores.is_empty() {
            println!("{}", style("No scores recorded yet").dim());
            return Ok(());
        }

        println!("{}", style("High scores").bold());
        let limit = self.limit.unwrap_or(scores.len());
        for (rank, entry) in scores.iter().take(limit).enumerate() {
            println!(
                "{:>3}. {:<16} {:>8}  {}  seed {}",
                rank + 1,
                entry.name,
                style(entry.score).green(),
                entry.date,
                entry.seed
            );
        }
        Ok(())
    }
}
