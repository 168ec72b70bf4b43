use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_core::CombatOutcome;
use runtime::{AutoPilot, Event, Game, GameStatus, RuntimeConfig, SessionEvent, Topic};
use tokio::sync::broadcast::Receiver;
use tracing::info;

use crate::{explorer, render};

/// Play a level on autopilot
#[derive(Parser, Debug)]
pub struct Play {
    /// Level seed (random when omitted)
    #[arg(long, conflicts_with = "load")]
    pub seed: Option<u64>,

    /// Resume the run saved in this slot
    #[arg(long)]
    pub load: Option<String>,

    /// Save the run to this slot when exploration stops
    #[arg(long)]
    pub save: Option<String>,

    /// Name for the high score table
    #[arg(long, default_value = "player")]
    pub name: String,

    /// Stop after this many exploration steps
    #[arg(long, default_value_t = 5_000)]
    pub max_steps: usize,

    /// Print the final map
    #[arg(long)]
    pub map: bool,
}

/// What an autopilot run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaySummary {
    pub steps: usize,
    pub encounters: usize,
    pub status: GameStatus,
}

impl Play {
    pub async fn execute(self) -> Result<()> {
        let mut game = super::open_game(RuntimeConfig::from_env())?;
        let mut session_events = game.events().subscribe(Topic::Session);

        match &self.load {
            Some(slot) => game
                .load(slot)
                .with_context(|| format!("Failed to load slot '{slot}'"))?,
            None => game.new_game(self.seed.unwrap_or_else(rand::random))?,
        }
        print_session_events(&mut session_events);

        let summary = autoplay(&mut game, self.max_steps).await?;
        info!(?summary, "autoplay finished");

        if self.map
            && let (Some(level), Some(spawns)) = (game.level(), game.spawns())
        {
            print!(
                "{}",
                render::render(level.grid(), spawns, game.player_position())
            );
        }

        if let Some(slot) = &self.save
            && summary.status == GameStatus::Exploring
        {
            game.save(slot)
                .with_context(|| format!("Failed to save slot '{slot}'"))?;
        }
        if summary.status.is_over() {
            game.record_score(&self.name)?;
        }
        print_session_events(&mut session_events);

        let progress = game.progress().context("no active game")?;
        println!(
            "{} {} after {} steps and {} encounters  score {}  level {}  hostages {}/{}",
            style("result").bold(),
            summary.status.as_str(),
            summary.steps,
            summary.encounters,
            style(progress.score).green(),
            progress.experience.level(),
            progress.hostages.rescued(),
            progress.hostages.total(),
        );
        Ok(())
    }
}

/// Explores toward the nearest goal and fights every encounter with
/// [`AutoPilot`] until the run ends, nothing is left to reach, or the step
/// budget runs out.
pub async fn autoplay(game: &mut Game, max_steps: usize) -> Result<PlaySummary> {
    let pilot = AutoPilot::default();
    let mut steps = 0;
    let mut encounters = 0;

    loop {
        let status = game.status().context("no active game")?;
        match status {
            GameStatus::InCombat => {
                let report = game.run_encounter(&pilot).await?;
                encounters += 1;
                let outcome = match report.outcome {
                    Some(CombatOutcome::Victory { .. }) => style("victory").green(),
                    Some(CombatOutcome::Defeat) => style("defeat").red(),
                    None => style("aborted").yellow(),
                };
                println!(
                    "encounter {encounters}: {outcome} in {} rounds, {} killed",
                    report.rounds,
                    report.killed.len()
                );
                let wounded = game.status() == Some(GameStatus::Exploring)
                    && game
                        .progress()
                        .is_some_and(|p| p.stats.borrow().health_fraction() < pilot.heal_below);
                if wounded && let Some(restored) = game.use_heal()? {
                    println!("used a heal kit, restored {restored} health");
                }
            }
            GameStatus::Exploring if steps < max_steps => {
                let (Some(level), Some(spawns), Some(at)) =
                    (game.level(), game.spawns(), game.player_position())
                else {
                    break;
                };
                let Some(direction) = explorer::next_step(level.grid(), spawns, at) else {
                    info!(steps, "nothing left to reach");
                    break;
                };
                let report = game.move_player(direction)?;
                if !report.moved {
                    break;
                }
                steps += 1;
                for (item, effect) in &report.pickups {
                    println!("picked up {item}: {effect:?}");
                }
                if report.rescued {
                    println!("rescued a hostage");
                }
                if report.boss_released.is_some() {
                    println!("{}", style("the boss has appeared").red().bold());
                }
            }
            _ => break,
        }
    }

    Ok(PlaySummary {
        steps,
        encounters,
        status: game.status().context("no active game")?,
    })
}

fn print_session_events(events: &mut Receiver<Event>) {
    while let Ok(event) = events.try_recv() {
        let Event::Session(event) = event else {
            continue;
        };
        match event {
            SessionEvent::NewGame {
                seed,
                rooms,
                enemies,
                hostages,
                items,
            } => println!(
                "{} seed {seed}: {rooms} rooms, {enemies} enemies, {hostages} hostages, {items} items",
                style("new game").bold()
            ),
            SessionEvent::Loaded { slot, restored_map } => println!(
                "{} slot '{slot}'{}",
                style("loaded").bold(),
                if restored_map { "" } else { " (level rebuilt from seed)" }
            ),
            SessionEvent::Saved { slot } => println!("saved to slot '{slot}'"),
            SessionEvent::ScoreRecorded { score, rank } => match rank {
                Some(rank) => println!("score {score} entered the table at #{}", rank + 1),
                None => println!("score {score} did not make the table"),
            },
            SessionEvent::GameOver { won, score } => println!(
                "{} score {score}",
                if won {
                    style("you won!").green().bold()
                } else {
                    style("game over").red().bold()
                }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::GameContent;
    use game_core::{BossPolicy, GameConfig, GeneratorConfig, Stats};
    use runtime::GameBuilder;

    fn game(boss: BossPolicy, player: Stats) -> Game {
        let mut config = GameConfig::default();
        config.generator = GeneratorConfig::default()
            .with_size(60, 60)
            .with_room_count(6)
            .with_boss(boss);
        config.progression.player = player;
        GameBuilder::new()
            .content(GameContent {
                config,
                ..GameContent::default()
            })
            .build()
            .expect("game should build")
    }

    #[tokio::test]
    async fn champion_clears_the_level() {
        let mut game = game(BossPolicy::LastRoom, Stats::new(1000, 500, 50, 10, 100));
        game.new_game(21).unwrap();

        let summary = autoplay(&mut game, 10_000).await.unwrap();
        assert_eq!(summary.status, GameStatus::Won);
        assert!(summary.steps > 0);
        assert!(summary.encounters > 0);
    }

    #[tokio::test]
    async fn step_budget_is_respected() {
        let mut game = game(BossPolicy::LastRoom, Stats::new(1000, 500, 50, 10, 100));
        game.new_game(4).unwrap();

        let summary = autoplay(&mut game, 1).await.unwrap();
        assert!(summary.steps <= 1);
    }
}
