//! One playable run: exploration, encounters, persistence and scoring.
//!
//! [`Game`] owns the level, the live spawn manifest and the player's
//! progress. Exploration is synchronous; encounters are driven by
//! [`Game::run_encounter`], which yields between enemy steps so a host can
//! pace and observe them through the [`EventBus`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use game_content::GameContent;
use game_core::combat::encounter;
use game_core::{
    BossSpawn, CombatEnv, CombatOutcome, CombatPhase, CombatSession, Combatant, Direction,
    DungeonGenerator, EnemyKind, EntityId, Experience, HighScore, ItemKind, Level, Obstructed,
    PickupEffect, Position, Progress, ScoreLedger, SpawnManifest,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{CombatEvent, EventBus, SessionEvent, WorldEvent};
use crate::provider::{ActionProvider, PlayerView};
use crate::repository::{MapRepository, SaveRepository, ScoreRepository};
use crate::save::{MapSave, PlayerSave, SaveRecord};

/// Mixed into the level seed to derive the combat roll stream.
const COMBAT_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Exploring,
    InCombat,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Exploring => "exploring",
            GameStatus::InCombat => "in combat",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Result of one exploration step.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveReport {
    pub from: Position,
    /// Position after the step; equal to `from` when blocked.
    pub to: Position,
    pub moved: bool,
    pub pickups: Vec<(ItemKind, PickupEffect)>,
    pub rescued: bool,
    pub boss_released: Option<BossSpawn>,
    /// Enemies pulled into a newly started encounter.
    pub encounter: Option<Vec<EntityId>>,
}

impl MoveReport {
    fn blocked(at: Position) -> Self {
        Self {
            from: at,
            to: at,
            moved: false,
            pickups: Vec::new(),
            rescued: false,
            boss_released: None,
            encounter: None,
        }
    }
}

/// Result of a finished (or aborted) encounter.
#[derive(Clone, Debug, PartialEq)]
pub struct EncounterReport {
    /// `None` when the encounter hit the round cap and was aborted.
    pub outcome: Option<CombatOutcome>,
    pub rounds: u32,
    pub killed: Vec<EntityId>,
    pub levels_gained: u32,
}

struct Run {
    level: Level,
    spawns: SpawnManifest,
    /// Hex SHA-256 of the level as generated from its seed.
    fingerprint: String,
    progress: Progress,
    position: Position,
    session: CombatSession,
    /// Cells held by bystanders while an encounter runs.
    obstacles: HashSet<Position>,
    rng: ChaCha8Rng,
    status: GameStatus,
    play_time: Duration,
    resumed_at: Instant,
}

impl Run {
    fn play_time(&self) -> Duration {
        self.play_time + self.resumed_at.elapsed()
    }

    fn require(&self, operation: &'static str, status: GameStatus) -> Result<()> {
        if self.status != status {
            return Err(RuntimeError::InvalidState {
                operation,
                status: self.status.as_str(),
            });
        }
        Ok(())
    }

    /// Releases a gated boss once every hostage is out, or immediately when
    /// the level has none.
    fn release_boss(&mut self) -> Option<BossSpawn> {
        let hostages = &self.progress.hostages;
        let boss = self.spawns.boss.as_mut()?;
        if !boss.gated || (hostages.total() > 0 && !hostages.all_rescued()) {
            return None;
        }
        boss.gated = false;
        info!(id = %boss.id, position = %boss.position, "boss released");
        Some(*boss)
    }

    /// Copies where the encounter left its survivors back onto the map.
    fn sync_positions(&mut self) {
        if let Some(player) = self.session.player() {
            self.position = player.position;
        }
        for combatant in self.session.enemies() {
            if let Some(spawn) = self.spawns.enemies.iter_mut().find(|e| e.id == combatant.id) {
                spawn.position = combatant.position;
            } else if let Some(boss) = self.spawns.boss.as_mut()
                && boss.id == combatant.id
            {
                boss.position = combatant.position;
            }
        }
    }

    fn is_blocked(&self, position: Position) -> bool {
        !self.level.grid().is_walkable(position)
            || self.spawns.enemies.iter().any(|e| e.position == position)
            || self
                .spawns
                .boss
                .is_some_and(|b| !b.gated && b.position == position)
    }
}

/// A game session: content, repositories and at most one active run.
///
/// Built by [`crate::GameBuilder`].
pub struct Game {
    content: GameContent,
    generator: DungeonGenerator,
    config: RuntimeConfig,
    saves: Arc<dyn SaveRepository>,
    maps: Arc<dyn MapRepository>,
    scores: Arc<dyn ScoreRepository>,
    events: EventBus,
    ledger: ScoreLedger,
    run: Option<Run>,
}

impl Game {
    pub(crate) fn new(
        content: GameContent,
        generator: DungeonGenerator,
        config: RuntimeConfig,
        saves: Arc<dyn SaveRepository>,
        maps: Arc<dyn MapRepository>,
        scores: Arc<dyn ScoreRepository>,
        events: EventBus,
    ) -> Self {
        let capacity = content.config.progression.ledger_capacity;
        let ledger = match scores.load() {
            Ok(Some(entries)) => ScoreLedger::from_entries(capacity, entries),
            Ok(None) => ScoreLedger::new(capacity),
            Err(err) => {
                warn!(%err, "high scores unreadable, starting an empty table");
                ScoreLedger::new(capacity)
            }
        };

        Self {
            content,
            generator,
            config,
            saves,
            maps,
            scores,
            events,
            ledger,
            run: None,
        }
    }

    pub fn content(&self) -> &GameContent {
        &self.content
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn high_scores(&self) -> &[HighScore] {
        self.ledger.entries()
    }

    pub fn status(&self) -> Option<GameStatus> {
        self.run.as_ref().map(|run| run.status)
    }

    pub fn level(&self) -> Option<&Level> {
        self.run.as_ref().map(|run| &run.level)
    }

    /// Spawns still present in the running level.
    pub fn spawns(&self) -> Option<&SpawnManifest> {
        self.run.as_ref().map(|run| &run.spawns)
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.run.as_ref().map(|run| &run.progress)
    }

    pub fn player_position(&self) -> Option<Position> {
        self.run.as_ref().map(|run| run.position)
    }

    pub fn session(&self) -> Option<&CombatSession> {
        self.run.as_ref().map(|run| &run.session)
    }

    /// Starts a new run on the level generated from `seed`.
    pub fn new_game(&mut self, seed: u64) -> Result<()> {
        let mut level = self.generator.generate(seed);
        let fingerprint = hex::encode(level.fingerprint());
        if let Err(err) = self.maps.save(seed, &level.export()) {
            warn!(%err, seed, "could not cache generated level");
        }

        let position = level.start_position().ok_or(RuntimeError::EmptyLevel { seed })?;
        let spawns = level.take_spawns();
        let mut progress = Progress::new(&self.content.config.progression);
        progress.hostages = game_core::HostageTracker::new(spawns.hostages.len() as u32);

        self.events.publish(SessionEvent::NewGame {
            seed,
            rooms: level.rooms().len(),
            enemies: spawns.enemies.len(),
            hostages: spawns.hostages.len(),
            items: spawns.items.len(),
        });
        info!(seed, %position, fingerprint = %fingerprint, "new game");

        let mut run = Run {
            level,
            spawns,
            fingerprint,
            progress,
            position,
            session: CombatSession::new(),
            obstacles: HashSet::new(),
            rng: ChaCha8Rng::seed_from_u64(seed ^ COMBAT_STREAM),
            status: GameStatus::Exploring,
            play_time: Duration::ZERO,
            resumed_at: Instant::now(),
        };
        if let Some(boss) = run.release_boss() {
            self.events.publish(WorldEvent::BossReleased(boss));
        }
        self.run = Some(run);
        Ok(())
    }

    /// Moves the player one tile, collecting whatever lies there and
    /// starting an encounter if an enemy is now close enough.
    pub fn move_player(&mut self, direction: Direction) -> Result<MoveReport> {
        let Game {
            run,
            content,
            events,
            ..
        } = self;
        let run = run.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        run.require("move", GameStatus::Exploring)?;

        let from = run.position;
        let to = from.step(direction);
        if run.is_blocked(to) {
            debug!(%from, %to, "move blocked");
            return Ok(MoveReport::blocked(from));
        }
        run.position = to;
        events.publish(WorldEvent::PlayerMoved { from, to });

        let mut report = MoveReport {
            to,
            moved: true,
            ..MoveReport::blocked(from)
        };

        while let Some(index) = run.spawns.items.iter().position(|i| i.position == to) {
            let item = run.spawns.items.remove(index).kind;
            let effect = run.progress.pick_up(item);
            debug!(%item, ?effect, "picked up item");
            events.publish(WorldEvent::ItemPicked { item, effect });
            report.pickups.push((item, effect));
        }

        if let Some(index) = run.spawns.hostages.iter().position(|h| *h == to) {
            run.spawns.hostages.remove(index);
            run.progress.hostages.rescue();
            report.rescued = true;
            events.publish(WorldEvent::HostageRescued {
                rescued: run.progress.hostages.rescued(),
                total: run.progress.hostages.total(),
            });
            if let Some(boss) = run.release_boss() {
                events.publish(WorldEvent::BossReleased(boss));
                report.boss_released = Some(boss);
            }
        }

        report.encounter = start_encounter(run, content, events);
        Ok(report)
    }

    /// Uses a carried heal item while exploring. Returns the health restored,
    /// or `None` when no heal item is carried.
    pub fn use_heal(&mut self) -> Result<Option<u32>> {
        let run = self.run.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        run.require("heal", GameStatus::Exploring)?;

        let amount = self.content.config.combat.heal_amount;
        let restored = run
            .progress
            .inventory
            .use_heal(&mut run.progress.stats.borrow_mut(), amount);
        match restored {
            Some(restored) => {
                debug!(restored, "healed outside combat");
                self.events.publish(WorldEvent::Healed { restored });
            }
            None => debug!("no heal item carried"),
        }
        Ok(restored)
    }

    /// Drives the running encounter to its end.
    ///
    /// The provider is asked for one action per player turn. Enemy actions
    /// are resolved one at a time with the configured pacing in between.
    /// Every resolved action is published on the combat topic.
    pub async fn run_encounter(&mut self, provider: &dyn ActionProvider) -> Result<EncounterReport> {
        let Game {
            run,
            content,
            config,
            events,
            ..
        } = self;
        let run = run.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        run.require("run an encounter", GameStatus::InCombat)?;

        let rules = &content.config.combat;
        let level_before = run.progress.experience.level();
        let mut killed = Vec::new();

        while run.session.is_active() {
            if run.session.round() >= config.max_rounds {
                warn!(rounds = run.session.round(), "encounter stalled, aborting");
                run.session.abort();
                break;
            }

            match run.session.phase() {
                CombatPhase::PlayerTurn => {
                    let action = provider
                        .provide_action(PlayerView {
                            session: &run.session,
                            progress: &run.progress,
                        })
                        .await?;
                    let report = {
                        let terrain = Obstructed::new(run.level.grid(), &run.obstacles);
                        let mut env = CombatEnv::new(
                            &terrain,
                            rules,
                            &mut run.rng,
                            &mut run.progress,
                        );
                        run.session.submit_action(action, &mut env)
                    };
                    match report {
                        Some(report) => {
                            killed.extend(report.killed());
                            events.publish(CombatEvent::Resolved(report));
                        }
                        None => debug!(?action, "player action rejected"),
                    }
                    if run.session.phase() == CombatPhase::PlayerTurn {
                        run.session.end_turn();
                    }
                }
                CombatPhase::EnemyTurn => {
                    let report = {
                        let terrain = Obstructed::new(run.level.grid(), &run.obstacles);
                        let mut env = CombatEnv::new(
                            &terrain,
                            rules,
                            &mut run.rng,
                            &mut run.progress,
                        );
                        run.session.step(&mut env)
                    };
                    if let Some(report) = report {
                        killed.extend(report.killed());
                        events.publish(CombatEvent::Resolved(report));
                        if !config.pacing.is_zero() {
                            tokio::time::sleep(config.pacing).await;
                        }
                    }
                }
                CombatPhase::Inactive | CombatPhase::Ended => break,
            }
        }

        let rounds = run.session.round();
        run.sync_positions();
        let outcome = run.session.conclude();
        run.obstacles.clear();

        run.spawns.enemies.retain(|e| !killed.contains(&e.id));
        if let Some(boss) = run.spawns.boss
            && killed.contains(&boss.id)
        {
            run.spawns.boss = None;
        }

        let progression = &content.config.progression;
        run.status = match outcome {
            Some(CombatOutcome::Victory {
                boss_defeated: true,
                ..
            }) => {
                run.progress.score += progression.victory_score;
                GameStatus::Won
            }
            Some(CombatOutcome::Victory { .. }) => {
                run.progress.score += progression.encounter_score;
                GameStatus::Exploring
            }
            Some(CombatOutcome::Defeat) => GameStatus::Lost,
            None => GameStatus::Exploring,
        };

        let level_after = run.progress.experience.level();
        if level_after > level_before {
            events.publish(WorldEvent::LevelUp { level: level_after });
        }
        events.publish(CombatEvent::Ended { outcome, rounds });
        if run.status.is_over() {
            info!(status = run.status.as_str(), score = run.progress.score, "game over");
            events.publish(SessionEvent::GameOver {
                won: run.status == GameStatus::Won,
                score: run.progress.score,
            });
        }

        Ok(EncounterReport {
            outcome,
            rounds,
            killed,
            levels_gained: level_after - level_before,
        })
    }

    /// Writes the running game to `slot`. Not allowed mid-encounter.
    pub fn save(&self, slot: &str) -> Result<()> {
        let run = self.run.as_ref().ok_or(RuntimeError::NoActiveGame)?;
        run.require("save", GameStatus::Exploring)?;

        let stats = run.progress.stats.snapshot();
        let grid = run.level.grid();
        let record = SaveRecord {
            version: SaveRecord::VERSION,
            player: PlayerSave {
                position: run.position,
                health: stats.current_health,
                max_health: stats.max_health,
                stats,
                level: run.progress.experience.level(),
                xp: run.progress.experience.xp(),
                inventory: run.progress.inventory.clone(),
                hostages: run.progress.hostages,
            },
            map: MapSave {
                seed: run.level.seed(),
                width: grid.width(),
                height: grid.height(),
                full_map: Some(run.level.export_with(&run.spawns)),
                fingerprint: run.fingerprint.clone(),
            },
            score: run.progress.score,
            play_time_secs: run.play_time().as_secs(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };

        self.saves.save(slot, &record)?;
        info!(slot, score = record.score, "game saved");
        self.events.publish(SessionEvent::Saved {
            slot: slot.to_string(),
        });
        Ok(())
    }

    /// Replaces the current run with the one saved in `slot`.
    ///
    /// The stored map is preferred. When it is missing or invalid the level
    /// is taken from the map cache or regenerated from its seed, with a
    /// warning if the result no longer matches the saved fingerprint.
    pub fn load(&mut self, slot: &str) -> Result<()> {
        let record = self
            .saves
            .load(slot)?
            .ok_or_else(|| RuntimeError::SaveNotFound(slot.to_string()))?;

        let imported = match record.map.full_map.clone().map(Level::import) {
            Some(Ok(level)) => Some(level),
            Some(Err(err)) => {
                warn!(%err, slot, "saved map is invalid");
                None
            }
            None => None,
        };
        let restored_map = imported.is_some();
        let mut level = match imported {
            Some(level) => level,
            None => self.rebuild_level(&record.map),
        };

        let spawns = level.take_spawns();
        let position = if level.grid().is_walkable(record.player.position) {
            record.player.position
        } else {
            warn!(position = %record.player.position, "saved position is not walkable");
            level
                .start_position()
                .ok_or(RuntimeError::EmptyLevel { seed: record.map.seed })?
        };

        let progression = &self.content.config.progression;
        let mut progress = Progress::new(progression);
        progress.stats.replace(record.player.restored_stats());
        progress.experience = Experience::new(progression.base_xp, progression.xp_multiplier)
            .restore(record.player.level, record.player.xp);
        progress.inventory = record.player.inventory.clone();
        progress.hostages = record.player.hostages;
        progress.score = record.score;

        let mut run = Run {
            rng: ChaCha8Rng::seed_from_u64(level.seed() ^ COMBAT_STREAM),
            level,
            spawns,
            fingerprint: record.map.fingerprint.clone(),
            progress,
            position,
            session: CombatSession::new(),
            obstacles: HashSet::new(),
            status: GameStatus::Exploring,
            play_time: Duration::from_secs(record.play_time_secs),
            resumed_at: Instant::now(),
        };
        if let Some(boss) = run.release_boss() {
            self.events.publish(WorldEvent::BossReleased(boss));
        }
        self.run = Some(run);

        info!(slot, restored_map, "game loaded");
        self.events.publish(SessionEvent::Loaded {
            slot: slot.to_string(),
            restored_map,
        });
        Ok(())
    }

    /// Records the current run's score. Returns its rank in the table, or
    /// `None` if it did not qualify.
    pub fn record_score(&mut self, name: &str) -> Result<Option<usize>> {
        let run = self.run.as_ref().ok_or(RuntimeError::NoActiveGame)?;
        let score = run.progress.score;
        if !self.ledger.qualifies(score) {
            debug!(score, "score did not make the table");
            self.events.publish(SessionEvent::ScoreRecorded { score, rank: None });
            return Ok(None);
        }

        let rank = self.ledger.record(HighScore {
            name: name.to_string(),
            score,
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            seed: run.level.seed(),
        });
        self.scores.save(self.ledger.entries())?;
        self.events.publish(SessionEvent::ScoreRecorded { score, rank });
        Ok(rank)
    }

    fn rebuild_level(&self, map: &MapSave) -> Level {
        let cached = match self.maps.load(map.seed) {
            Ok(Some(export)) => Level::import(export)
                .inspect_err(|err| warn!(%err, seed = map.seed, "cached level is invalid"))
                .ok(),
            Ok(None) => None,
            Err(err) => {
                warn!(%err, seed = map.seed, "cached level unreadable");
                None
            }
        };
        let level = cached.unwrap_or_else(|| {
            warn!(seed = map.seed, "regenerating level from seed");
            self.generator.generate(map.seed)
        });

        let fingerprint = hex::encode(level.fingerprint());
        if fingerprint != map.fingerprint {
            warn!(
                seed = map.seed,
                expected = %map.fingerprint,
                actual = %fingerprint,
                "rebuilt level differs from the saved one"
            );
        }
        level
    }
}

/// Starts an encounter if a visible enemy is inside the trigger radius.
fn start_encounter(run: &mut Run, content: &GameContent, events: &EventBus) -> Option<Vec<EntityId>> {
    let candidates: Vec<(EntityId, Position)> = run
        .spawns
        .enemies
        .iter()
        .map(|e| (e.id, e.position))
        .chain(
            run.spawns
                .boss
                .iter()
                .filter(|b| !b.gated)
                .map(|b| (b.id, b.position)),
        )
        .collect();
    let ids = encounter::triggered(run.position, &content.config.combat, candidates)?;

    let enemies: Vec<Combatant> = ids
        .iter()
        .filter_map(|id| {
            if let Some(spawn) = run.spawns.enemies.iter().find(|e| e.id == *id) {
                return Some(Combatant::from_spawn(
                    spawn,
                    &content.enemies.resolve(spawn.kind),
                ));
            }
            run.spawns.boss.filter(|b| b.id == *id).map(|boss| {
                Combatant::enemy(
                    boss.id,
                    boss.position,
                    &content.enemies.resolve(EnemyKind::Boss),
                )
            })
        })
        .collect();

    let player = Combatant::player(run.position, run.progress.stats.clone());
    if !run.session.start(player, enemies) {
        return None;
    }
    run.obstacles = run
        .spawns
        .enemies
        .iter()
        .filter(|e| !ids.contains(&e.id))
        .map(|e| e.position)
        .chain(
            run.spawns
                .boss
                .iter()
                .filter(|b| !ids.contains(&b.id))
                .map(|b| b.position),
        )
        .chain(run.spawns.hostages.iter().copied())
        .collect();
    run.status = GameStatus::InCombat;
    events.publish(CombatEvent::Started {
        enemies: ids.clone(),
        boss: run.session.boss_present(),
    });
    Some(ids)
}
