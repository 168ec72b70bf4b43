use std::collections::VecDeque;

use tracing::{debug, info};

use crate::ai::AiPolicy;
use crate::env::Reward;
use crate::state::EntityId;

use super::resolver::{self, ActionReport};
use super::{Action, CombatEnv, Combatant};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    #[default]
    Inactive,
    PlayerTurn,
    EnemyTurn,
    Ended,
}

/// How a finished encounter ended. Victory and defeat are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    Victory {
        boss_defeated: bool,
        /// Sum of the rewards of every enemy killed in the encounter.
        rewards: Reward,
    },
    Defeat,
}

/// Turn-based encounter state machine.
///
/// `Inactive -> PlayerTurn <-> EnemyTurn -> Ended -> Inactive`. The session
/// is the only thing that mutates the roster or the phase. The enemy turn is
/// a queue of enemy ids snapshotted when it begins; [`CombatSession::step`]
/// resolves one of them per call so a host can pace the turn.
pub struct CombatSession {
    phase: CombatPhase,
    roster: Vec<Combatant>,
    queue: VecDeque<EntityId>,
    policy: AiPolicy,
    round: u32,
    boss_present: bool,
    boss_defeated: bool,
    rewards: Reward,
    outcome: Option<CombatOutcome>,
}

impl Default for CombatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatSession {
    pub fn new() -> Self {
        Self::with_policy(AiPolicy::new())
    }

    pub fn with_policy(policy: AiPolicy) -> Self {
        Self {
            phase: CombatPhase::Inactive,
            roster: Vec::new(),
            queue: VecDeque::new(),
            policy,
            round: 0,
            boss_present: false,
            boss_defeated: false,
            rewards: Reward::default(),
            outcome: None,
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, CombatPhase::PlayerTurn | CombatPhase::EnemyTurn)
    }

    /// Completed player turns in the current encounter, starting at 0.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn roster(&self) -> &[Combatant] {
        &self.roster
    }

    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.roster.iter().find(|c| c.id == id)
    }

    pub fn player(&self) -> Option<&Combatant> {
        self.combatant(EntityId::PLAYER)
    }

    /// Enemies still in the roster.
    pub fn enemies(&self) -> impl Iterator<Item = &Combatant> {
        self.roster.iter().filter(|c| !c.is_player())
    }

    pub fn boss_present(&self) -> bool {
        self.boss_present
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    /// Outcome of the finished encounter, before [`CombatSession::conclude`].
    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    /// Begins an encounter. Ignored unless the session is inactive.
    pub fn start(&mut self, player: Combatant, enemies: Vec<Combatant>) -> bool {
        if self.phase != CombatPhase::Inactive {
            debug!(phase = %self.phase, "ignoring start of a second encounter");
            return false;
        }

        self.roster.clear();
        self.roster.push(player);
        self.roster
            .extend(enemies.into_iter().filter(|e| !e.is_player()));
        self.queue.clear();
        self.round = 0;
        self.boss_present = self.roster.iter().any(Combatant::is_boss);
        self.boss_defeated = false;
        self.rewards = Reward::default();
        self.outcome = None;
        self.phase = CombatPhase::PlayerTurn;

        info!(
            enemies = self.roster.len() - 1,
            boss = self.boss_present,
            "encounter started"
        );
        true
    }

    /// Resolves an action for the side whose turn it is.
    ///
    /// Returns `None` without touching any state when the session is not
    /// running, the actor is missing or dead, or it is the other side's turn.
    pub fn submit_action(&mut self, action: Action, env: &mut CombatEnv<'_>) -> Option<ActionReport> {
        let actor = action.actor();
        let Some(combatant) = self.combatant(actor) else {
            debug!(%actor, "ignoring action from unknown combatant");
            return None;
        };
        let turn_matches = match self.phase {
            CombatPhase::PlayerTurn => combatant.is_player(),
            CombatPhase::EnemyTurn => !combatant.is_player(),
            CombatPhase::Inactive | CombatPhase::Ended => {
                debug!(phase = %self.phase, "ignoring action outside an encounter");
                return None;
            }
        };
        if !combatant.is_alive() || !turn_matches {
            debug!(%actor, phase = %self.phase, "ignoring out-of-turn action");
            return None;
        }

        let report = self.execute(action, env);
        if self.phase == CombatPhase::PlayerTurn && action.ends_player_turn() {
            self.begin_enemy_turn();
        }
        Some(report)
    }

    /// Hands the turn to the enemies. Only meaningful during the player turn.
    pub fn end_turn(&mut self) -> bool {
        if self.phase != CombatPhase::PlayerTurn {
            return false;
        }
        self.begin_enemy_turn();
        true
    }

    /// Resolves the next queued enemy action.
    ///
    /// Enemies removed or killed since the turn began are skipped. Returns
    /// `None` once the queue is exhausted, at which point the player turn
    /// has already begun.
    pub fn step(&mut self, env: &mut CombatEnv<'_>) -> Option<ActionReport> {
        if self.phase != CombatPhase::EnemyTurn {
            return None;
        }

        let Some(id) = self.next_queued() else {
            self.begin_player_turn();
            return None;
        };

        let action = {
            let Some(player) = self.player() else {
                return None;
            };
            let Some(enemy) = self.combatant(id) else {
                return None;
            };
            self.policy
                .decide(enemy, player, enemy.profile(), &mut *env.rng)
        };

        let report = self.execute(action, env);
        if self.phase == CombatPhase::EnemyTurn && self.peek_queued().is_none() {
            self.begin_player_turn();
        }
        Some(report)
    }

    /// Drains the current enemy turn without pacing.
    pub fn run_enemy_turn(&mut self, env: &mut CombatEnv<'_>) -> Vec<ActionReport> {
        let mut reports = Vec::new();
        while self.phase == CombatPhase::EnemyTurn {
            match self.step(env) {
                Some(report) => reports.push(report),
                None => break,
            }
        }
        reports
    }

    /// Cancels a running encounter without an outcome.
    pub fn abort(&mut self) {
        if !self.is_active() {
            return;
        }
        info!("encounter aborted");
        self.queue.clear();
        self.outcome = None;
        self.phase = CombatPhase::Ended;
    }

    /// Takes the outcome of an ended encounter and resets to inactive.
    ///
    /// Returns `None` (and does nothing) while an encounter is still running.
    pub fn conclude(&mut self) -> Option<CombatOutcome> {
        if self.phase != CombatPhase::Ended {
            return None;
        }
        let outcome = self.outcome.take();
        self.roster.clear();
        self.queue.clear();
        self.boss_present = false;
        self.boss_defeated = false;
        self.rewards = Reward::default();
        self.phase = CombatPhase::Inactive;
        outcome
    }

    fn execute(&mut self, action: Action, env: &mut CombatEnv<'_>) -> ActionReport {
        let outcome = resolver::resolve(&action, &mut self.roster, env);
        let report = ActionReport { action, outcome };
        debug!(action = action.name(), actor = %action.actor(), ?outcome, "resolved action");

        if let Some(killed) = report.killed() {
            self.remove_enemy(killed, env);
        }
        self.check_end(env);
        report
    }

    fn remove_enemy(&mut self, id: EntityId, env: &mut CombatEnv<'_>) {
        let Some(index) = self.roster.iter().position(|c| c.id == id && !c.is_player()) else {
            return;
        };
        let reward = self.roster[index].reward();
        env.hooks.on_enemy_killed(&self.roster[index], reward);
        let enemy = self.roster.remove(index);
        if enemy.is_boss() {
            self.boss_defeated = true;
        }
        self.rewards.xp += reward.xp;
        self.rewards.score += reward.score;
    }

    fn check_end(&mut self, env: &mut CombatEnv<'_>) {
        if !self.is_active() {
            return;
        }
        let player_alive = self.player().is_some_and(Combatant::is_alive);
        let outcome = if !player_alive {
            env.hooks.on_player_died();
            CombatOutcome::Defeat
        } else if self.enemies().next().is_none() {
            env.hooks.on_player_won(self.boss_defeated);
            CombatOutcome::Victory {
                boss_defeated: self.boss_defeated,
                rewards: self.rewards,
            }
        } else {
            return;
        };

        info!(?outcome, rounds = self.round, "encounter ended");
        self.queue.clear();
        self.outcome = Some(outcome);
        self.phase = CombatPhase::Ended;
    }

    fn begin_enemy_turn(&mut self) {
        self.queue = self
            .roster
            .iter()
            .filter(|c| !c.is_player() && c.is_alive())
            .map(|c| c.id)
            .collect();
        self.phase = CombatPhase::EnemyTurn;
    }

    fn begin_player_turn(&mut self) {
        self.queue.clear();
        self.round += 1;
        self.phase = CombatPhase::PlayerTurn;
    }

    /// Pops queued ids until one names a live enemy.
    fn next_queued(&mut self) -> Option<EntityId> {
        while let Some(id) = self.queue.pop_front() {
            if self.combatant(id).is_some_and(Combatant::is_alive) {
                return Some(id);
            }
        }
        None
    }

    fn peek_queued(&self) -> Option<EntityId> {
        self.queue
            .iter()
            .copied()
            .find(|id| self.combatant(*id).is_some_and(Combatant::is_alive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatHooks, NoHooks};
    use crate::config::CombatRules;
    use crate::env::{EnemyTemplate, OpenFloor};
    use crate::map::EnemyKind;
    use crate::state::Position;
    use crate::stats::{SharedStats, Stats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Default)]
    struct Tally {
        killed: Vec<EntityId>,
        won: Option<bool>,
        died: bool,
    }

    impl CombatHooks for Tally {
        fn on_enemy_killed(&mut self, enemy: &Combatant, _reward: Reward) {
            self.killed.push(enemy.id);
        }

        fn on_player_died(&mut self) {
            self.died = true;
        }

        fn on_player_won(&mut self, boss_defeated: bool) {
            self.won = Some(boss_defeated);
        }
    }

    fn enemy(id: u32, x: i32, stats: Stats) -> Combatant {
        let mut template = EnemyTemplate::builtin(EnemyKind::SecurityBot);
        template.stats = stats;
        Combatant::enemy(EntityId(id), Position::new(x, 0), &template)
    }

    fn sure_shot() -> Combatant {
        Combatant::player(
            Position::new(0, 0),
            SharedStats::new(Stats::new(100, 15, 8, 12, 100)),
        )
    }

    #[test]
    fn actions_outside_an_encounter_are_ignored() {
        let mut session = CombatSession::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut hooks = NoHooks;
        let rules = CombatRules::default();
        let floor = OpenFloor::new(8, 8);
        let mut env = CombatEnv::new(&floor, &rules, &mut rng, &mut hooks);

        let wait = Action::Wait {
            actor: EntityId::PLAYER,
        };
        assert_eq!(session.submit_action(wait, &mut env), None);
        assert_eq!(session.step(&mut env), None);
        assert!(!session.end_turn());
        assert_eq!(session.conclude(), None);
    }

    #[test]
    fn second_start_is_ignored_while_running() {
        let mut session = CombatSession::new();
        assert!(session.start(sure_shot(), vec![enemy(1, 1, Stats::new(5, 1, 0, 1, 0))]));
        assert!(!session.start(sure_shot(), Vec::new()));
        assert_eq!(session.enemies().count(), 1);
    }

    #[test]
    fn killing_the_last_enemy_wins_immediately() {
        let mut session = CombatSession::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut hooks = Tally::default();
        let rules = CombatRules::default();
        let floor = OpenFloor::new(8, 8);

        session.start(sure_shot(), vec![enemy(1, 1, Stats::new(1, 1, 0, 1, 0))]);
        {
            let mut env = CombatEnv::new(&floor, &rules, &mut rng, &mut hooks);
            let report = session
                .submit_action(
                    Action::Attack {
                        actor: EntityId::PLAYER,
                        target: EntityId(1),
                    },
                    &mut env,
                )
                .expect("player acts on its own turn");
            assert_eq!(report.killed(), Some(EntityId(1)));
        }

        assert_eq!(session.phase(), CombatPhase::Ended);
        assert_eq!(session.enemies().count(), 0);
        assert_eq!(hooks.killed, vec![EntityId(1)]);
        assert_eq!(hooks.won, Some(false));
        assert!(!hooks.died);
        assert!(matches!(
            session.conclude(),
            Some(CombatOutcome::Victory {
                boss_defeated: false,
                ..
            })
        ));
        assert_eq!(session.phase(), CombatPhase::Inactive);
    }

    #[test]
    fn defend_keeps_the_player_turn_until_ended() {
        let mut session = CombatSession::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut hooks = NoHooks;
        let rules = CombatRules::default();
        let floor = OpenFloor::new(8, 8);
        let mut env = CombatEnv::new(&floor, &rules, &mut rng, &mut hooks);

        session.start(sure_shot(), vec![enemy(1, 5, Stats::new(40, 1, 0, 1, 0))]);
        let defend = Action::Defend {
            actor: EntityId::PLAYER,
        };
        assert!(session.submit_action(defend, &mut env).is_some());
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);

        assert!(session.end_turn());
        assert_eq!(session.phase(), CombatPhase::EnemyTurn);
        assert!(session.submit_action(defend, &mut env).is_none());

        let reports = session.run_enemy_turn(&mut env);
        assert_eq!(reports.len(), 1);
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
        assert_eq!(session.round(), 1);
    }

    #[test]
    fn player_death_ends_with_defeat_and_discards_queue() {
        let mut session = CombatSession::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut hooks = Tally::default();
        let rules = CombatRules::default();
        let floor = OpenFloor::new(8, 8);

        let frail = Combatant::player(
            Position::new(0, 0),
            SharedStats::new(Stats::new(1, 1, 0, 1, 0)),
        );
        let brute = Stats::new(50, 30, 0, 1, 100);
        session.start(frail, vec![enemy(1, 1, brute), enemy(2, -1, brute)]);
        {
            let mut env = CombatEnv::new(&floor, &rules, &mut rng, &mut hooks);
            session.end_turn();
            let first = session.step(&mut env).expect("first enemy acts");
            assert!(matches!(first.action, Action::Attack { .. }));
            assert_eq!(session.step(&mut env), None);
        }

        assert!(hooks.died);
        assert_eq!(hooks.won, None);
        assert_eq!(session.conclude(), Some(CombatOutcome::Defeat));
    }

    #[derive(Default)]
    struct LastRites {
        seen: Vec<(EntityId, Position, bool, Reward)>,
    }

    impl CombatHooks for LastRites {
        fn on_enemy_killed(&mut self, enemy: &Combatant, reward: Reward) {
            self.seen
                .push((enemy.id, enemy.position, enemy.is_alive(), reward));
        }
    }

    #[test]
    fn kill_hook_sees_the_enemy_where_it_fell() {
        let mut session = CombatSession::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut hooks = LastRites::default();
        let rules = CombatRules::default();
        let floor = OpenFloor::new(8, 8);

        let weak = enemy(1, 1, Stats::new(1, 1, 0, 1, 0));
        let reward = weak.reward();
        session.start(
            sure_shot(),
            vec![weak, enemy(2, 4, Stats::new(40, 1, 0, 1, 0))],
        );
        {
            let mut env = CombatEnv::new(&floor, &rules, &mut rng, &mut hooks);
            let attack = Action::Attack {
                actor: EntityId::PLAYER,
                target: EntityId(1),
            };
            session
                .submit_action(attack, &mut env)
                .expect("player acts on its own turn");
        }

        assert_eq!(
            hooks.seen,
            vec![(EntityId(1), Position::new(1, 0), false, reward)]
        );
        assert!(session.combatant(EntityId(1)).is_none());
        assert_eq!(session.rewards, reward);
    }

    #[test]
    fn abort_ends_without_outcome() {
        let mut session = CombatSession::new();
        session.start(sure_shot(), vec![enemy(1, 1, Stats::new(5, 1, 0, 1, 0))]);
        session.abort();
        assert_eq!(session.phase(), CombatPhase::Ended);
        assert_eq!(session.conclude(), None);
        assert_eq!(session.phase(), CombatPhase::Inactive);
    }
}
