use rand::RngCore;

use crate::combat::{Action, Combatant};

use super::nodes::{
    AttackTarget, Chose, Defend, HealthAbove, InAttackRange, InGuardRange, InPursuitRange,
    StepToward, Wait, Within,
};
use super::tree::{BehaviorNode, Node, inverter, selector, sequence};
use super::{AiContext, DecisionRolls};

/// Temperament of an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// Attacks in range, otherwise closes in.
    #[default]
    Aggressive,
    /// Attacks only when adjacent and braces when the target is near.
    Defensive,
    /// Commits only while healthy; defends otherwise.
    Cautious,
    /// Picks uniformly among attack, step, defend and wait.
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiProfile {
    pub behavior: Behavior,
    /// Manhattan reach of an attack.
    pub attack_range: u32,
    /// Pursuit reaches twice this distance.
    pub move_range: u32,
}

impl AiProfile {
    pub const fn new(behavior: Behavior, attack_range: u32, move_range: u32) -> Self {
        Self {
            behavior,
            attack_range,
            move_range,
        }
    }
}

impl Default for AiProfile {
    fn default() -> Self {
        Self::new(Behavior::Aggressive, 1, 3)
    }
}

/// Enemy decision making: one behavior tree per [`Behavior`], plus a
/// fallback for enemies without a profile.
pub struct AiPolicy {
    aggressive: Node<AiContext>,
    defensive: Node<AiContext>,
    cautious: Node<AiContext>,
    random: Node<AiContext>,
    fallback: Node<AiContext>,
}

impl Default for AiPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPolicy {
    pub fn new() -> Self {
        Self {
            aggressive: aggressive_tree(),
            defensive: defensive_tree(),
            cautious: cautious_tree(),
            random: random_tree(),
            fallback: fallback_tree(),
        }
    }

    /// Draws [`DecisionRolls`] from `rng` and decides.
    pub fn decide(
        &self,
        actor: &Combatant,
        opponent: &Combatant,
        profile: Option<&AiProfile>,
        rng: &mut dyn RngCore,
    ) -> Action {
        let rolls = DecisionRolls::draw(rng);
        self.decide_with(actor, opponent, profile, rolls)
    }

    /// Deterministic decision for fixed rolls.
    pub fn decide_with(
        &self,
        actor: &Combatant,
        opponent: &Combatant,
        profile: Option<&AiProfile>,
        rolls: DecisionRolls,
    ) -> Action {
        let tree = match profile.map(|p| p.behavior) {
            Some(Behavior::Aggressive) => &self.aggressive,
            Some(Behavior::Defensive) => &self.defensive,
            Some(Behavior::Cautious) => &self.cautious,
            Some(Behavior::Random) => &self.random,
            None => &self.fallback,
        };
        let mut ctx = AiContext::new(actor, opponent, profile.copied().unwrap_or_default(), rolls);
        tree.tick(&mut ctx);
        ctx.take_action()
            .unwrap_or(Action::Wait { actor: actor.id })
    }
}

fn aggressive_tree() -> Node<AiContext> {
    selector(vec![
        sequence(vec![Box::new(InAttackRange), Box::new(AttackTarget)]),
        sequence(vec![Box::new(InPursuitRange), Box::new(StepToward)]),
        Box::new(Wait),
    ])
}

fn defensive_tree() -> Node<AiContext> {
    selector(vec![
        sequence(vec![Box::new(Within(1)), Box::new(AttackTarget)]),
        sequence(vec![Box::new(InGuardRange), Box::new(Defend)]),
        sequence(vec![Box::new(InPursuitRange), Box::new(StepToward)]),
        Box::new(Wait),
    ])
}

fn cautious_tree() -> Node<AiContext> {
    selector(vec![
        sequence(vec![
            Box::new(InAttackRange),
            Box::new(HealthAbove(0.5)),
            Box::new(AttackTarget),
        ]),
        sequence(vec![
            Box::new(HealthAbove(0.3)),
            inverter(Box::new(InAttackRange)),
            Box::new(InPursuitRange),
            Box::new(StepToward),
        ]),
        Box::new(Defend),
    ])
}

/// Each option falls back to waiting when it does not apply.
fn random_tree() -> Node<AiContext> {
    selector(vec![
        sequence(vec![
            Box::new(Chose(0)),
            selector(vec![
                sequence(vec![Box::new(InAttackRange), Box::new(AttackTarget)]),
                Box::new(Wait),
            ]),
        ]),
        sequence(vec![
            Box::new(Chose(1)),
            selector(vec![
                sequence(vec![inverter(Box::new(Within(1))), Box::new(StepToward)]),
                Box::new(Wait),
            ]),
        ]),
        sequence(vec![Box::new(Chose(2)), Box::new(Defend)]),
        Box::new(Wait),
    ])
}

fn fallback_tree() -> Node<AiContext> {
    selector(vec![
        sequence(vec![Box::new(Within(1)), Box::new(AttackTarget)]),
        Box::new(StepToward),
        Box::new(Wait),
    ])
}
