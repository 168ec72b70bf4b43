//! Single-action resolution against a roster.
//!
//! Resolution never fails: an action that cannot apply (blocked move, dead
//! target, missing item) resolves to an outcome describing why it did
//! nothing, and leaves every combatant untouched.

use rand::Rng;

use crate::map::ItemKind;
use crate::state::{EntityId, Position};
use crate::stats::{StatKind, Stats};

use super::{Action, CombatEnv, Combatant};

/// Hit check: a roll in `[0, 100)` hits when it is below `accuracy`.
pub fn check_hit(accuracy: u32, roll: u32) -> bool {
    roll < accuracy
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub hit: bool,
    pub roll: u32,
    /// Health actually removed from the target.
    pub damage: u32,
    pub target_killed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveBlock {
    /// Zero-length, or longer than the rules allow.
    Distance,
    Terrain,
    Occupied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    Healed(u32),
    Boosted { stat: StatKind, by: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Moved { from: Position, to: Position },
    MoveBlocked(MoveBlock),
    Attacked(AttackReport),
    /// The target is missing, dead, or on the attacker's side.
    InvalidTarget,
    Defended,
    Waited,
    ItemUsed { item: ItemKind, effect: ItemEffect },
    ItemUnavailable(ItemKind),
}

/// Resolved action together with what it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    pub action: Action,
    pub outcome: ActionOutcome,
}

impl ActionReport {
    /// Target removed by this action, if it was a killing blow.
    pub fn killed(&self) -> Option<EntityId> {
        match (self.action, self.outcome) {
            (Action::Attack { target, .. }, ActionOutcome::Attacked(report))
                if report.target_killed =>
            {
                Some(target)
            }
            _ => None,
        }
    }
}

/// Applies `action` to `roster`. The actor must be present and alive.
pub(crate) fn resolve(
    action: &Action,
    roster: &mut [Combatant],
    env: &mut CombatEnv<'_>,
) -> ActionOutcome {
    match *action {
        Action::Move { actor, to } => resolve_move(actor, to, roster, env),
        Action::Attack { actor, target } => resolve_attack(actor, target, roster, env),
        Action::Defend { .. } => ActionOutcome::Defended,
        Action::Wait { .. } => ActionOutcome::Waited,
        Action::UseItem { actor, item } => resolve_item(actor, item, roster, env),
    }
}

fn index_of(roster: &[Combatant], id: EntityId) -> Option<usize> {
    roster.iter().position(|c| c.id == id)
}

fn resolve_move(
    actor: EntityId,
    to: Position,
    roster: &mut [Combatant],
    env: &mut CombatEnv<'_>,
) -> ActionOutcome {
    let Some(index) = index_of(roster, actor) else {
        return ActionOutcome::MoveBlocked(MoveBlock::Distance);
    };
    let from = roster[index].position;
    let distance = from.manhattan(to);
    if distance == 0 || distance > env.rules.max_step {
        return ActionOutcome::MoveBlocked(MoveBlock::Distance);
    }
    if !env.terrain.is_walkable(to) {
        return ActionOutcome::MoveBlocked(MoveBlock::Terrain);
    }
    if roster.iter().any(|c| c.is_alive() && c.position == to) {
        return ActionOutcome::MoveBlocked(MoveBlock::Occupied);
    }
    roster[index].position = to;
    ActionOutcome::Moved { from, to }
}

fn resolve_attack(
    actor: EntityId,
    target: EntityId,
    roster: &mut [Combatant],
    env: &mut CombatEnv<'_>,
) -> ActionOutcome {
    let (Some(attacker), Some(defender)) = (index_of(roster, actor), index_of(roster, target))
    else {
        return ActionOutcome::InvalidTarget;
    };
    if !roster[defender].is_alive() || !roster[attacker].is_hostile_to(&roster[defender]) {
        return ActionOutcome::InvalidTarget;
    }

    let Stats {
        attack, accuracy, ..
    } = roster[attacker].snapshot();
    let roll = env.rng.gen_range(0..100);
    let hit = check_hit(accuracy, roll);
    let damage = if hit {
        roster[defender].take_damage(attack)
    } else {
        0
    };

    ActionOutcome::Attacked(AttackReport {
        hit,
        roll,
        damage,
        target_killed: !roster[defender].is_alive(),
    })
}

fn resolve_item(
    actor: EntityId,
    item: ItemKind,
    roster: &mut [Combatant],
    env: &mut CombatEnv<'_>,
) -> ActionOutcome {
    let Some(index) = index_of(roster, actor) else {
        return ActionOutcome::ItemUnavailable(item);
    };
    // Treasure only scores on pickup.
    if item == ItemKind::Treasure || !env.hooks.take_item(item) {
        return ActionOutcome::ItemUnavailable(item);
    }

    let effect = match item.boosted_stat() {
        Some(stat) => ItemEffect::Boosted {
            stat,
            by: roster[index].stats.borrow_mut().boost(stat),
        },
        None => ItemEffect::Healed(roster[index].heal(env.rules.heal_amount)),
    };
    ActionOutcome::ItemUsed { item, effect }
}
