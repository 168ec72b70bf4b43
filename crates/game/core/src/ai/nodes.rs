//! Condition and action nodes over [`AiContext`].
//!
//! Conditions only read the blackboard. Actions write the chosen [`Action`]
//! and succeed, or fail when the action makes no sense from here.

use crate::combat::Action;
use crate::state::Direction;

use super::AiContext;
use super::tree::{BehaviorNode, Status};

/// Target within `profile.attack_range`.
pub struct InAttackRange;

impl BehaviorNode<AiContext> for InAttackRange {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.distance() <= ctx.profile.attack_range)
    }
}

/// Target within `attack_range + 1`: close enough to brace for it.
pub struct InGuardRange;

impl BehaviorNode<AiContext> for InGuardRange {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.distance() <= ctx.profile.attack_range + 1)
    }
}

/// Target within twice `profile.move_range`.
pub struct InPursuitRange;

impl BehaviorNode<AiContext> for InPursuitRange {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.distance() <= ctx.profile.move_range * 2)
    }
}

/// Target within a fixed distance.
pub struct Within(pub u32);

impl BehaviorNode<AiContext> for Within {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.distance() <= self.0)
    }
}

/// Own health strictly above a fraction of maximum.
pub struct HealthAbove(pub f32);

impl BehaviorNode<AiContext> for HealthAbove {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.health_fraction > self.0)
    }
}

/// Pre-drawn choice roll equals the given option.
pub struct Chose(pub u8);

impl BehaviorNode<AiContext> for Chose {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        Status::from_bool(ctx.rolls.choice == self.0)
    }
}

pub struct AttackTarget;

impl BehaviorNode<AiContext> for AttackTarget {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        ctx.set_action(Action::Attack {
            actor: ctx.actor,
            target: ctx.target,
        });
        Status::Success
    }
}

/// One axis-aligned step toward the target. Fails when already on it.
///
/// Walkability is left to the resolver; a blocked step resolves as a no-op.
pub struct StepToward;

impl BehaviorNode<AiContext> for StepToward {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        match Direction::toward(ctx.position, ctx.target_position, ctx.rolls.keep_x) {
            Some(direction) => {
                ctx.set_action(Action::Move {
                    actor: ctx.actor,
                    to: ctx.position.step(direction),
                });
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

pub struct Defend;

impl BehaviorNode<AiContext> for Defend {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        ctx.set_action(Action::Defend { actor: ctx.actor });
        Status::Success
    }
}

pub struct Wait;

impl BehaviorNode<AiContext> for Wait {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        ctx.set_action(Action::Wait { actor: ctx.actor });
        Status::Success
    }
}
