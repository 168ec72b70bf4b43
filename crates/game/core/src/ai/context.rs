use rand::{Rng, RngCore};

use crate::combat::{Action, Combatant};
use crate::state::{EntityId, Position};

use super::AiProfile;

/// Randomness a decision may consume, drawn before the tree runs so the
/// tree itself is a pure function of the blackboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DecisionRolls {
    /// Axis kept when a step toward the target could go either way.
    pub keep_x: bool,
    /// Option index in `0..4` for the random behavior.
    pub choice: u8,
}

impl DecisionRolls {
    pub const CHOICES: u8 = 4;

    /// Draws both rolls, so every decision consumes the same amount of the
    /// stream regardless of which branch runs.
    pub fn draw(rng: &mut dyn RngCore) -> Self {
        Self {
            keep_x: rng.gen_bool(0.5),
            choice: rng.gen_range(0..Self::CHOICES),
        }
    }
}

/// Blackboard for one enemy decision.
#[derive(Clone, Debug, PartialEq)]
pub struct AiContext {
    pub actor: EntityId,
    pub position: Position,
    pub target: EntityId,
    pub target_position: Position,
    pub health_fraction: f32,
    pub profile: AiProfile,
    pub rolls: DecisionRolls,
    action: Option<Action>,
}

impl AiContext {
    pub fn new(
        actor: &Combatant,
        target: &Combatant,
        profile: AiProfile,
        rolls: DecisionRolls,
    ) -> Self {
        Self {
            actor: actor.id,
            position: actor.position,
            target: target.id,
            target_position: target.position,
            health_fraction: actor.snapshot().health_fraction(),
            profile,
            rolls,
            action: None,
        }
    }

    /// Manhattan distance to the target.
    pub fn distance(&self) -> u32 {
        self.position.manhattan(self.target_position)
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = Some(action);
    }

    pub fn take_action(&mut self) -> Option<Action> {
        self.action.take()
    }
}
