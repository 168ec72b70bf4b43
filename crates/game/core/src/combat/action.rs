use crate::map::ItemKind;
use crate::state::{EntityId, Position};

/// Everything a combatant can do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move { actor: EntityId, to: Position },
    Attack { actor: EntityId, target: EntityId },
    Defend { actor: EntityId },
    UseItem { actor: EntityId, item: ItemKind },
    Wait { actor: EntityId },
}

impl Action {
    pub fn actor(&self) -> EntityId {
        match *self {
            Action::Move { actor, .. }
            | Action::Attack { actor, .. }
            | Action::Defend { actor }
            | Action::UseItem { actor, .. }
            | Action::Wait { actor } => actor,
        }
    }

    /// Whether a player submitting this action hands the turn to the enemies.
    ///
    /// Defending and waiting keep the player turn open until it is ended
    /// explicitly.
    pub fn ends_player_turn(&self) -> bool {
        matches!(
            self,
            Action::Move { .. } | Action::Attack { .. } | Action::UseItem { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}
