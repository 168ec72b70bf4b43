use crate::env::Reward;
use crate::map::ItemKind;

use super::Combatant;

/// Callbacks through which an encounter reaches the host's progression
/// systems. Every method has a no-op default.
pub trait CombatHooks {
    /// Called once per enemy, right before it leaves the roster.
    fn on_enemy_killed(&mut self, _enemy: &Combatant, _reward: Reward) {}

    fn on_player_died(&mut self) {}

    fn on_player_won(&mut self, _boss_defeated: bool) {}

    /// Removes one `item` from the host's inventory. Returns `false` when
    /// none is available, which turns the use into a no-op.
    fn take_item(&mut self, _item: ItemKind) -> bool {
        false
    }
}

/// Hooks that ignore every notification and hold no items.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl CombatHooks for NoHooks {}
