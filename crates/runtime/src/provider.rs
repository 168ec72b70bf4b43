//! Asynchronous abstraction for sourcing player intent during encounters.
//!
//! Runtime users plug in [`ActionProvider`] implementations so an encounter
//! can run with human input, scripted fixtures, or an automatic policy.
//! Enemy actions never go through a provider; the combat session decides
//! them itself.
use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use game_core::{Action, CombatSession, Combatant, EntityId, ItemKind, Progress};

use crate::error::Result;

/// Read-only view handed to a provider on the player's turn.
#[derive(Clone, Copy)]
pub struct PlayerView<'a> {
    pub session: &'a CombatSession,
    pub progress: &'a Progress,
}

impl PlayerView<'_> {
    pub fn enemies(&self) -> impl Iterator<Item = &Combatant> {
        self.session.enemies()
    }

    pub fn health_fraction(&self) -> f32 {
        self.progress.stats.borrow().health_fraction()
    }
}

/// Trait for providing the player's action on each player turn.
///
/// Actions that leave the turn open (defend, wait) or that the session
/// rejects end the turn anyway, so a provider cannot stall an encounter.
/// Game state is single-threaded, hence `?Send`.
#[async_trait(?Send)]
pub trait ActionProvider {
    async fn provide_action(&self, view: PlayerView<'_>) -> Result<Action>;
}

/// A simple action provider that always returns Wait action.
/// Useful for testing or as a fallback.
pub struct WaitActionProvider;

#[async_trait(?Send)]
impl ActionProvider for WaitActionProvider {
    async fn provide_action(&self, _view: PlayerView<'_>) -> Result<Action> {
        Ok(Action::Wait {
            actor: EntityId::PLAYER,
        })
    }
}

/// Heals when low and a heal item is available, otherwise attacks the
/// weakest enemy (lowest health, then lowest id).
#[derive(Clone, Copy, Debug)]
pub struct AutoPilot {
    pub heal_below: f32,
}

impl Default for AutoPilot {
    fn default() -> Self {
        Self { heal_below: 0.35 }
    }
}

impl AutoPilot {
    pub fn choose(&self, view: PlayerView<'_>) -> Action {
        let actor = EntityId::PLAYER;
        if view.health_fraction() < self.heal_below
            && view.progress.inventory.count(ItemKind::Heal) > 0
        {
            return Action::UseItem {
                actor,
                item: ItemKind::Heal,
            };
        }

        view.enemies()
            .filter(|enemy| enemy.is_alive())
            .min_by_key(|enemy| (enemy.snapshot().current_health, enemy.id))
            .map(|target| Action::Attack {
                actor,
                target: target.id,
            })
            .unwrap_or(Action::Wait { actor })
    }
}

#[async_trait(?Send)]
impl ActionProvider for AutoPilot {
    async fn provide_action(&self, view: PlayerView<'_>) -> Result<Action> {
        Ok(self.choose(view))
    }
}

/// Replays a fixed list of actions, then waits.
#[derive(Default)]
pub struct ScriptedActionProvider {
    actions: RefCell<VecDeque<Action>>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: RefCell::new(actions.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.actions.borrow().len()
    }
}

#[async_trait(?Send)]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(&self, _view: PlayerView<'_>) -> Result<Action> {
        Ok(self
            .actions
            .borrow_mut()
            .pop_front()
            .unwrap_or(Action::Wait {
                actor: EntityId::PLAYER,
            }))
    }
}
