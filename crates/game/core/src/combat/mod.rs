//! Turn-based combat.
//!
//! [`CombatSession`] owns the roster and the turn order; the resolver in
//! [`resolver`] applies one [`Action`] at a time. Everything the session
//! needs from outside (walkability, rules, randomness, progression
//! callbacks) arrives through a [`CombatEnv`] borrowed per call.

mod action;
mod combatant;
pub mod encounter;
mod hooks;
pub mod resolver;
mod session;

pub use action::Action;
pub use combatant::{Combatant, Role};
pub use hooks::{CombatHooks, NoHooks};
pub use resolver::{ActionOutcome, ActionReport, AttackReport, ItemEffect, MoveBlock};
pub use session::{CombatOutcome, CombatPhase, CombatSession};

use rand::RngCore;

use crate::config::CombatRules;
use crate::env::Terrain;

/// Collaborators borrowed by the session for a single call.
pub struct CombatEnv<'a> {
    pub terrain: &'a dyn Terrain,
    pub rules: &'a CombatRules,
    pub rng: &'a mut dyn RngCore,
    pub hooks: &'a mut dyn CombatHooks,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        terrain: &'a dyn Terrain,
        rules: &'a CombatRules,
        rng: &'a mut dyn RngCore,
        hooks: &'a mut dyn CombatHooks,
    ) -> Self {
        Self {
            terrain,
            rules,
            rng,
            hooks,
        }
    }
}
