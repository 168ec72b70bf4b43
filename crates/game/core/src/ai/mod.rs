//! Enemy decision making.
//!
//! Each [`Behavior`] is a behavior tree over an [`AiContext`] blackboard.
//! All randomness a decision needs is drawn up front into
//! [`DecisionRolls`], so given the rolls a decision is a pure function of
//! the two combatants and the profile.
mod context;
pub mod nodes;
mod policy;
pub mod tree;

pub use context::{AiContext, DecisionRolls};
pub use policy::{AiPolicy, AiProfile, Behavior};
