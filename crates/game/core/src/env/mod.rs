//! Read-only data the rules consult but never own.
//!
//! [`Terrain`] answers walkability for movement; [`Obstructed`] layers
//! occupied cells over it. [`EnemyCatalog`] holds the
//! static enemy templates that seed combatant stats, AI profiles and kill
//! rewards. Hosts may load the catalog from data files; the defaults mirror
//! the shipped content.
mod map;
mod npc;

pub use map::{Obstructed, OpenFloor, Terrain};
pub use npc::{EnemyCatalog, EnemyTemplate, Reward};
