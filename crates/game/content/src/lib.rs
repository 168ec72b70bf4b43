//! Data-driven content definitions and loaders.
//!
//! This crate houses the tunable data of a dungeon run and the loaders that
//! read it from disk:
//! - Game configuration (TOML): generator, combat rules, progression
//! - Enemy catalog (RON): per-kind stats, AI profile and reward
//!
//! Default data files are bundled into the crate so a host can run without
//! a content directory.

mod content;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use content::GameContent;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EnemyLoader, LoadResult};
