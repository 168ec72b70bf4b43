//! Procedural level generation.
//!
//! [`DungeonGenerator`] turns a seed into a [`Level`]: rooms placed by
//! rejection sampling, joined in placement order by L-shaped corridors, and a
//! [`SpawnManifest`] listing every enemy, hostage, item and boss position.
mod generator;
mod grid;
mod level;
mod room;
mod spawn;

pub use generator::DungeonGenerator;
pub use grid::Grid;
pub use level::{Level, LevelExport};
pub use room::{Room, RoomKind};
pub use spawn::{
    BossSpawn, EnemyKind, EnemySpawn, ItemKind, ItemSpawn, SpawnManifest, WeightTable, Weighted,
};
