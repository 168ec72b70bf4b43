//! Repository layer for data that outlives a run
//!
//! Repositories handle data that CHANGES during play:
//! - Save slots (for save/load)
//! - Exported levels (for restoring a map without regeneration)
//! - High scores
//!
//! Static game content (config, enemy templates) comes from `game-content`,
//! not from repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::{FileMapRepository, FileSaveRepository, FileScoreRepository};
pub use memory::{InMemoryMapRepository, InMemorySaveRepository, InMemoryScoreRepository};
pub use traits::{MapRepository, SaveRepository, ScoreRepository};
