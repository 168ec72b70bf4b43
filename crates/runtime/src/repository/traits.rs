//! Repository contracts for data that outlives a run.
//!
//! Every `load` returns `Ok(None)` for a record that was never written and
//! [`RepositoryError::Corrupted`](super::RepositoryError::Corrupted) for one
//! that cannot be decoded.

use game_core::{HighScore, LevelExport};

use super::error::Result;
use crate::save::SaveRecord;

/// Named save slots.
pub trait SaveRepository: Send + Sync {
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()>;

    fn load(&self, slot: &str) -> Result<Option<SaveRecord>>;

    fn delete(&self, slot: &str) -> Result<()>;

    /// Slot names, sorted.
    fn list_slots(&self) -> Result<Vec<String>>;
}

/// Exported levels keyed by seed, so a level can be restored without
/// re-running the generator.
pub trait MapRepository: Send + Sync {
    fn save(&self, seed: u64, level: &LevelExport) -> Result<()>;

    fn load(&self, seed: u64) -> Result<Option<LevelExport>>;
}

/// The persisted high-score table.
pub trait ScoreRepository: Send + Sync {
    fn save(&self, scores: &[HighScore]) -> Result<()>;

    fn load(&self) -> Result<Option<Vec<HighScore>>>;
}
