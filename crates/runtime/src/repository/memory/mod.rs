//! In-memory repository implementations for testing and development.
//!
//! Thread-safe but not persistent across process restarts.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use game_core::{HighScore, LevelExport};

use crate::repository::error::Result;
use crate::repository::{MapRepository, RepositoryError, SaveRepository, ScoreRepository};
use crate::save::SaveRecord;

#[derive(Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<BTreeMap<String, SaveRecord>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        slots.insert(slot.to_string(), record.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveRecord>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(slots.get(slot).cloned())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(slots.keys().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryMapRepository {
    levels: RwLock<HashMap<u64, LevelExport>>,
}

impl InMemoryMapRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapRepository for InMemoryMapRepository {
    fn save(&self, seed: u64, level: &LevelExport) -> Result<()> {
        let mut levels = self
            .levels
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        levels.insert(seed, level.clone());
        Ok(())
    }

    fn load(&self, seed: u64) -> Result<Option<LevelExport>> {
        let levels = self
            .levels
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(levels.get(&seed).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryScoreRepository {
    scores: RwLock<Option<Vec<HighScore>>>,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreRepository for InMemoryScoreRepository {
    fn save(&self, scores: &[HighScore]) -> Result<()> {
        let mut stored = self
            .scores
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        *stored = Some(scores.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<HighScore>>> {
        let stored = self
            .scores
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(stored.clone())
    }
}
