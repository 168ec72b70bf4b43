//! File-based MapRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::LevelExport;

use crate::repository::MapRepository;
use crate::repository::error::Result;

use super::{read_json, write_json};

/// One `level_<seed>.json` file per seed.
pub struct FileMapRepository {
    base_dir: PathBuf,
}

impl FileMapRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn level_path(&self, seed: u64) -> PathBuf {
        self.base_dir.join(format!("level_{}.json", seed))
    }
}

impl MapRepository for FileMapRepository {
    fn save(&self, seed: u64, level: &LevelExport) -> Result<()> {
        let path = self.level_path(seed);
        write_json(&path, level)?;
        tracing::debug!("Saved level: {}", path.display());
        Ok(())
    }

    fn load(&self, seed: u64) -> Result<Option<LevelExport>> {
        read_json(&self.level_path(seed))
    }
}
