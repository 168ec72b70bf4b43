//! File-based ScoreRepository implementation.

use std::path::{Path, PathBuf};

use game_core::HighScore;

use crate::repository::ScoreRepository;
use crate::repository::error::Result;

use super::{read_json, write_json};

/// The whole table in a single JSON file.
pub struct FileScoreRepository {
    path: PathBuf,
}

impl FileScoreRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreRepository for FileScoreRepository {
    fn save(&self, scores: &[HighScore]) -> Result<()> {
        write_json(&self.path, scores)
    }

    fn load(&self) -> Result<Option<Vec<HighScore>>> {
        read_json(&self.path)
    }
}
