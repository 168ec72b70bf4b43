//! File-based repository implementations.
//!
//! Records are pretty-printed JSON. Writes go to a sibling `*.tmp` file that
//! is then renamed over the target, so a crash never leaves a half-written
//! record behind.

mod map;
mod save;
mod score;

pub use map::FileMapRepository;
pub use save::FileSaveRepository;
pub use score::FileScoreRepository;

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::RepositoryError;
use crate::repository::error::Result;

pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("json.tmp");

    let json =
        serde_json::to_string_pretty(value).map_err(|e| RepositoryError::Json(e.to_string()))?;
    fs::write(&temp_path, json)?;

    // Atomic rename
    fs::rename(&temp_path, path)?;
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| RepositoryError::Corrupted {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
