//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::SaveRepository;
use crate::repository::error::Result;
use crate::save::SaveRecord;

use super::{read_json, write_json};

/// One `save_<slot>.json` file per slot.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("save_{}.json", slot))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        let path = self.slot_path(slot);
        write_json(&path, record)?;
        tracing::info!("Saved game to {}", path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveRecord>> {
        read_json(&self.slot_path(slot))
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::info!("Deleted save: {}", path.display());
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename
                    .strip_prefix("save_")
                    .and_then(|s| s.strip_suffix(".json"))
            {
                slots.push(slot.to_string());
            }
        }

        slots.sort();
        Ok(slots)
    }
}
