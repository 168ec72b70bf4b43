//! Content factory for loading a whole content directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::GameContent;
use crate::loaders::{ConfigLoader, EnemyLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── enemies.ron
/// ```
///
/// Either file may be absent, in which case the bundled copy is used.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ENEMIES_FILE: &'static str = "enemies.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Content compiled into the crate.
    pub fn bundled() -> LoadResult<GameContent> {
        Ok(GameContent::new(
            ConfigLoader::bundled()?,
            EnemyLoader::bundled()?,
        ))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<game_core::GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using bundled config");
            return ConfigLoader::bundled();
        }
        ConfigLoader::load(&path)
    }

    /// Load the enemy catalog from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<game_core::EnemyCatalog> {
        let path = self.data_dir.join(Self::ENEMIES_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no enemy catalog, using bundled catalog");
            return EnemyLoader::bundled();
        }
        EnemyLoader::load(&path)
    }

    pub fn load(&self) -> LoadResult<GameContent> {
        let content = GameContent::new(self.load_config()?, self.load_enemies()?);
        info!(
            dir = %self.data_dir.display(),
            enemies = content.enemies.templates().len(),
            "loaded content"
        );
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
