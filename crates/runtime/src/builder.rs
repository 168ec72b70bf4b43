//! Assembles a [`Game`] from content, a generator and repositories.

use std::path::Path;
use std::sync::Arc;

use game_content::GameContent;
use game_core::DungeonGenerator;
use tracing::debug;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::EventBus;
use crate::game::Game;
use crate::repository::{
    FileMapRepository, FileSaveRepository, FileScoreRepository, InMemoryMapRepository,
    InMemorySaveRepository, InMemoryScoreRepository, MapRepository, SaveRepository,
    ScoreRepository,
};

/// Builder for [`Game`].
///
/// Content is required. The generator defaults to one built from the
/// content's generator configuration; repositories default to in-memory.
pub struct GameBuilder {
    config: RuntimeConfig,
    content: Option<GameContent>,
    generator: Option<DungeonGenerator>,
    saves: Option<Arc<dyn SaveRepository>>,
    maps: Option<Arc<dyn MapRepository>>,
    scores: Option<Arc<dyn ScoreRepository>>,
    events: Option<EventBus>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            generator: None,
            saves: None,
            maps: None,
            scores: None,
            events: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required game content
    pub fn content(mut self, content: GameContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Use a generator other than the one described by the content.
    pub fn generator(mut self, generator: DungeonGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn save_repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.saves = Some(repository);
        self
    }

    pub fn map_repository(mut self, repository: Arc<dyn MapRepository>) -> Self {
        self.maps = Some(repository);
        self
    }

    pub fn score_repository(mut self, repository: Arc<dyn ScoreRepository>) -> Self {
        self.scores = Some(repository);
        self
    }

    /// Share an existing event bus, e.g. one a frontend already listens on.
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// File repositories under `dir`:
    ///
    /// ```text
    /// dir/
    /// ├── saves/save_<slot>.json
    /// ├── maps/level_<seed>.json
    /// └── scores.json
    /// ```
    pub fn file_repositories(self, dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        debug!(dir = %dir.display(), "using file repositories");
        Ok(self
            .save_repository(Arc::new(FileSaveRepository::new(dir.join("saves"))?))
            .map_repository(Arc::new(FileMapRepository::new(dir.join("maps"))?))
            .score_repository(Arc::new(FileScoreRepository::new(
                dir.join("scores.json"),
            ))))
    }

    pub fn build(self) -> Result<Game> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        content.validate()?;

        let generator = self
            .generator
            .unwrap_or_else(|| DungeonGenerator::new(content.config.generator.clone()));
        generator.config().validate()?;

        Ok(Game::new(
            content,
            generator,
            self.config,
            self.saves
                .unwrap_or_else(|| Arc::new(InMemorySaveRepository::new())),
            self.maps
                .unwrap_or_else(|| Arc::new(InMemoryMapRepository::new())),
            self.scores
                .unwrap_or_else(|| Arc::new(InMemoryScoreRepository::new())),
            self.events.unwrap_or_default(),
        ))
    }
}
