//! Runtime orchestration for a dungeon run.
//!
//! This crate wires game content, the level generator, the combat session
//! and persistence into a playable [`Game`]. Consumers build one with
//! [`GameBuilder`], drive exploration synchronously, run encounters through
//! an [`ActionProvider`], and observe everything on the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`game`] hosts the session and the encounter driver
//! - [`builder`] assembles a game from content and repositories
//! - [`events`] provides a topic-based event bus
//! - [`provider`] abstracts where player actions come from
//! - [`repository`] and [`save`] persist runs, levels and scores
pub mod builder;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod provider;
pub mod repository;
pub mod save;

pub use builder::GameBuilder;
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, Event, EventBus, SessionEvent, Topic, WorldEvent};
pub use game::{EncounterReport, Game, GameStatus, MoveReport};
pub use provider::{ActionProvider, AutoPilot, PlayerView, ScriptedActionProvider, WaitActionProvider};
pub use repository::{
    FileMapRepository, FileSaveRepository, FileScoreRepository, InMemoryMapRepository,
    InMemorySaveRepository, InMemoryScoreRepository, MapRepository, RepositoryError,
    SaveRepository, ScoreRepository,
};
pub use save::{MapSave, PlayerSave, SaveRecord};
