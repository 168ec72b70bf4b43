//! Runtime configuration sourced from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Knobs the host may tune without touching game content.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Root of the save, map-cache and score files.
    pub save_dir: PathBuf,
    /// Directory holding `config.toml` / `enemies.ron`; bundled content
    /// when `None`.
    pub content_dir: Option<PathBuf>,
    /// Pause between two enemy actions during an encounter.
    pub pacing: Duration,
    /// Player turns after which a stalled encounter is aborted.
    pub max_rounds: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            content_dir: None,
            pacing: Duration::ZERO,
            max_rounds: 500,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SAVE_DATA_DIR` - Save directory (default: platform data dir)
    /// - `DUNGEON_CONTENT_DIR` - Content directory (default: bundled content)
    /// - `DUNGEON_PACING_MS` - Delay between enemy actions (default: 0)
    /// - `DUNGEON_MAX_ROUNDS` - Encounter round cap (default: 500)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("SAVE_DATA_DIR") {
            config.save_dir = dir;
        }
        if let Some(dir) = read_env::<PathBuf>("DUNGEON_CONTENT_DIR") {
            config.content_dir = Some(dir);
        }
        if let Some(ms) = read_env::<u64>("DUNGEON_PACING_MS") {
            config.pacing = Duration::from_millis(ms);
        }
        if let Some(rounds) = read_env::<u32>("DUNGEON_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }

        config
    }

    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Platform data directory for saves.
///
/// - macOS: `~/Library/Application Support/dungeon`
/// - Linux: `~/.local/share/dungeon` (or `$XDG_DATA_HOME/dungeon`)
/// - Windows: `%APPDATA%\dungeon`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
