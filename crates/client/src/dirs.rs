//! Platform-specific directories.

use std::path::PathBuf;

/// Log directory under the platform cache dir:
/// - macOS: `~/Library/Caches/dungeon/logs`
/// - Linux: `~/.cache/dungeon/logs`
/// - Windows: `%LOCALAPPDATA%\dungeon\cache\logs`
/// - Fallback: `/tmp/dungeon/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon"))
        .join("logs")
}
