use std::fs;

use game_content::{ContentFactory, GameContent};
use game_core::{EnemyKind, GameConfig};

#[test]
fn empty_directory_falls_back_to_bundled_content() {
    let dir = tempfile::tempdir().unwrap();
    let content = ContentFactory::new(dir.path()).load().unwrap();
    assert_eq!(content, GameContent::default());
}

#[test]
fn files_on_disk_override_bundled_content() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(ContentFactory::CONFIG_FILE),
        "[generator]\nroom_count = 3\nwidth = 30\nheight = 30\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(ContentFactory::ENEMIES_FILE),
        r#"[(kind: Boss, stats: (max_health: 9, current_health: 9, attack: 1, defense: 0, speed: 1, accuracy: 50))]"#,
    )
    .unwrap();

    let content = ContentFactory::new(dir.path()).load().unwrap();

    assert_eq!(content.config.generator.room_count, 3);
    assert_eq!(content.config.combat, GameConfig::default().combat);
    assert_eq!(content.enemies.templates().len(), 1);
    assert_eq!(content.enemies.resolve(EnemyKind::Boss).stats.max_health, 9);
}

#[test]
fn broken_config_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(ContentFactory::CONFIG_FILE);
    fs::write(&path, "[generator\nwidth = ").unwrap();

    let err = ContentFactory::new(dir.path()).load().unwrap_err();
    assert!(err.to_string().contains("config.toml"), "{err}");
}
