mod common;

use std::fs;
use std::sync::Arc;

use game_content::GameContent;
use game_core::{Direction, HighScore, ItemKind, Level};
use runtime::{
    Event, GameBuilder, InMemorySaveRepository, InMemoryScoreRepository, RepositoryError,
    RuntimeError, SaveRepository, ScoreRepository, SessionEvent, Topic,
};

use common::{champion, content, game, walk_to};

fn wander(game: &mut runtime::Game, steps: usize) {
    for _ in 0..steps {
        let Some(position) = game.player_position() else {
            return;
        };
        let grid = game.level().unwrap().grid();
        let Some(direction) = Direction::ALL
            .into_iter()
            .find(|d| grid.is_walkable(position.step(*d)))
        else {
            return;
        };
        let report = game.move_player(direction).expect("exploring");
        if report.encounter.is_some() {
            return;
        }
    }
}

#[tokio::test]
async fn save_then_load_restores_the_run_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let mut content = content(champion());
    content.config.generator.items = Some(game_core::SpawnRule::new(1.0, 1, 1));
    content.config.generator.enemies = None;

    let mut first = GameBuilder::new()
        .content(content.clone())
        .file_repositories(dir.path())
        .unwrap()
        .build()
        .unwrap();
    first.new_game(21).unwrap();
    let item = first.spawns().unwrap().items[0].position;
    walk_to(&mut first, item).expect("walked to item");
    first.progress().unwrap().stats.borrow_mut().take_damage(40);
    first.save("slot1").unwrap();

    let mut second = GameBuilder::new()
        .content(content)
        .file_repositories(dir.path())
        .unwrap()
        .build()
        .unwrap();
    let mut session = second.events().subscribe(Topic::Session);
    second.load("slot1").unwrap();

    let (a, b) = (first.progress().unwrap(), second.progress().unwrap());
    assert_eq!(a.stats.snapshot(), b.stats.snapshot());
    assert_eq!(a.experience, b.experience);
    assert_eq!(a.inventory, b.inventory);
    assert_eq!(a.hostages, b.hostages);
    assert_eq!(a.score, b.score);
    assert_eq!(first.player_position(), second.player_position());
    assert_eq!(first.spawns(), second.spawns());
    assert_eq!(
        first.level().unwrap().rooms(),
        second.level().unwrap().rooms()
    );
    assert!(matches!(
        session.try_recv(),
        Ok(Event::Session(SessionEvent::Loaded {
            restored_map: true,
            ..
        }))
    ));
}

#[test]
fn load_without_full_map_regenerates_from_seed() {
    let saves = Arc::new(InMemorySaveRepository::new());
    let content = content(champion());
    let mut game = GameBuilder::new()
        .content(content.clone())
        .save_repository(saves.clone())
        .build()
        .unwrap();
    game.new_game(99).unwrap();
    game.save("quick").unwrap();

    let mut record = saves.load("quick").unwrap().unwrap();
    record.map.full_map = None;
    saves.save("quick", &record).unwrap();

    let mut fresh = GameBuilder::new()
        .content(content.clone())
        .save_repository(saves)
        .build()
        .unwrap();
    let mut session = fresh.events().subscribe(Topic::Session);
    fresh.load("quick").unwrap();

    let expected = runtime::GameBuilder::new()
        .content(content)
        .build()
        .map(|mut g| {
            g.new_game(99).unwrap();
            g.level().unwrap().rooms().to_vec()
        })
        .unwrap();
    assert_eq!(fresh.level().unwrap().rooms(), expected.as_slice());
    assert_eq!(
        hex::encode(fresh.level().unwrap().fingerprint()),
        record.map.fingerprint
    );
    assert!(matches!(
        session.try_recv(),
        Ok(Event::Session(SessionEvent::Loaded {
            restored_map: false,
            ..
        }))
    ));
}

#[test]
fn saved_map_round_trips_through_json() {
    let saves = Arc::new(InMemorySaveRepository::new());
    let mut game = GameBuilder::new()
        .content(content(champion()))
        .save_repository(saves.clone())
        .build()
        .unwrap();
    game.new_game(4).unwrap();
    game.save("a").unwrap();

    let record = saves.load("a").unwrap().unwrap();
    let json = serde_json::to_string(&record).unwrap();
    let decoded: runtime::SaveRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, record);

    let level = Level::import(decoded.map.full_map.unwrap()).unwrap();
    assert_eq!(level.rooms(), game.level().unwrap().rooms());
}

#[test]
fn corrupted_save_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = GameBuilder::new()
        .content(GameContent::default())
        .file_repositories(dir.path())
        .unwrap()
        .build()
        .unwrap();

    fs::write(dir.path().join("saves").join("save_bad.json"), "{ not json").unwrap();

    assert!(matches!(
        game.load("bad"),
        Err(RuntimeError::Repository(RepositoryError::Corrupted { .. }))
    ));
    assert!(matches!(
        game.load("missing"),
        Err(RuntimeError::SaveNotFound(slot)) if slot == "missing"
    ));
    assert!(game.status().is_none());
}

#[test]
fn saving_requires_a_game_outside_combat() {
    let mut game = game(content(champion()));
    assert!(matches!(game.save("x"), Err(RuntimeError::NoActiveGame)));

    game.new_game(7).unwrap();
    let target = game.spawns().unwrap().enemies[0].position;
    walk_to(&mut game, target)
        .and_then(|report| report.encounter)
        .expect("encounter starts");
    assert!(matches!(
        game.save("x"),
        Err(RuntimeError::InvalidState { .. })
    ));
}

#[test]
fn high_scores_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let build = || {
        GameBuilder::new()
            .content(content(champion()))
            .file_repositories(dir.path())
            .unwrap()
            .build()
            .unwrap()
    };

    let mut game = build();
    game.new_game(1).unwrap();
    assert_eq!(game.record_score("ada").unwrap(), Some(0));
    wander(&mut game, 3);

    let reloaded = build();
    let scores = reloaded.high_scores();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].name, "ada");
    assert_eq!(scores[0].seed, 1);
}

#[test]
fn corrupted_score_table_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scores.json"), "[{]").unwrap();

    let game = GameBuilder::new()
        .content(GameContent::default())
        .file_repositories(dir.path())
        .unwrap()
        .build()
        .unwrap();
    assert!(game.high_scores().is_empty());
}

#[test]
fn treasure_pickup_is_saved_in_score() {
    let mut content = content(champion());
    content.config.generator.enemies = None;
    content.config.generator.items = Some(game_core::SpawnRule::new(1.0, 1, 1));
    content.config.generator.item_weights = game_core::WeightTable::new([(ItemKind::Treasure, 1)]);
    let saves = Arc::new(InMemorySaveRepository::new());
    let mut game = GameBuilder::new()
        .content(content)
        .save_repository(saves.clone())
        .build()
        .unwrap();
    game.new_game(13).unwrap();

    let item = game.spawns().unwrap().items[0].position;
    let report = walk_to(&mut game, item).expect("walked");
    assert!(report.pickups.iter().any(|(kind, _)| *kind == ItemKind::Treasure));
    game.save("t").unwrap();

    let treasure = game.content().config.progression.treasure_score;
    assert!(saves.load("t").unwrap().unwrap().score >= treasure);
}

#[test]
fn truncated_save_is_reported_without_losing_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut game = GameBuilder::new()
        .content(content(champion()))
        .file_repositories(dir.path())
        .unwrap()
        .build()
        .unwrap();
    game.new_game(5).unwrap();
    game.save("whole").unwrap();
    let position = game.player_position();

    let saves = dir.path().join("saves");
    let whole = fs::read_to_string(saves.join("save_whole.json")).unwrap();
    fs::write(saves.join("save_cut.json"), &whole[..whole.len() / 2]).unwrap();

    assert!(matches!(
        game.load("cut"),
        Err(RuntimeError::Repository(RepositoryError::Corrupted { .. }))
    ));
    assert_eq!(game.status(), Some(runtime::GameStatus::Exploring));
    assert_eq!(game.player_position(), position);
}

#[test]
fn oversized_saved_map_falls_back_to_the_seed() {
    let dir = tempfile::tempdir().unwrap();
    let build = || {
        GameBuilder::new()
            .content(content(champion()))
            .file_repositories(dir.path())
            .unwrap()
            .build()
            .unwrap()
    };

    let mut game = build();
    game.new_game(8).unwrap();
    game.save("big").unwrap();
    let rooms = game.level().unwrap().rooms().to_vec();

    let path = dir.path().join("saves").join("save_big.json");
    let mut record: runtime::SaveRecord =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let mut export = record.map.full_map.take().unwrap();
    export.width = 4_000_000;
    export.height = 4_000_000;
    record.map.full_map = Some(export.clone());
    fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();
    fs::write(
        dir.path().join("maps").join("level_8.json"),
        serde_json::to_string(&export).unwrap(),
    )
    .unwrap();

    let mut fresh = build();
    let mut session = fresh.events().subscribe(Topic::Session);
    fresh.load("big").unwrap();

    assert_eq!(fresh.level().unwrap().rooms(), rooms.as_slice());
    assert_eq!(
        hex::encode(fresh.level().unwrap().fingerprint()),
        record.map.fingerprint
    );
    assert!(matches!(
        session.try_recv(),
        Ok(Event::Session(SessionEvent::Loaded {
            restored_map: false,
            ..
        }))
    ));
}

#[test]
fn scores_below_a_full_table_are_not_recorded() {
    let content = content(champion());
    let scores = Arc::new(InMemoryScoreRepository::new());
    let table: Vec<HighScore> = (0..content.config.progression.ledger_capacity)
        .map(|i| HighScore {
            name: format!("veteran{i}"),
            score: 100,
            date: "2026-01-01".to_string(),
            seed: i as u64,
        })
        .collect();
    scores.save(&table).unwrap();

    let mut game = GameBuilder::new()
        .content(content)
        .score_repository(scores.clone())
        .build()
        .unwrap();
    let mut session = game.events().subscribe(Topic::Session);
    game.new_game(1).unwrap();

    assert_eq!(game.record_score("late").unwrap(), None);
    assert_eq!(game.high_scores(), table.as_slice());
    assert_eq!(scores.load().unwrap().unwrap(), table);
    let mut recorded = None;
    while let Ok(event) = session.try_recv() {
        if let Event::Session(SessionEvent::ScoreRecorded { score, rank }) = event {
            recorded = Some((score, rank));
        }
    }
    assert_eq!(recorded, Some((0, None)));
}
