//! Integration tests for the snapshot store.

mod common;

use bracket_tournament_web::{
    complete_round, initialize, record_winner, JsonFileStore, MemoryStore, Side, SnapshotWriter,
    StateStore,
};
use common::{completed, numbered_players, play_round};
use std::path::PathBuf;
use std::sync::Arc;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("bracket-store-{}", uuid::Uuid::new_v4()))
}

#[test]
fn file_store_restores_a_tournament_mid_bracket() {
    let dir = temp_dir();
    let store = JsonFileStore::new(&dir);
    let mut t = initialize(numbered_players(8));
    play_round(&mut t, Side::One);
    play_round(&mut t, Side::One);
    store.save(&t).unwrap();

    let mut restored = store.load(t.id).unwrap().unwrap().tournament;
    assert_eq!(
        serde_json::to_value(&restored).unwrap(),
        serde_json::to_value(&t).unwrap()
    );
    assert!(restored.third_place_active);

    // The restored state keeps playing: third place, then the final.
    let id = restored.current_round.as_ref().unwrap().pairings[0].id;
    record_winner(&mut restored, id, Side::Two).unwrap();
    complete_round(&mut restored).unwrap();
    assert_eq!(restored.current_label().as_deref(), Some("Final"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn file_store_load_and_clear_when_absent() {
    let store = JsonFileStore::new(temp_dir());
    let id = uuid::Uuid::new_v4();
    assert!(store.load(id).unwrap().is_none());
    store.clear(id).unwrap();
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn file_store_clear_removes_the_snapshot() {
    let dir = temp_dir();
    let store = JsonFileStore::new(&dir);
    let a = initialize(numbered_players(4));
    let b = completed(2);
    store.save(&a).unwrap();
    store.save(&b).unwrap();
    assert_eq!(store.load_all().unwrap().len(), 2);

    store.clear(a.id).unwrap();
    assert!(store.load(a.id).unwrap().is_none());
    let rest = store.load_all().unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].tournament.id, b.id);
    assert!(rest[0].tournament.is_completed());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupted_snapshot_is_an_error_and_skipped_on_startup() {
    let dir = temp_dir();
    let store = JsonFileStore::new(&dir);
    let t = initialize(numbered_players(2));
    store.save(&t).unwrap();
    std::fs::write(dir.join(format!("{}.json", t.id)), "{ not json").unwrap();

    assert!(store.load(t.id).is_err());
    assert!(store.load_all().unwrap().is_empty());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn memory_store_overwrites_whole_snapshots() {
    let store = MemoryStore::new();
    let mut t = initialize(numbered_players(4));
    store.save(&t).unwrap();
    play_round(&mut t, Side::One);
    store.save(&t).unwrap();

    let loaded = store.load(t.id).unwrap().unwrap();
    assert_eq!(loaded.tournament.round_index, 2);
    assert_eq!(store.load_all().unwrap().len(), 1);
    store.clear(t.id).unwrap();
    assert!(store.load(t.id).unwrap().is_none());
}

#[tokio::test]
async fn writer_applies_queued_saves_in_order() {
    let store = Arc::new(MemoryStore::new());
    let (writer, handle) = SnapshotWriter::spawn(store.clone());
    let mut t = initialize(numbered_players(8));
    writer.save(&t);
    play_round(&mut t, Side::One);
    writer.save(&t);
    play_round(&mut t, Side::One);
    writer.save(&t);
    drop(writer);
    handle.await.unwrap();

    let loaded = store.load(t.id).unwrap().unwrap();
    assert_eq!(loaded.tournament.round_index, 3);
    assert!(loaded.tournament.third_place_active);
}

#[tokio::test]
async fn writer_clear_after_pending_save_removes_the_snapshot() {
    let dir = temp_dir();
    let store = Arc::new(JsonFileStore::new(&dir));
    let (writer, handle) = SnapshotWriter::spawn(store.clone());
    let deleted = initialize(numbered_players(4));
    let kept = initialize(numbered_players(2));
    writer.save(&deleted);
    writer.save(&kept);
    writer.clear(deleted.id);
    drop(writer);
    handle.await.unwrap();

    assert!(store.load(deleted.id).unwrap().is_none());
    let rest = store.load_all().unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].tournament.id, kept.id);

    std::fs::remove_dir_all(&dir).unwrap();
}
