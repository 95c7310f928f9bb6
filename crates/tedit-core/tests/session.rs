//! Integration tests for the session lifecycle.

mod common;

use std::fs::{self, File};
use std::time::{Duration, SystemTime};

use common::{GateCodec, editor_with, next_completion, settle, small_spec, write_world};
use tedit_core::{OperationKind, PointerEvent, SessionError};
use tedit_world::{BinaryWorldCodec, TilePoint, WorldCodec, tile_ids, wall_ids};
use tempfile::tempdir;

#[tokio::test]
async fn test_open_world_postconditions() {
    let dir = tempdir().unwrap();
    let path = write_world(dir.path(), "fixture.wld");
    let mut editor = editor_with(GateCodec::opened(), dir.path());

    editor.open_world(&path).unwrap();
    assert!(editor.session().is_busy());

    let completion = next_completion(&mut editor).await;
    assert!(completion.is_ok());
    assert_eq!(completion.operation, OperationKind::Loading);

    let session = editor.session();
    assert!(!session.is_busy());
    assert!(!session.is_dirty());
    assert_eq!(session.current_file(), Some(path.as_path()));
    assert_eq!(session.world().map(|w| w.title.as_str()), Some("Fixture"));
    assert_eq!(session.points(), ["Spawn", "Dungeon", "Guide", "Nurse"]);
    assert!(session.selected_point().is_none());
    assert!(session.minimap().is_some());
    assert!(
        session
            .progress()
            .latest()
            .message
            .starts_with("World loaded in")
    );
    assert_eq!(
        session.window_title(),
        format!("TEdit v{} fixture.wld", tedit_core::session::VERSION)
    );
}

#[tokio::test]
async fn test_requests_while_busy_are_dropped() {
    let dir = tempdir().unwrap();
    let path = write_world(dir.path(), "fixture.wld");
    let codec = GateCodec::closed();
    let mut editor = editor_with(codec.clone(), dir.path());

    editor.open_world(&path).unwrap();

    let new = editor.new_world(small_spec()).unwrap_err();
    assert!(matches!(
        new,
        SessionError::OperationInProgress {
            running: OperationKind::Loading
        }
    ));
    assert!(editor.open_world(&path).is_err());
    assert!(matches!(
        editor.save_world(Some(dir.path().join("other.wld")), true),
        Err(SessionError::OperationInProgress { .. })
    ));

    // nothing was queued behind the load
    assert!(editor.session().current_file().is_none());
    assert!(editor.session().world().is_none());

    codec.open();
    let completion = next_completion(&mut editor).await;
    assert!(completion.is_ok());
    assert_eq!(codec.loads.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert_eq!(codec.save_count(), 0);
    assert!(!dir.path().join("other.wld").exists());
}

#[tokio::test]
async fn test_open_failure_leaves_no_world() {
    let dir = tempdir().unwrap();
    let good = write_world(dir.path(), "good.wld");
    let mut editor = editor_with(GateCodec::opened(), dir.path());

    editor.open_world(&good).unwrap();
    next_completion(&mut editor).await;

    // leave unsaved edits behind so the failure has something to discard
    editor.set_active_tool_by_name("Pencil");
    assert!(editor.mouse_down(PointerEvent::left_at(1, 1)));
    assert!(editor.session().is_dirty());

    editor.open_world(dir.path().join("missing.wld")).unwrap();
    let completion = next_completion(&mut editor).await;

    assert!(matches!(completion.result, Err(SessionError::Codec(_))));
    let session = editor.session();
    assert!(!session.is_busy());
    assert!(session.world().is_none());
    assert!(session.points().is_empty());
    assert!(session.current_file().is_none());
    assert!(!session.is_dirty());
    assert_eq!(
        session.window_title(),
        format!("TEdit v{}", tedit_core::session::VERSION)
    );
    assert!(matches!(
        editor.save_world(None, false),
        Err(SessionError::NoWorld)
    ));
}

#[tokio::test]
async fn test_open_failure_on_fresh_session() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());

    editor.open_world(dir.path().join("missing.wld")).unwrap();
    let completion = next_completion(&mut editor).await;

    assert!(matches!(completion.result, Err(SessionError::Codec(_))));
    assert_eq!(completion.operation, OperationKind::Loading);
    let session = editor.session();
    assert!(!session.is_busy());
    assert!(session.world().is_none());
    assert!(session.current_file().is_none());
    assert!(!session.is_dirty());
    assert_eq!(
        session.window_title(),
        format!("TEdit v{}", tedit_core::session::VERSION)
    );

    // the session accepts new work straight away
    editor.new_world(small_spec()).unwrap();
    assert!(next_completion(&mut editor).await.is_ok());
}

#[tokio::test]
async fn test_open_clears_previous_file_while_loading() {
    let dir = tempdir().unwrap();
    let first = write_world(dir.path(), "first.wld");
    let second = write_world(dir.path(), "second.wld");
    let codec = GateCodec::opened();
    let mut editor = editor_with(codec.clone(), dir.path());
    editor.open_world(&first).unwrap();
    next_completion(&mut editor).await;

    codec.close();
    editor.open_world(&second).unwrap();
    assert!(editor.session().current_file().is_none());
    assert!(!editor.session().is_dirty());

    codec.open();
    assert!(next_completion(&mut editor).await.is_ok());
    assert_eq!(editor.session().current_file(), Some(second.as_path()));
}

#[tokio::test]
async fn test_new_world_is_banded() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());

    editor.new_world(small_spec()).unwrap();
    let completion = next_completion(&mut editor).await;
    assert!(completion.is_ok());
    assert_eq!(completion.operation, OperationKind::Generating);

    let world = editor.session().world().unwrap();
    let row = |y: u32| world.tiles.row(y).to_vec();
    for y in 0..4 {
        assert!(row(y).iter().all(|t| t.is_empty()), "row {y} should be empty");
    }
    assert!(row(4).iter().all(|t| t.tile_type == tile_ids::GRASS && t.is_active));
    assert!(row(5).iter().all(|t| t.tile_type == tile_ids::DIRT && t.wall == wall_ids::DIRT));
    assert!(row(6).iter().all(|t| t.tile_type == tile_ids::DIRT && t.wall == wall_ids::NONE));
    assert!(row(8).iter().all(|t| t.tile_type == tile_ids::STONE));
    assert!(row(9).iter().all(|t| t.is_empty()));
    assert_eq!(world.spawn, TilePoint::new(5, 4));

    assert!(editor.session().current_file().is_none());
    assert_eq!(editor.session().points(), ["Spawn", "Dungeon"]);
}

#[tokio::test]
async fn test_invalid_world_spec_is_rejected_synchronously() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());

    let mut spec = small_spec();
    spec.width = 0;
    assert!(matches!(
        editor.new_world(spec),
        Err(SessionError::InvalidWorldSpec(_))
    ));
    assert!(!editor.session().is_busy());
}

#[tokio::test]
async fn test_save_without_world_or_destination() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());

    assert!(matches!(
        editor.save_world(None, false),
        Err(SessionError::NoWorld)
    ));

    editor.new_world(small_spec()).unwrap();
    next_completion(&mut editor).await;

    assert!(matches!(
        editor.save_world(None, false),
        Err(SessionError::NoDestination)
    ));
    assert!(!editor.session().is_busy());
}

#[tokio::test]
async fn test_save_as_records_file_and_clears_dirty() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());
    editor.new_world(small_spec()).unwrap();
    next_completion(&mut editor).await;

    editor.set_active_tool_by_name("Pencil");
    assert!(editor.mouse_down(PointerEvent::left_at(1, 1)));
    assert!(editor.session().is_dirty());
    assert!(editor.window_title().ends_with(" *"));

    let path = dir.path().join("saved.wld");
    editor.save_world(Some(path.clone()), false).unwrap();
    let completion = next_completion(&mut editor).await;
    assert!(completion.is_ok());

    let session = editor.session();
    assert!(!session.is_dirty());
    assert_eq!(session.current_file(), Some(path.as_path()));

    let on_disk = BinaryWorldCodec.load(&path, &|_| {}).unwrap();
    assert!(on_disk.tile(TilePoint::new(1, 1)).unwrap().is_active);
    let modified = fs::metadata(&path).unwrap().modified().unwrap();
    assert_eq!(
        session.world().unwrap().last_saved_at(),
        Some(modified.into())
    );
}

#[tokio::test]
async fn test_stale_file_conflict_until_overwrite() {
    let dir = tempdir().unwrap();
    let path = write_world(dir.path(), "shared.wld");
    let mut editor = editor_with(GateCodec::opened(), dir.path());
    editor.open_world(&path).unwrap();
    next_completion(&mut editor).await;

    // another program touches the file after we loaded it
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();
    let before = fs::read(&path).unwrap();

    let err = editor.save_world(None, false).unwrap_err();
    assert!(matches!(err, SessionError::StaleFileConflict { .. }));
    assert!(!editor.session().is_busy());
    assert_eq!(fs::read(&path).unwrap(), before);

    editor.save_world(None, true).unwrap();
    assert!(next_completion(&mut editor).await.is_ok());

    // the next save compares against the file we just wrote
    editor.save_world(None, false).unwrap();
    assert!(next_completion(&mut editor).await.is_ok());
}

#[tokio::test]
async fn test_saving_never_saved_world_over_existing_file() {
    let dir = tempdir().unwrap();
    let existing = write_world(dir.path(), "existing.wld");
    let mut editor = editor_with(GateCodec::opened(), dir.path());
    editor.new_world(small_spec()).unwrap();
    next_completion(&mut editor).await;

    assert!(matches!(
        editor.save_world(Some(existing.clone()), false),
        Err(SessionError::StaleFileConflict {
            last_saved: None,
            ..
        })
    ));
    editor.save_world(Some(existing), true).unwrap();
    assert!(next_completion(&mut editor).await.is_ok());
}

#[tokio::test]
async fn test_edit_during_save_keeps_snapshot_and_dirty() {
    let dir = tempdir().unwrap();
    let codec = GateCodec::opened();
    let mut editor = editor_with(codec.clone(), dir.path());
    editor.new_world(small_spec()).unwrap();
    next_completion(&mut editor).await;
    editor.set_active_tool_by_name("Pencil");

    codec.close();
    let path = dir.path().join("snapshot.wld");
    editor.save_world(Some(path.clone()), false).unwrap();

    // edits go to a copy while the save holds the snapshot
    assert!(editor.mouse_down(PointerEvent::left_at(0, 0)));

    codec.open();
    assert!(next_completion(&mut editor).await.is_ok());
    assert!(editor.session().is_dirty());

    let on_disk = BinaryWorldCodec.load(&path, &|_| {}).unwrap();
    assert!(on_disk.tile(TilePoint::new(0, 0)).unwrap().is_empty());
    assert!(
        editor
            .session()
            .world()
            .unwrap()
            .tile(TilePoint::new(0, 0))
            .unwrap()
            .is_active
    );
    settle(&mut editor).await;
}
