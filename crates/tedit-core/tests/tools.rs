//! Integration tests for tool dispatch through the editor.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{GateCodec, editor_with, next_completion, small_spec};
use tedit_core::{Activation, Editor, Modifiers, NullRenderer, PaintMode, PointerEvent};
use tedit_world::{LiquidType, TilePoint};
use tempfile::tempdir;

fn count_previews(editor: &mut Editor<NullRenderer>) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&count);
    editor.tools_mut().subscribe_preview_changed(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    count
}

#[tokio::test]
async fn test_paste_guard_through_editor() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());
    editor.new_world(small_spec()).unwrap();
    next_completion(&mut editor).await;

    assert_eq!(
        editor.set_active_tool_by_name("Arrow"),
        Some(Activation::Activated)
    );
    let previews = count_previews(&mut editor);

    assert_eq!(
        editor.set_active_tool_by_name("Paste"),
        Some(Activation::RefusedEmptyClipboard)
    );
    assert_eq!(editor.tools().active_tool_name(), Some("Arrow"));
    assert_eq!(previews.load(Ordering::SeqCst), 0);

    let world = editor.session().world().unwrap().clone();
    assert!(
        editor
            .clipboard_mut()
            .copy_region(&world, TilePoint::new(0, 4), 3, 2)
    );
    assert_eq!(
        editor.set_active_tool_by_name("Paste"),
        Some(Activation::Activated)
    );
    assert_eq!(previews.load(Ordering::SeqCst), 1);

    // paste the grass strip into the sky
    assert!(editor.mouse_down(PointerEvent::left_at(0, 0)));
    let pasted = editor.session().world().unwrap();
    assert!(pasted.tile(TilePoint::new(2, 0)).unwrap().is_active);
    assert!(editor.session().is_dirty());
}

#[tokio::test]
async fn test_pointer_without_world_is_ignored() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());
    editor.set_active_tool_by_name("Pencil");

    assert!(!editor.mouse_down(PointerEvent::left_at(0, 0)));
    assert!(!editor.session().is_dirty());
    assert!(editor.tools().mouse_tile().location().is_none());
}

#[tokio::test]
async fn test_arrow_tool_never_edits() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());
    editor.new_world(small_spec()).unwrap();
    next_completion(&mut editor).await;
    editor.set_active_tool_by_name("Arrow");

    assert!(!editor.mouse_down(PointerEvent::left_at(2, 4)));
    assert!(!editor.mouse_move(PointerEvent::left_at(3, 4)));
    assert!(!editor.mouse_up(PointerEvent::at(3, 4)));
    assert!(!editor.session().is_dirty());

    let under_pointer = editor.tools().mouse_tile().tile().unwrap();
    assert!(under_pointer.is_active);
}

#[tokio::test]
async fn test_paint_changes_invalidate_preview() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());
    let previews = count_previews(&mut editor);

    editor.update_paint(|paint| paint.set_paint_mode(paint.paint_mode()));
    assert_eq!(previews.load(Ordering::SeqCst), 0);

    editor.update_paint(|paint| {
        paint.set_paint_mode(PaintMode::Liquid);
        paint.set_liquid_type(LiquidType::Water);
    });
    assert_eq!(previews.load(Ordering::SeqCst), 1);

    editor.swap(Modifiers::NONE);
    assert_eq!(editor.paint().liquid_type(), LiquidType::Lava);
    assert_eq!(previews.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_world_install_raises_preview_changed() {
    let dir = tempdir().unwrap();
    let mut editor = editor_with(GateCodec::opened(), dir.path());
    let previews = count_previews(&mut editor);

    editor.new_world(small_spec()).unwrap();
    next_completion(&mut editor).await;
    assert_eq!(previews.load(Ordering::SeqCst), 1);
}
