//! Routing of pointer events to the active tool.

use std::sync::Arc;

use tedit_world::WorldDocument;

use crate::clipboard::Clipboard;
use crate::mouse::{MouseTileState, PointerEvent};
use crate::observer::{Observers, SubscriberId};
use crate::paint::PaintSettings;
use crate::tools::{Tool, ToolContext, ToolId, ToolRegistry};

/// Raised when the tool preview needs redrawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewChanged;

/// Outcome of [`ToolDispatcher::set_active_tool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Activated,
    AlreadyActive,
    /// The tool needs clipboard content and the clipboard is empty.
    RefusedEmptyClipboard,
    UnknownTool,
}

/// Holds the active tool handle and the pointer state, and forwards pointer
/// events to the active tool.
#[derive(Debug)]
pub struct ToolDispatcher {
    registry: ToolRegistry,
    active: Option<ToolId>,
    mouse: MouseTileState,
    preview_changed: Observers<PreviewChanged>,
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self::new(ToolRegistry::with_builtin_tools())
    }
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            active: None,
            mouse: MouseTileState::default(),
            preview_changed: Observers::default(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn find_tool(&self, name: &str) -> Option<ToolId> {
        self.registry.find(name)
    }

    pub fn active_tool(&self) -> Option<ToolId> {
        self.active
    }

    pub fn active_tool_name(&self) -> Option<&str> {
        self.active
            .and_then(|id| self.registry.get(id))
            .map(Tool::name)
    }

    pub fn mouse_tile(&self) -> &MouseTileState {
        &self.mouse
    }

    pub fn subscribe_preview_changed(
        &mut self,
        callback: impl FnMut(&PreviewChanged) + Send + 'static,
    ) -> SubscriberId {
        self.preview_changed.subscribe(callback)
    }

    pub fn unsubscribe_preview_changed(&mut self, id: SubscriberId) -> bool {
        self.preview_changed.unsubscribe(id)
    }

    pub fn raise_preview_changed(&mut self) {
        self.preview_changed.notify(&PreviewChanged);
    }

    /// Make `id` the active tool.
    ///
    /// Tools that require clipboard content are refused while
    /// `clipboard.can_paste()` is false; the previous tool stays active and
    /// no preview change is raised.
    pub fn set_active_tool(&mut self, id: ToolId, clipboard: &dyn Clipboard) -> Activation {
        if self.active == Some(id) {
            return Activation::AlreadyActive;
        }

        let Some(tool) = self.registry.get(id) else {
            tracing::warn!("Ignoring activation of unknown tool {id:?}");
            return Activation::UnknownTool;
        };

        if tool.requires_clipboard() && !clipboard.can_paste() {
            tracing::debug!("Refusing to activate {}: clipboard is empty", tool.name());
            return Activation::RefusedEmptyClipboard;
        }

        if let Some(previous) = self.active.and_then(|prev| self.registry.get_mut(prev)) {
            previous.set_active(false);
        }
        if let Some(tool) = self.registry.get_mut(id) {
            tool.set_active(true);
            tracing::debug!("Active tool: {}", tool.name());
        }
        self.active = Some(id);
        self.raise_preview_changed();
        Activation::Activated
    }

    /// Forward a pointer press. Returns whether the world was modified.
    pub fn dispatch_mouse_down(
        &mut self,
        world: &mut Arc<WorldDocument>,
        paint: &PaintSettings,
        clipboard: &dyn Clipboard,
        event: PointerEvent,
    ) -> bool {
        self.mouse.update(event, world);
        self.with_active_tool(world, paint, clipboard, |tool, ctx| {
            tool.mouse_down(ctx, &event)
        })
    }

    /// Forward a pointer release. Returns whether the world was modified.
    pub fn dispatch_mouse_up(
        &mut self,
        world: &mut Arc<WorldDocument>,
        paint: &PaintSettings,
        clipboard: &dyn Clipboard,
        event: PointerEvent,
    ) -> bool {
        self.mouse.update(event, world);
        self.with_active_tool(world, paint, clipboard, |tool, ctx| {
            tool.mouse_up(ctx, &event)
        })
    }

    /// Forward a pointer move. Moves outside the world are ignored entirely.
    pub fn dispatch_mouse_move(
        &mut self,
        world: &mut Arc<WorldDocument>,
        paint: &PaintSettings,
        clipboard: &dyn Clipboard,
        event: PointerEvent,
    ) -> bool {
        if !world.in_bounds(event.location) {
            return false;
        }
        self.mouse.update(event, world);
        self.with_active_tool(world, paint, clipboard, |tool, ctx| {
            tool.mouse_move(ctx, &event)
        })
    }

    fn with_active_tool(
        &mut self,
        world: &mut Arc<WorldDocument>,
        paint: &PaintSettings,
        clipboard: &dyn Clipboard,
        handler: impl FnOnce(&mut dyn Tool, &mut ToolContext<'_>) -> bool,
    ) -> bool {
        let Some(tool) = self.active.and_then(|id| self.registry.get_mut(id)) else {
            return false;
        };
        let mut ctx = ToolContext::new(world, paint, clipboard);
        handler(tool, &mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tedit_world::TilePoint;

    use super::*;
    use crate::clipboard::TileClipboard;

    fn counter(dispatcher: &mut ToolDispatcher) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&count);
        dispatcher.subscribe_preview_changed(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_activation_switches_tools() {
        let mut dispatcher = ToolDispatcher::default();
        let clipboard = TileClipboard::new();
        let raised = counter(&mut dispatcher);
        let arrow = dispatcher.find_tool("Arrow").unwrap();
        let pencil = dispatcher.find_tool("Pencil").unwrap();

        assert_eq!(dispatcher.set_active_tool(arrow, &clipboard), Activation::Activated);
        assert_eq!(dispatcher.set_active_tool(pencil, &clipboard), Activation::Activated);
        assert_eq!(dispatcher.active_tool_name(), Some("Pencil"));
        assert!(!dispatcher.registry().get(arrow).unwrap().is_active());
        assert!(dispatcher.registry().get(pencil).unwrap().is_active());
        assert_eq!(raised.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reactivating_is_a_no_op() {
        let mut dispatcher = ToolDispatcher::default();
        let clipboard = TileClipboard::new();
        let pencil = dispatcher.find_tool("Pencil").unwrap();
        dispatcher.set_active_tool(pencil, &clipboard);
        let raised = counter(&mut dispatcher);

        assert_eq!(
            dispatcher.set_active_tool(pencil, &clipboard),
            Activation::AlreadyActive
        );
        assert_eq!(raised.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_paste_refused_with_empty_clipboard() {
        let mut dispatcher = ToolDispatcher::default();
        let mut clipboard = TileClipboard::new();
        let arrow = dispatcher.find_tool("Arrow").unwrap();
        let paste = dispatcher.find_tool("Paste").unwrap();
        dispatcher.set_active_tool(arrow, &clipboard);
        let raised = counter(&mut dispatcher);

        assert_eq!(
            dispatcher.set_active_tool(paste, &clipboard),
            Activation::RefusedEmptyClipboard
        );
        assert_eq!(dispatcher.active_tool(), Some(arrow));
        assert!(!dispatcher.registry().get(paste).unwrap().is_active());
        assert_eq!(raised.load(Ordering::SeqCst), 0);

        let world = WorldDocument::new("Test", 2, 2);
        clipboard.copy_region(&world, TilePoint::new(0, 0), 1, 1);
        assert_eq!(dispatcher.set_active_tool(paste, &clipboard), Activation::Activated);
        assert_eq!(raised.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_without_active_tool_tracks_pointer() {
        let mut dispatcher = ToolDispatcher::default();
        let mut world = Arc::new(WorldDocument::new("Test", 3, 3));
        let paint = PaintSettings::default();
        let clipboard = TileClipboard::new();

        assert!(!dispatcher.dispatch_mouse_down(
            &mut world,
            &paint,
            &clipboard,
            PointerEvent::left_at(1, 2)
        ));
        assert_eq!(dispatcher.mouse_tile().location(), Some(TilePoint::new(1, 2)));
    }

    #[test]
    fn test_move_outside_world_is_ignored() {
        let mut dispatcher = ToolDispatcher::default();
        let mut world = Arc::new(WorldDocument::new("Test", 3, 3));
        let paint = PaintSettings::default();
        let clipboard = TileClipboard::new();
        let pencil = dispatcher.find_tool("Pencil").unwrap();
        dispatcher.set_active_tool(pencil, &clipboard);

        dispatcher.dispatch_mouse_down(&mut world, &paint, &clipboard, PointerEvent::left_at(0, 0));
        assert!(!dispatcher.dispatch_mouse_move(
            &mut world,
            &paint,
            &clipboard,
            PointerEvent::left_at(3, 0)
        ));
        assert_eq!(dispatcher.mouse_tile().location(), Some(TilePoint::new(0, 0)));

        assert!(dispatcher.dispatch_mouse_move(
            &mut world,
            &paint,
            &clipboard,
            PointerEvent::left_at(1, 0)
        ));
    }
}
