//! Editing tools and the registry that owns them.
//!
//! A tool reacts to pointer events and may edit the world. Tools never own
//! the world; they receive a [`ToolContext`] for the duration of one event.

mod arrow;
mod pencil;
mod paste;

use std::sync::Arc;

use tedit_world::WorldDocument;

use crate::clipboard::Clipboard;
use crate::mouse::PointerEvent;
use crate::paint::PaintSettings;

pub use arrow::ArrowTool;
pub use paste::PasteTool;
pub use pencil::PencilTool;

/// Everything a tool may touch while handling one pointer event.
pub struct ToolContext<'a> {
    world: &'a mut Arc<WorldDocument>,
    paint: &'a PaintSettings,
    clipboard: &'a dyn Clipboard,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        world: &'a mut Arc<WorldDocument>,
        paint: &'a PaintSettings,
        clipboard: &'a dyn Clipboard,
    ) -> Self {
        Self {
            world,
            paint,
            clipboard,
        }
    }

    pub fn world(&self) -> &WorldDocument {
        &**self.world
    }

    /// Mutable access to the world.
    ///
    /// If a save still holds the previous snapshot, the world is copied
    /// first so the snapshot is never modified.
    pub fn world_mut(&mut self) -> &mut WorldDocument {
        Arc::make_mut(self.world)
    }

    pub fn paint(&self) -> &'a PaintSettings {
        self.paint
    }

    pub fn clipboard(&self) -> &'a dyn Clipboard {
        self.clipboard
    }
}

/// An editing tool driven by pointer events.
///
/// Each handler returns whether the world was modified.
pub trait Tool: Send {
    fn name(&self) -> &str;

    /// Tools that paste refuse activation while the clipboard is empty.
    fn requires_clipboard(&self) -> bool {
        false
    }

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    fn mouse_down(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> bool;

    fn mouse_up(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> bool;

    fn mouse_move(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> bool;
}

/// Handle to a tool in a [`ToolRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToolId(usize);

/// Owns every tool. Other components refer to tools by [`ToolId`].
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name()))
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the arrow, pencil and paste tools, in that order.
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ArrowTool::default()));
        registry.register(Box::new(PencilTool::default()));
        registry.register(Box::new(PasteTool::default()));
        registry
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) -> ToolId {
        self.tools.push(tool);
        ToolId(self.tools.len() - 1)
    }

    pub fn get(&self, id: ToolId) -> Option<&dyn Tool> {
        self.tools.get(id.0).map(Box::as_ref)
    }

    pub fn get_mut(&mut self, id: ToolId) -> Option<&mut (dyn Tool + 'static)> {
        self.tools.get_mut(id.0).map(Box::as_mut)
    }

    /// Look a tool up by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<ToolId> {
        self.tools
            .iter()
            .position(|t| t.name().eq_ignore_ascii_case(name))
            .map(ToolId)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
