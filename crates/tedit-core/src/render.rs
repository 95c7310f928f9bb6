//! Renderer and undo-history collaborators.

use tedit_world::WorldDocument;

/// Produces the pixel map and minimap shown for a world.
///
/// Rendering happens on the consumption context after a world is installed,
/// so implementations do not need to be thread-safe.
pub trait Renderer {
    type PixelMap;
    type Minimap;

    fn render_full_pixel_map(&self, world: &WorldDocument) -> Self::PixelMap;

    fn render_minimap(&self, world: &WorldDocument) -> Self::Minimap;

    /// Refresh an existing minimap in place after an edit.
    fn update_minimap(&self, world: &WorldDocument, minimap: &mut Self::Minimap);
}

/// Renderer for headless use. Produces nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    type PixelMap = ();
    type Minimap = ();

    fn render_full_pixel_map(&self, _world: &WorldDocument) {}

    fn render_minimap(&self, _world: &WorldDocument) {}

    fn update_minimap(&self, _world: &WorldDocument, _minimap: &mut ()) {}
}

/// Notification from the undo manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryEvent {
    Undid,
    Redid,
    /// An edit was recorded as a new undo step.
    Saved,
}
