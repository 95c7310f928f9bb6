use super::{Tool, ToolContext};
use crate::mouse::PointerEvent;

/// Paints single tiles with the current paint settings while the left
/// button is held.
#[derive(Debug, Default)]
pub struct PencilTool {
    active: bool,
    drawing: bool,
}

impl PencilTool {
    fn paint_at(ctx: &mut ToolContext<'_>, event: &PointerEvent) -> bool {
        let paint = ctx.paint();
        if !ctx.world().in_bounds(event.location) {
            return false;
        }
        // only take the mutable path when the tile would change
        let Some(mut tile) = ctx.world().tile(event.location).copied() else {
            return false;
        };
        if !paint.apply(&mut tile) {
            return false;
        }
        ctx.world_mut().tiles.set(event.location, tile)
    }
}

impl Tool for PencilTool {
    fn name(&self) -> &str {
        "Pencil"
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.drawing = false;
    }

    fn mouse_down(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> bool {
        if !event.buttons.left {
            return false;
        }
        self.drawing = true;
        Self::paint_at(ctx, event)
    }

    fn mouse_up(&mut self, _ctx: &mut ToolContext<'_>, event: &PointerEvent) -> bool {
        if !event.buttons.left {
            self.drawing = false;
        }
        false
    }

    fn mouse_move(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> bool {
        if !self.drawing || !event.buttons.left {
            return false;
        }
        Self::paint_at(ctx, event)
    }
}
