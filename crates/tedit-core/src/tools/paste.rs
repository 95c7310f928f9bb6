use super::{Tool, ToolContext};
use crate::mouse::PointerEvent;

/// Pastes the clipboard buffer with its corner under the pointer.
#[derive(Debug, Default)]
pub struct PasteTool {
    active: bool,
}

impl Tool for PasteTool {
    fn name(&self) -> &str {
        "Paste"
    }

    fn requires_clipboard(&self) -> bool {
        true
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn mouse_down(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> bool {
        if !event.buttons.left {
            return false;
        }
        let clipboard = ctx.clipboard();
        if !clipboard.can_paste() {
            return false;
        }
        clipboard.paste(ctx.world_mut(), event.location)
    }

    fn mouse_up(&mut self, _ctx: &mut ToolContext<'_>, _event: &PointerEvent) -> bool {
        false
    }

    fn mouse_move(&mut self, _ctx: &mut ToolContext<'_>, _event: &PointerEvent) -> bool {
        false
    }
}
