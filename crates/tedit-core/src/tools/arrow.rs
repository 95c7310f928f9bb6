use super::{Tool, ToolContext};
use crate::mouse::PointerEvent;

/// Selection pointer. Never edits the world.
#[derive(Debug, Default)]
pub struct ArrowTool {
    active: bool,
}

impl Tool for ArrowTool {
    fn name(&self) -> &str {
        "Arrow"
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn mouse_down(&mut self, _ctx: &mut ToolContext<'_>, _event: &PointerEvent) -> bool {
        false
    }

    fn mouse_up(&mut self, _ctx: &mut ToolContext<'_>, _event: &PointerEvent) -> bool {
        false
    }

    fn mouse_move(&mut self, _ctx: &mut ToolContext<'_>, _event: &PointerEvent) -> bool {
        false
    }
}
