//! Pointer state in world coordinates.

use tedit_world::{Tile, TilePoint, WorldDocument};

/// Which pointer buttons are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseButtons {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        middle: false,
    };

    pub const LEFT: Self = Self {
        left: true,
        right: false,
        middle: false,
    };
}

/// A pointer event already translated to tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub location: TilePoint,
    pub buttons: MouseButtons,
}

impl PointerEvent {
    pub const fn new(location: TilePoint, buttons: MouseButtons) -> Self {
        Self { location, buttons }
    }

    pub const fn at(x: i32, y: i32) -> Self {
        Self::new(TilePoint::new(x, y), MouseButtons::NONE)
    }

    pub const fn left_at(x: i32, y: i32) -> Self {
        Self::new(TilePoint::new(x, y), MouseButtons::LEFT)
    }
}

/// The tile under the pointer.
///
/// The snapshot is only re-read when the pointer moves to a different tile;
/// the latest event is always kept.
#[derive(Debug, Clone, Default)]
pub struct MouseTileState {
    last_event: Option<PointerEvent>,
    tile: Option<Tile>,
}

impl MouseTileState {
    /// Record `event`. Returns `true` if the location changed.
    pub fn update(&mut self, event: PointerEvent, world: &WorldDocument) -> bool {
        let moved = self.location() != Some(event.location);
        if moved {
            self.tile = world.tile(event.location).copied();
        }
        self.last_event = Some(event);
        moved
    }

    pub fn location(&self) -> Option<TilePoint> {
        self.last_event.map(|e| e.location)
    }

    pub fn last_event(&self) -> Option<&PointerEvent> {
        self.last_event.as_ref()
    }

    /// Snapshot of the tile under the pointer, `None` when off the map.
    pub fn tile(&self) -> Option<&Tile> {
        self.tile.as_ref()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
