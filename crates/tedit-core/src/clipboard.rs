//! Copy/paste of rectangular tile regions.

use tedit_world::{Tile, TilePoint, WorldDocument};

/// Clipboard collaborator used by tools that paste.
pub trait Clipboard: Send {
    /// Whether there is anything to paste.
    fn can_paste(&self) -> bool;

    /// Paste the buffer with its top-left corner at `origin`.
    ///
    /// Returns whether any tile was written.
    fn paste(&self, world: &mut WorldDocument, origin: TilePoint) -> bool;
}

/// A copied rectangle of tiles, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBuffer {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get(y as usize * self.width as usize + x as usize)
    }
}

/// Holds at most one copied buffer.
#[derive(Debug, Clone, Default)]
pub struct TileClipboard {
    buffer: Option<TileBuffer>,
}

impl TileClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the region starting at `origin`, clipped to the world.
    ///
    /// Returns `false` and leaves the clipboard untouched when the clipped
    /// region is empty.
    pub fn copy_region(
        &mut self,
        world: &WorldDocument,
        origin: TilePoint,
        width: u32,
        height: u32,
    ) -> bool {
        let x0 = origin.x.max(0);
        let y0 = origin.y.max(0);
        let x1 = (i64::from(origin.x) + i64::from(width)).min(i64::from(world.width())) as i32;
        let y1 = (i64::from(origin.y) + i64::from(height)).min(i64::from(world.height())) as i32;
        if x1 <= x0 || y1 <= y0 {
            return false;
        }

        let mut tiles = Vec::with_capacity(((x1 - x0) * (y1 - y0)) as usize);
        for y in y0..y1 {
            for x in x0..x1 {
                tiles.push(world.tile(TilePoint::new(x, y)).copied().unwrap_or_default());
            }
        }

        tracing::debug!("Copied {}x{} tiles", x1 - x0, y1 - y0);
        self.buffer = Some(TileBuffer {
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
            tiles,
        });
        true
    }

    pub fn buffer(&self) -> Option<&TileBuffer> {
        self.buffer.as_ref()
    }

    pub fn clear(&mut self) {
        self.buffer = None;
    }
}

impl Clipboard for TileClipboard {
    fn can_paste(&self) -> bool {
        self.buffer.is_some()
    }

    fn paste(&self, world: &mut WorldDocument, origin: TilePoint) -> bool {
        let Some(buffer) = &self.buffer else {
            return false;
        };

        let mut written = false;
        for y in 0..buffer.height {
            for x in 0..buffer.width {
                let target = TilePoint::new(origin.x + x as i32, origin.y + y as i32);
                if let Some(tile) = buffer.get(x, y) {
                    written |= world.tiles.set(target, *tile);
                }
            }
        }
        written
    }
}
