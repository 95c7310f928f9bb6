//! The in-memory world document.

use chrono::{DateTime, Utc};
use rkyv::{Archive, Deserialize, Serialize};

use crate::tile::Tile;

/// A tile coordinate. Signed so pointer positions off the map can be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Row-major grid of tiles.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with default (empty) tiles.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `point` addresses a tile inside the grid.
    pub fn contains(&self, point: TilePoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }

    fn index(&self, point: TilePoint) -> Option<usize> {
        self.contains(point)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }

    pub fn get(&self, point: TilePoint) -> Option<&Tile> {
        self.index(point).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, point: TilePoint) -> Option<&mut Tile> {
        self.index(point).map(move |i| &mut self.tiles[i])
    }

    /// Overwrite one tile. Returns `false` when `point` is out of bounds.
    pub fn set(&mut self, point: TilePoint, tile: Tile) -> bool {
        match self.get_mut(point) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// Clone `tile` across every column of row `y`.
    pub fn fill_row(&mut self, y: u32, tile: Tile) {
        if y >= self.height {
            return;
        }
        let start = y as usize * self.width as usize;
        self.tiles[start..start + self.width as usize].fill(tile);
    }

    /// Tiles of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[Tile] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.tiles[start..start + self.width as usize]
    }

    /// Every tile in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }
}

/// A town NPC living in the world.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub home: TilePoint,
}

impl Npc {
    pub fn new(name: impl Into<String>, home: TilePoint) -> Self {
        Self {
            name: name.into(),
            home,
        }
    }
}

/// One editable world: tile grid plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
pub struct WorldDocument {
    pub title: String,
    pub tiles: TileGrid,
    pub spawn: TilePoint,
    pub ground_level: u32,
    pub rock_level: u32,
    /// World extents in pixels (16 pixels per tile).
    pub right_world: u32,
    pub bottom_world: u32,
    pub npcs: Vec<Npc>,
    /// When the world was last written to disk (RFC 3339).
    pub last_saved_at: Option<String>,
}

impl WorldDocument {
    /// Pixels per tile edge.
    pub const TILE_PIXELS: u32 = 16;

    /// Create an empty world of the given size.
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            tiles: TileGrid::new(width, height),
            spawn: TilePoint::new((width / 2) as i32, 0),
            ground_level: 0,
            rock_level: 0,
            right_world: width * Self::TILE_PIXELS,
            bottom_world: height * Self::TILE_PIXELS,
            npcs: Vec::new(),
            last_saved_at: None,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.tiles.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.tiles.height()
    }

    pub fn in_bounds(&self, point: TilePoint) -> bool {
        self.tiles.contains(point)
    }

    pub fn tile(&self, point: TilePoint) -> Option<&Tile> {
        self.tiles.get(point)
    }

    pub fn tile_mut(&mut self, point: TilePoint) -> Option<&mut Tile> {
        self.tiles.get_mut(point)
    }

    /// Parse the last-saved timestamp.
    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Record when the world was last written to disk.
    pub fn mark_saved_at(&mut self, at: DateTime<Utc>) {
        self.last_saved_at = Some(at.to_rfc3339());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::tile_ids;

    #[test]
    fn test_grid_bounds() {
        let grid = TileGrid::new(4, 3);
        assert!(grid.contains(TilePoint::new(0, 0)));
        assert!(grid.contains(TilePoint::new(3, 2)));
        assert!(!grid.contains(TilePoint::new(4, 0)));
        assert!(!grid.contains(TilePoint::new(0, 3)));
        assert!(!grid.contains(TilePoint::new(-1, 1)));
        assert!(grid.get(TilePoint::new(0, -1)).is_none());
    }

    #[test]
    fn test_fill_row_only_touches_that_row() {
        let mut grid = TileGrid::new(3, 3);
        grid.fill_row(1, Tile::solid(tile_ids::STONE, 0));

        assert!(grid.row(0).iter().all(Tile::is_empty));
        assert!(grid.row(1).iter().all(|t| t.tile_type == tile_ids::STONE));
        assert!(grid.row(2).iter().all(Tile::is_empty));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = TileGrid::new(2, 2);
        assert!(!grid.set(TilePoint::new(5, 5), Tile::solid(1, 0)));
        assert!(grid.set(TilePoint::new(1, 1), Tile::solid(1, 0)));
        assert!(grid.get(TilePoint::new(1, 1)).is_some_and(|t| t.is_active));
    }

    #[test]
    fn test_new_world_extents() {
        let world = WorldDocument::new("Test", 10, 20);
        assert_eq!(world.right_world, 160);
        assert_eq!(world.bottom_world, 320);
        assert_eq!(world.spawn, TilePoint::new(5, 0));
        assert!(world.last_saved_at().is_none());
    }

    #[test]
    fn test_last_saved_round_trip() {
        let mut world = WorldDocument::new("Test", 1, 1);
        let now = Utc::now();
        world.mark_saved_at(now);
        let parsed = world.last_saved_at().unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }
}
