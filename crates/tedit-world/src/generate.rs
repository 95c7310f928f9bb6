//! Banded generation of new, flat worlds.
//!
//! A new world is built row by row. Each row is a clone of one
//! representative tile; the representative only changes when a row crosses a
//! band boundary:
//!
//! | row                            | tile                     |
//! |--------------------------------|--------------------------|
//! | `ground - spawn_offset`        | grass over dirt wall     |
//! | `ground - spawn_offset + 1`    | dirt over dirt wall      |
//! | `ground + 1`                   | dirt, no wall (dirt line)|
//! | `rock_level`                   | stone (rock line)        |
//! | `height - underworld_depth`    | empty (underworld)       |
//!
//! Rows above the surface stay empty; rows between boundaries repeat the
//! band above them.

use serde::{Deserialize, Serialize};

use crate::error::WorldSpecError;
use crate::progress::Progress;
use crate::tile::{Tile, tile_ids, wall_ids};
use crate::world::{TilePoint, WorldDocument};

const GENERATING_MESSAGE: &str = "Generating World...";

/// Parameters for a brand-new world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewWorldSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub ground_level: u32,
    pub rock_level: u32,
    /// How far above the ground level the surface (and spawn point) sits.
    pub spawn_offset: u32,
    /// Rows from the bottom where the underworld starts.
    pub underworld_depth: u32,
}

impl Default for NewWorldSpec {
    fn default() -> Self {
        Self {
            title: "New World".to_string(),
            width: 4200,
            height: 1200,
            ground_level: 350,
            rock_level: 480,
            spawn_offset: 10,
            underworld_depth: 182,
        }
    }
}

impl NewWorldSpec {
    /// Check the parameters describe a world that can be built.
    pub fn validate(&self) -> Result<(), WorldSpecError> {
        if self.width == 0 || self.height == 0 {
            return Err(WorldSpecError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.ground_level >= self.height {
            return Err(WorldSpecError::GroundOutOfBounds {
                ground_level: self.ground_level,
                height: self.height,
            });
        }
        if self.rock_level < self.ground_level {
            return Err(WorldSpecError::RockAboveGround {
                rock_level: self.rock_level,
                ground_level: self.ground_level,
            });
        }
        Ok(())
    }

    /// Row holding the grass surface, if it lies inside the world.
    fn surface_row(&self) -> Option<u32> {
        self.ground_level.checked_sub(self.spawn_offset)
    }

    fn underworld_row(&self) -> Option<u32> {
        self.height.checked_sub(self.underworld_depth)
    }

    pub fn spawn_point(&self) -> TilePoint {
        TilePoint::new(
            (self.width / 2) as i32,
            self.ground_level.saturating_sub(self.spawn_offset) as i32,
        )
    }
}

/// The representative tile that starts at row `y`, or `None` when row `y`
/// continues the band above it.
pub fn band_tile(spec: &NewWorldSpec, y: u32) -> Option<Tile> {
    let surface = spec.surface_row();
    if surface.is_some_and(|s| y == s + 1) {
        Some(Tile::solid(tile_ids::DIRT, wall_ids::DIRT))
    } else if y == spec.ground_level + 1 {
        Some(Tile::solid(tile_ids::DIRT, wall_ids::NONE))
    } else if y == spec.rock_level {
        Some(Tile::solid(tile_ids::STONE, wall_ids::NONE))
    } else if spec.underworld_row() == Some(y) {
        Some(Tile::default())
    } else if surface == Some(y) {
        Some(Tile::solid(tile_ids::GRASS, wall_ids::DIRT))
    } else {
        None
    }
}

/// Build a new world from `spec`, reporting progress after each row.
///
/// Deterministic for a given spec. Runs in O(width * height).
pub fn generate_world(
    spec: &NewWorldSpec,
    progress: &dyn Fn(Progress),
) -> Result<WorldDocument, WorldSpecError> {
    spec.validate()?;

    let mut world = WorldDocument::new(spec.title.clone(), spec.width, spec.height);
    world.spawn = spec.spawn_point();
    world.ground_level = spec.ground_level;
    world.rock_level = spec.rock_level;

    let mut clone_tile = Tile::default();
    for y in 0..spec.height {
        progress(Progress::fraction(
            u64::from(y),
            u64::from(spec.height),
            GENERATING_MESSAGE,
        ));
        if let Some(tile) = band_tile(spec, y) {
            clone_tile = tile;
        }
        world.tiles.fill_row(y, clone_tile);
    }

    tracing::debug!(
        width = spec.width,
        height = spec.height,
        "Generated world '{}'",
        spec.title
    );
    Ok(world)
}
