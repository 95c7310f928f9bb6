//! Tile types.

use rkyv::{Archive, Deserialize, Serialize};

/// Well-known foreground tile ids.
pub mod tile_ids {
    pub const DIRT: u16 = 0;
    pub const STONE: u16 = 1;
    pub const GRASS: u16 = 2;
}

/// Well-known wall ids.
pub mod wall_ids {
    pub const NONE: u8 = 0;
    pub const DIRT: u8 = 2;
}

/// Liquid occupying a tile.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Archive,
    Serialize,
    Deserialize,
    serde::Serialize,
    serde::Deserialize,
)]
#[rkyv(compare(PartialEq))]
#[serde(rename_all = "snake_case")]
pub enum LiquidType {
    #[default]
    None,
    Water,
    Lava,
    Honey,
}

impl LiquidType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Water => "Water",
            Self::Lava => "Lava",
            Self::Honey => "Honey",
        }
    }
}

/// Shape of a solid tile.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Archive,
    Serialize,
    Deserialize,
    serde::Serialize,
    serde::Deserialize,
)]
#[rkyv(compare(PartialEq))]
#[serde(rename_all = "snake_case")]
pub enum BrickStyle {
    #[default]
    Full,
    HalfBrick,
    SlopeLeft,
    SlopeRight,
    SlopeTopLeft,
    SlopeTopRight,
}

/// One cell of the world grid.
///
/// `u`/`v` are sprite frame coordinates; `-1` means "let the renderer pick".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[rkyv(compare(PartialEq))]
pub struct Tile {
    pub is_active: bool,
    pub tile_type: u16,
    pub wall: u8,
    pub u: i16,
    pub v: i16,
    pub liquid_type: LiquidType,
    pub liquid_amount: u8,
    pub brick_style: BrickStyle,
    pub wire_red: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            is_active: false,
            tile_type: 0,
            wall: wall_ids::NONE,
            u: -1,
            v: -1,
            liquid_type: LiquidType::None,
            liquid_amount: 0,
            brick_style: BrickStyle::Full,
            wire_red: false,
        }
    }
}

impl Tile {
    /// A solid tile of the given type on top of a wall.
    pub fn solid(tile_type: u16, wall: u8) -> Self {
        Self {
            is_active: true,
            tile_type,
            wall,
            ..Self::default()
        }
    }

    /// Whether this tile is indistinguishable from an untouched one.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_liquid(&self) -> bool {
        self.liquid_type != LiquidType::None && self.liquid_amount > 0
    }
}
