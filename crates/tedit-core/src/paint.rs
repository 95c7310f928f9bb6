//! Paint settings applied by the editing tools.
//!
//! [`PaintSettings`] holds what the pencil paints (tile, wall, liquid, brick
//! style), how masks restrict it, and whether it erases instead. Every setter
//! notifies subscribers with a [`PaintChange`] only when the value actually
//! changed.

use serde::{Deserialize, Serialize};
use tedit_world::{BrickStyle, LiquidType, Tile, tile_ids, wall_ids};

use crate::observer::{Observers, SubscriberId};

/// Which layer of a tile the pencil paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintMode {
    #[default]
    Tile,
    Wall,
    TileAndWall,
    Liquid,
}

impl PaintMode {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tile => "Tile",
            Self::Wall => "Wall",
            Self::TileAndWall => "Tile and Wall",
            Self::Liquid => "Liquid",
        }
    }
}

/// How the mask restricts which existing tiles may be painted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskMode {
    #[default]
    Off,
    /// Only paint over the mask id.
    Match,
    /// Only paint where nothing is present.
    Empty,
    /// Paint anywhere except over the mask id.
    NotMatching,
}

impl MaskMode {
    /// Whether painting is allowed given what is already there.
    pub fn permits(&self, present: bool, matches_mask: bool) -> bool {
        match self {
            Self::Off => true,
            Self::Match => present && matches_mask,
            Self::Empty => !present,
            Self::NotMatching => !(present && matches_mask),
        }
    }
}

/// Keyboard modifiers held during a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
    };
}

/// Initial paint settings, loaded from the editor settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintDefaults {
    pub paint_mode: PaintMode,
    pub tile_mask_mode: MaskMode,
    pub wall_mask_mode: MaskMode,
    pub tile: u16,
    pub wall: u8,
    pub tile_mask: u16,
    pub wall_mask: u8,
    pub liquid_type: LiquidType,
    pub brick_style: BrickStyle,
    pub is_eraser: bool,
}

impl Default for PaintDefaults {
    fn default() -> Self {
        Self {
            paint_mode: PaintMode::Tile,
            tile_mask_mode: MaskMode::Off,
            wall_mask_mode: MaskMode::Off,
            tile: tile_ids::STONE,
            wall: wall_ids::DIRT,
            tile_mask: tile_ids::DIRT,
            wall_mask: wall_ids::NONE,
            liquid_type: LiquidType::Water,
            brick_style: BrickStyle::Full,
            is_eraser: false,
        }
    }
}

/// The property of [`PaintSettings`] that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintChange {
    PaintMode,
    TileMaskMode,
    WallMaskMode,
    Tile,
    Wall,
    TileMask,
    WallMask,
    LiquidType,
    BrickStyle,
    Eraser,
}

#[derive(Debug)]
pub struct PaintSettings {
    paint_mode: PaintMode,
    tile_mask_mode: MaskMode,
    wall_mask_mode: MaskMode,
    tile: u16,
    wall: u8,
    tile_mask: u16,
    wall_mask: u8,
    liquid_type: LiquidType,
    brick_style: BrickStyle,
    is_eraser: bool,
    revision: u64,
    observers: Observers<PaintChange>,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self::new(&PaintDefaults::default())
    }
}

/// Store `value` in `slot`, returning whether it differed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl PaintSettings {
    pub fn new(defaults: &PaintDefaults) -> Self {
        Self {
            paint_mode: defaults.paint_mode,
            tile_mask_mode: defaults.tile_mask_mode,
            wall_mask_mode: defaults.wall_mask_mode,
            tile: defaults.tile,
            wall: defaults.wall,
            tile_mask: defaults.tile_mask,
            wall_mask: defaults.wall_mask,
            liquid_type: defaults.liquid_type,
            brick_style: defaults.brick_style,
            is_eraser: defaults.is_eraser,
            revision: 0,
            observers: Observers::default(),
        }
    }

    /// Subscribe to property changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&PaintChange) + Send + 'static) -> SubscriberId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn changed(&mut self, did_change: bool, change: PaintChange) {
        if did_change {
            self.revision += 1;
            self.observers.notify(&change);
        }
    }

    /// Counter bumped on every change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn paint_mode(&self) -> PaintMode {
        self.paint_mode
    }

    pub fn tile_mask_mode(&self) -> MaskMode {
        self.tile_mask_mode
    }

    pub fn wall_mask_mode(&self) -> MaskMode {
        self.wall_mask_mode
    }

    pub fn tile(&self) -> u16 {
        self.tile
    }

    pub fn wall(&self) -> u8 {
        self.wall
    }

    pub fn tile_mask(&self) -> u16 {
        self.tile_mask
    }

    pub fn wall_mask(&self) -> u8 {
        self.wall_mask
    }

    pub fn liquid_type(&self) -> LiquidType {
        self.liquid_type
    }

    pub fn brick_style(&self) -> BrickStyle {
        self.brick_style
    }

    pub fn is_eraser(&self) -> bool {
        self.is_eraser
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_paint_mode(&mut self, mode: PaintMode) {
        let did = replace(&mut self.paint_mode, mode);
        self.changed(did, PaintChange::PaintMode);
    }

    pub fn set_tile_mask_mode(&mut self, mode: MaskMode) {
        let did = replace(&mut self.tile_mask_mode, mode);
        self.changed(did, PaintChange::TileMaskMode);
    }

    pub fn set_wall_mask_mode(&mut self, mode: MaskMode) {
        let did = replace(&mut self.wall_mask_mode, mode);
        self.changed(did, PaintChange::WallMaskMode);
    }

    pub fn set_tile(&mut self, tile: u16) {
        let did = replace(&mut self.tile, tile);
        self.changed(did, PaintChange::Tile);
    }

    pub fn set_wall(&mut self, wall: u8) {
        let did = replace(&mut self.wall, wall);
        self.changed(did, PaintChange::Wall);
    }

    pub fn set_tile_mask(&mut self, tile_mask: u16) {
        let did = replace(&mut self.tile_mask, tile_mask);
        self.changed(did, PaintChange::TileMask);
    }

    pub fn set_wall_mask(&mut self, wall_mask: u8) {
        let did = replace(&mut self.wall_mask, wall_mask);
        self.changed(did, PaintChange::WallMask);
    }

    pub fn set_liquid_type(&mut self, liquid: LiquidType) {
        let did = replace(&mut self.liquid_type, liquid);
        self.changed(did, PaintChange::LiquidType);
    }

    pub fn set_brick_style(&mut self, style: BrickStyle) {
        let did = replace(&mut self.brick_style, style);
        self.changed(did, PaintChange::BrickStyle);
    }

    pub fn set_eraser(&mut self, is_eraser: bool) {
        let did = replace(&mut self.is_eraser, is_eraser);
        self.changed(did, PaintChange::Eraser);
    }

    // =========================================================================
    // Swaps
    // =========================================================================

    /// Exchange the tile and the tile mask.
    pub fn swap_tile(&mut self) {
        let (tile, mask) = (self.tile, self.tile_mask);
        self.set_tile(mask);
        self.set_tile_mask(tile);
    }

    /// Exchange the wall and the wall mask.
    pub fn swap_wall(&mut self) {
        let (wall, mask) = (self.wall, self.wall_mask);
        self.set_wall(mask);
        self.set_wall_mask(wall);
    }

    /// Rotate Water → Lava → Honey → Water. Any other liquid becomes Water.
    pub fn swap_liquid(&mut self) {
        let next = match self.liquid_type {
            LiquidType::Water => LiquidType::Lava,
            LiquidType::Lava => LiquidType::Honey,
            LiquidType::Honey | LiquidType::None => LiquidType::Water,
        };
        self.set_liquid_type(next);
    }

    /// Swap whatever the current paint mode paints.
    ///
    /// In [`PaintMode::TileAndWall`] the wall is swapped while Shift is held,
    /// otherwise the tile.
    pub fn swap(&mut self, modifiers: Modifiers) {
        match self.paint_mode {
            PaintMode::Tile => self.swap_tile(),
            PaintMode::Wall => self.swap_wall(),
            PaintMode::TileAndWall if modifiers.shift => self.swap_wall(),
            PaintMode::TileAndWall => self.swap_tile(),
            PaintMode::Liquid => self.swap_liquid(),
        }
    }

    // =========================================================================
    // Application
    // =========================================================================

    /// Paint one tile according to the current settings.
    ///
    /// Returns whether the tile changed.
    pub fn apply(&self, tile: &mut Tile) -> bool {
        let before = *tile;
        match self.paint_mode {
            PaintMode::Tile => self.apply_tile(tile),
            PaintMode::Wall => self.apply_wall(tile),
            PaintMode::TileAndWall => {
                self.apply_tile(tile);
                self.apply_wall(tile);
            }
            PaintMode::Liquid => self.apply_liquid(tile),
        }
        *tile != before
    }

    fn apply_tile(&self, tile: &mut Tile) {
        let matches = tile.tile_type == self.tile_mask;
        if !self.tile_mask_mode.permits(tile.is_active, matches) {
            return;
        }
        if self.is_eraser {
            tile.is_active = false;
            tile.brick_style = BrickStyle::Full;
        } else {
            tile.is_active = true;
            tile.tile_type = self.tile;
            tile.brick_style = self.brick_style;
            tile.liquid_amount = 0;
            tile.liquid_type = LiquidType::None;
        }
        // frames are recomputed by the renderer
        tile.u = -1;
        tile.v = -1;
    }

    fn apply_wall(&self, tile: &mut Tile) {
        let present = tile.wall != wall_ids::NONE;
        if !self.wall_mask_mode.permits(present, tile.wall == self.wall_mask) {
            return;
        }
        tile.wall = if self.is_eraser {
            wall_ids::NONE
        } else {
            self.wall
        };
    }

    fn apply_liquid(&self, tile: &mut Tile) {
        if self.is_eraser || self.liquid_type == LiquidType::None {
            tile.liquid_type = LiquidType::None;
            tile.liquid_amount = 0;
        } else if !tile.is_active {
            tile.liquid_type = self.liquid_type;
            tile.liquid_amount = u8::MAX;
        }
    }
}
