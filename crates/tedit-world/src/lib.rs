//! World document model for the TEdit world editor.
//!
//! This crate owns everything that describes a world independently of an
//! editing session:
//!
//! - **Tiles and the tile grid** (`tile`, `world`)
//! - **Banded world generation** for brand-new worlds (`generate`)
//! - **The world codec** used to read and write `.wld` files (`codec`)
//! - **Progress values** reported by long-running work (`progress`)
//!
//! # File Format
//!
//! `.wld` files written by [`BinaryWorldCodec`] use a small framed layout:
//!
//! ```text
//! +--------------------+
//! | Magic: "TWLD"      | 4 bytes - file identification
//! +--------------------+
//! | Version: 1         | 4 bytes - u32 little-endian format version
//! +--------------------+
//! | SHA-256 checksum   | 32 bytes - digest of the payload
//! +--------------------+
//! | rkyv Payload       | Variable - archived WorldDocument
//! +--------------------+
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tedit_world::{BinaryWorldCodec, NewWorldSpec, WorldCodec, generate_world};
//!
//! let world = generate_world(&NewWorldSpec::default(), &|_| {})?;
//! BinaryWorldCodec.save(&world, Path::new("demo.wld"), &|_| {})?;
//! let loaded = BinaryWorldCodec.load(Path::new("demo.wld"), &|_| {})?;
//! ```

mod codec;
mod error;
mod generate;
mod progress;
mod tile;
mod world;

pub use codec::{BinaryWorldCodec, CURRENT_FORMAT_VERSION, MAGIC_BYTES, WorldCodec};
pub use error::{CodecError, Result, WorldSpecError};
pub use generate::{NewWorldSpec, band_tile, generate_world};
pub use progress::Progress;
pub use tile::{BrickStyle, LiquidType, Tile, tile_ids, wall_ids};
pub use world::{Npc, TileGrid, TilePoint, WorldDocument};
