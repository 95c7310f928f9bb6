//! Reading and writing world files.
//!
//! The session core only depends on the [`WorldCodec`] trait; the bundled
//! [`BinaryWorldCodec`] implements it with atomic writes and a payload
//! checksum.

mod hash;
mod load;
mod save;

use std::path::Path;

use crate::error::Result;
use crate::progress::Progress;
use crate::world::WorldDocument;

/// Current world file format version.
///
/// The loader rejects files with version > CURRENT_FORMAT_VERSION.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Magic bytes at the start of world files.
pub const MAGIC_BYTES: [u8; 4] = *b"TWLD";

/// Header length: magic + version + SHA-256 digest.
const HEADER_LEN: usize = 4 + 4 + 32;

/// Parses and serializes world documents.
///
/// Implementations run on background workers, so they must be shareable
/// across threads. `progress` may be called any number of times.
pub trait WorldCodec: Send + Sync {
    /// Read the world stored at `path`.
    fn load(&self, path: &Path, progress: &dyn Fn(Progress)) -> Result<WorldDocument>;

    /// Write `world` to `path`, replacing any existing file.
    fn save(&self, world: &WorldDocument, path: &Path, progress: &dyn Fn(Progress)) -> Result<()>;
}

/// The native `.wld` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryWorldCodec;

impl WorldCodec for BinaryWorldCodec {
    fn load(&self, path: &Path, progress: &dyn Fn(Progress)) -> Result<WorldDocument> {
        load::load_world(path, progress)
    }

    fn save(&self, world: &WorldDocument, path: &Path, progress: &dyn Fn(Progress)) -> Result<()> {
        save::save_world(world, path, progress)
    }
}
