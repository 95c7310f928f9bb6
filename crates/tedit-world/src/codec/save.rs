//! World saving.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::hash::payload_digest;
use super::{CURRENT_FORMAT_VERSION, HEADER_LEN, MAGIC_BYTES};
use crate::error::{CodecError, Result};
use crate::progress::Progress;
use crate::world::WorldDocument;

/// Save a world to a `.wld` file.
///
/// Uses atomic write (temp file + rename) so an interrupted save never
/// leaves a half-written world behind.
pub(crate) fn save_world(
    world: &WorldDocument,
    path: &Path,
    progress: &dyn Fn(Progress),
) -> Result<()> {
    progress(Progress::new(0, "Serializing world..."));
    let bytes = serialize_world(world)?;

    let temp_path = staging_path(path);

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| CodecError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    progress(Progress::new(50, "Writing world file..."));
    let mut file = File::create(&temp_path).map_err(|e| CodecError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(&bytes).map_err(|e| CodecError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| CodecError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| CodecError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    progress(Progress::new(100, "World saved."));
    tracing::info!("Saved world '{}' to {}", world.title, path.display());
    Ok(())
}

/// Sibling the world is written to before the rename: the full file name
/// with `.tmp` appended, so `castle.autosave` stages as `castle.autosave.tmp`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize a world to bytes.
///
/// Format:
/// - 4 bytes: Magic ("TWLD")
/// - 4 bytes: Format version (u32 little-endian)
/// - 32 bytes: SHA-256 of the payload
/// - N bytes: rkyv payload
fn serialize_world(world: &WorldDocument) -> Result<Vec<u8>> {
    let payload = rkyv::to_bytes::<rkyv::rancor::Error>(world).map_err(|e| {
        CodecError::Serialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv serialization failed: {e}"
            ))),
        }
    })?;

    let mut output = Vec::with_capacity(HEADER_LEN + payload.len());
    output.extend_from_slice(&MAGIC_BYTES);
    output.extend_from_slice(&CURRENT_FORMAT_VERSION.to_le_bytes());
    output.extend_from_slice(&payload_digest(&payload));
    output.extend_from_slice(&payload);

    Ok(output)
}
