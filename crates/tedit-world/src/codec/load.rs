//! World loading.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rkyv::util::AlignedVec;

use super::hash::{digest_hex, payload_digest};
use super::{CURRENT_FORMAT_VERSION, HEADER_LEN, MAGIC_BYTES};
use crate::error::{CodecError, Result};
use crate::progress::Progress;
use crate::world::WorldDocument;

/// Load a world from a `.wld` file.
///
/// The returned document's last-saved timestamp is the file's modification
/// time, so later stale-file checks compare against the same clock.
pub(crate) fn load_world(path: &Path, progress: &dyn Fn(Progress)) -> Result<WorldDocument> {
    progress(Progress::new(0, "Reading world file..."));
    let bytes = fs::read(path).map_err(|e| CodecError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| CodecError::Io {
            operation: "inspect",
            path: path.to_path_buf(),
            source: e,
        })?;

    progress(Progress::new(30, "Verifying world file..."));
    let mut world = parse_world_bytes(&bytes, path, progress)?;
    world.mark_saved_at(DateTime::<Utc>::from(modified));

    progress(Progress::new(100, "World loaded."));
    tracing::info!("Loaded world '{}' from {}", world.title, path.display());
    Ok(world)
}

/// Validate the header and decode the payload.
fn parse_world_bytes(
    bytes: &[u8],
    path: &Path,
    progress: &dyn Fn(Progress),
) -> Result<WorldDocument> {
    if bytes.len() <= HEADER_LEN {
        return Err(CodecError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "File too small".to_string(),
        });
    }

    if bytes[0..4] != MAGIC_BYTES {
        return Err(CodecError::InvalidFormat {
            path: path.to_path_buf(),
            reason: "Not a world file (invalid magic bytes)".to_string(),
        });
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version > CURRENT_FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_FORMAT_VERSION,
            path: path.to_path_buf(),
        });
    }

    let expected = &bytes[8..HEADER_LEN];
    let payload = &bytes[HEADER_LEN..];
    let actual = payload_digest(payload);
    if expected != actual.as_slice() {
        return Err(CodecError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: digest_hex(expected),
            actual: digest_hex(&actual),
        });
    }

    progress(Progress::new(60, "Decoding world..."));

    // rkyv needs the archive at its natural alignment
    let mut aligned: AlignedVec = AlignedVec::with_capacity(payload.len());
    aligned.extend_from_slice(payload);

    rkyv::from_bytes::<WorldDocument, rkyv::rancor::Error>(&aligned).map_err(|e| {
        CodecError::Deserialization {
            source: Box::new(std::io::Error::other(format!(
                "rkyv deserialization failed: {e}"
            ))),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::save::save_world;
    use crate::tile::Tile;
    use crate::world::{Npc, TilePoint};
    use tempfile::tempdir;

    #[test]
    fn test_load_world_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.wld");

        let mut world = WorldDocument::new("Round Trip", 6, 4);
        world.tiles.set(TilePoint::new(2, 3), Tile::solid(7, 1));
        world.npcs.push(Npc::new("Guide", TilePoint::new(3, 1)));
        save_world(&world, &path, &|_| {}).unwrap();

        let loaded = load_world(&path, &|_| {}).unwrap();
        assert_eq!(loaded.title, "Round Trip");
        assert_eq!(loaded.tiles, world.tiles);
        assert_eq!(loaded.npcs, world.npcs);

        let modified: DateTime<Utc> = fs::metadata(&path).unwrap().modified().unwrap().into();
        assert_eq!(loaded.last_saved_at(), Some(modified));
    }

    #[test]
    fn test_load_invalid_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.wld");

        fs::write(&path, [b'X'; 64]).unwrap();

        let result = load_world(&path, &|_| {});
        assert!(matches!(result, Err(CodecError::InvalidFormat { .. })));
    }

    #[test]
    fn test_load_unsupported_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.wld");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC_BYTES);
        bytes.extend_from_slice(&999u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 100]);
        fs::write(&path, bytes).unwrap();

        let result = load_world(&path, &|_| {});
        assert!(matches!(
            result,
            Err(CodecError::UnsupportedVersion { found: 999, .. })
        ));
    }

    #[test]
    fn test_load_corrupted_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.wld");

        save_world(&WorldDocument::new("Test", 4, 4), &path, &|_| {}).unwrap();
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        let result = load_world(&path, &|_| {});
        assert!(matches!(result, Err(CodecError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_world(&dir.path().join("missing.wld"), &|_| {});
        assert!(matches!(
            result,
            Err(CodecError::Io {
                operation: "read",
                ..
            })
        ));
    }
}
