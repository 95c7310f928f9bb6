//! Payload checksums.

use sha2::{Digest, Sha256};

/// SHA-256 digest of `payload`.
pub(crate) fn payload_digest(payload: &[u8]) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Sha256::digest(payload));
    digest
}

/// Hex form of a digest, for error reports.
pub(crate) fn digest_hex(digest: &[u8]) -> String {
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_digest() {
        let digest = payload_digest(b"Hello, World!");

        // Known SHA-256 hash for "Hello, World!"
        assert_eq!(
            digest_hex(&digest),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_digest_changes_with_payload() {
        assert_ne!(payload_digest(b"a"), payload_digest(b"b"));
    }
}
