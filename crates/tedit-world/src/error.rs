//! World codec and generation error types.
//!
//! Codec operations return structured errors that provide user-friendly
//! messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// World codec error.
#[derive(Debug, Error)]
pub enum CodecError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not a world file.
    #[error("Invalid world file format")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Written by a newer editor.
    #[error("World file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Payload does not match the checksum stored in the header.
    #[error("World file checksum mismatch: {path}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Serialization error.
    #[error("Failed to serialize world data")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deserialization error.
    #[error("Failed to deserialize world data")]
    Deserialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Temp file couldn't be renamed over the target.
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a valid world file: {}",
                    path.display(),
                    reason
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This world was saved by a newer version of TEdit \
                    (file version {}, your version supports up to {}). \
                    Please update the application.",
                    found, max_supported
                )
            }
            Self::ChecksumMismatch { path, .. } => {
                format!(
                    "The world file '{}' is damaged and could not be read.",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown")
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the world data.".to_string()
            }
            Self::Deserialization { .. } => {
                "An error occurred while reading the world data. The file may be corrupted."
                    .to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } => Some("Make sure you selected a .wld world file.".into()),
            Self::UnsupportedVersion { .. } => {
                Some("Download the latest version of TEdit.".into())
            }
            Self::ChecksumMismatch { .. } | Self::Deserialization { .. } => {
                Some("Try opening an autosave or a backup of this world.".into())
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Rejected world generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldSpecError {
    #[error("world dimensions must be non-zero (got {width}x{height})")]
    ZeroSize { width: u32, height: u32 },

    #[error("ground level {ground_level} lies outside a world {height} tiles high")]
    GroundOutOfBounds { ground_level: u32, height: u32 },

    #[error("rock level {rock_level} must not be above ground level {ground_level}")]
    RockAboveGround { rock_level: u32, ground_level: u32 },
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
