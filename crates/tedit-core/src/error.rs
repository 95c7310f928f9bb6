//! Session error types.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tedit_world::{CodecError, WorldSpecError};
use thiserror::Error;

use crate::session::OperationKind;

/// Errors reported by the session controller.
///
/// Rejections (`OperationInProgress`, `NoWorld`, `NoDestination`,
/// `StaleFileConflict`, `InvalidWorldSpec`) are returned synchronously and
/// leave the session untouched. The rest arrive with a completion.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Another operation holds the session. The request was dropped.
    #[error("{running} is already in progress")]
    OperationInProgress { running: OperationKind },

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The file on disk was written after this world was last saved.
    #[error("{path} was modified on disk after the world was last saved")]
    StaleFileConflict {
        path: PathBuf,
        modified_on_disk: DateTime<Utc>,
        last_saved: Option<DateTime<Utc>>,
    },

    #[error("no save destination was given and the world has never been saved")]
    NoDestination,

    #[error("no world is loaded")]
    NoWorld,

    #[error("invalid world parameters: {0}")]
    InvalidWorldSpec(#[from] WorldSpecError),

    /// The background worker panicked or was cancelled.
    #[error("{operation} worker failed: {reason}")]
    WorkerFailed {
        operation: OperationKind,
        reason: String,
    },
}

impl SessionError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::OperationInProgress { running } => {
                format!("Please wait, {} is still in progress.", running.label())
            }
            Self::Codec(e) => e.user_message(),
            Self::StaleFileConflict { path, .. } => format!(
                "{} has been changed by another program since you last saved. \
                Saving now would overwrite those changes.",
                path.display()
            ),
            Self::NoDestination => "Choose where to save this world.".to_string(),
            Self::NoWorld => "There is no world to save.".to_string(),
            Self::InvalidWorldSpec(e) => format!("The new world settings are invalid: {e}."),
            Self::WorkerFailed { operation, .. } => {
                format!("An unexpected error occurred while {}.", operation.label())
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Codec(e) => e.suggestion(),
            Self::StaleFileConflict { .. } => {
                Some("Save to a different file, or overwrite if you are sure.".into())
            }
            _ => None,
        }
    }

    /// Whether the request was rejected before any work started.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::OperationInProgress { .. }
                | Self::StaleFileConflict { .. }
                | Self::NoDestination
                | Self::NoWorld
                | Self::InvalidWorldSpec(_)
        )
    }
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_message() {
        let err = SessionError::OperationInProgress {
            running: OperationKind::Saving,
        };
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "saving is already in progress");
    }

    #[test]
    fn test_codec_errors_keep_suggestions() {
        let err = SessionError::from(CodecError::InvalidFormat {
            path: PathBuf::from("x.wld"),
            reason: "bad".into(),
        });
        assert!(!err.is_rejection());
        assert!(err.suggestion().is_some());
    }
}
