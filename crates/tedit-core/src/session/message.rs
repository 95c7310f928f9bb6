//! Messages from background workers to the consumption context.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tedit_world::WorldDocument;

use super::state::OperationKind;
use crate::error::SessionError;

/// Why a save was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SavePurpose {
    /// Explicit save. Updates the current file and clears the dirty flag.
    User,
    /// Background autosave to the temp directory. Leaves session state alone.
    Autosave,
}

/// Parameters for [`SessionController::save_world`](super::SessionController::save_world).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub(crate) destination: Option<PathBuf>,
    pub(crate) overwrite: bool,
    pub(crate) purpose: SavePurpose,
}

impl SaveRequest {
    /// Save to the file the world was opened from or last saved to.
    pub fn to_current_file() -> Self {
        Self {
            destination: None,
            overwrite: false,
            purpose: SavePurpose::User,
        }
    }

    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Some(path.into()),
            ..Self::to_current_file()
        }
    }

    /// Autosave to `path`. Never blocked by a stale-file check.
    pub fn autosave(path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Some(path.into()),
            overwrite: true,
            purpose: SavePurpose::Autosave,
        }
    }

    /// Write even if the file on disk is newer than the last save.
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn purpose(&self) -> SavePurpose {
        self.purpose
    }
}

/// Sent through the session's completion channel.
#[derive(Debug)]
pub enum Message {
    WorldGenerated {
        started: Instant,
        result: Result<Box<WorldDocument>, SessionError>,
    },
    WorldLoaded {
        path: PathBuf,
        started: Instant,
        result: Result<Box<WorldDocument>, SessionError>,
    },
    /// On success carries the modification time of the written file.
    WorldSaved {
        path: PathBuf,
        purpose: SavePurpose,
        result: Result<DateTime<Utc>, SessionError>,
    },
    /// The worker panicked before producing a result.
    WorkerFailed {
        operation: OperationKind,
        path: Option<PathBuf>,
        purpose: SavePurpose,
        reason: String,
    },
    AutoSaveTick,
}

/// The outcome of a finished New/Open/Save, handed to the caller of
/// [`SessionController::update`](super::SessionController::update).
#[derive(Debug)]
pub struct Completion {
    pub operation: OperationKind,
    pub path: Option<PathBuf>,
    pub purpose: SavePurpose,
    pub result: Result<(), SessionError>,
}

impl Completion {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_autosave(&self) -> bool {
        self.purpose == SavePurpose::Autosave
    }
}
