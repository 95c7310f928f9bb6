//! Session phase and unsaved-change tracking.

use std::fmt;
use std::path::{Path, PathBuf};

/// The long-running operation currently holding the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Generating,
    Loading,
    Saving,
}

impl OperationKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Generating => "generating the world",
            Self::Loading => "loading the world",
            Self::Saving => "saving the world",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Generating => "generating",
            Self::Loading => "loading",
            Self::Saving => "saving",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Busy(OperationKind),
}

/// Tracks unsaved edits.
///
/// Every edit bumps a revision counter. A save remembers the revision it
/// captured, so edits made while the save runs keep the world dirty.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty: bool,
    revision: u64,
    saving_revision: Option<u64>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving_revision.is_some()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    /// Mark that a save of the current revision has started.
    pub fn start_save(&mut self) {
        self.saving_revision = Some(self.revision);
    }

    /// Mark that the save has completed successfully.
    pub fn save_complete(&mut self) {
        if let Some(saved) = self.saving_revision.take() {
            self.dirty = self.revision != saved;
        }
    }

    /// Mark that the save has failed. The world stays dirty.
    pub fn save_failed(&mut self) {
        self.saving_revision = None;
    }

    /// Forget all edits, e.g. after a new world was installed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State of the editing session as seen by the consumption context.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub(crate) current_file: Option<PathBuf>,
    pub(crate) phase: SessionPhase,
    pub(crate) tracker: DirtyTracker,
}

impl SessionState {
    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SessionPhase::Busy(_))
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }
}
