//! The world session: New, Open and Save with busy-guarding.
//!
//! [`SessionController`] owns the current world. Long-running work runs on
//! tokio's blocking pool and reports back through a bounded channel as a
//! [`Message`]; the owner of the receiver feeds each message to
//! [`SessionController::update`] on the consumption context, which is the only
//! place the world is ever replaced.
//!
//! ```text
//! new_world / open_world / save_world
//!        │  (guard: Idle → Busy)
//!        ▼
//! spawn_blocking ──progress──▶ ProgressPublisher
//!        │
//!        ▼  Message
//! mpsc channel ──▶ update() ──▶ install world, render, Busy → Idle
//! ```
//!
//! A request made while busy is dropped with
//! [`SessionError::OperationInProgress`]; nothing is queued.

mod message;
mod state;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tedit_world::{NewWorldSpec, Progress, WorldCodec, WorldDocument, generate_world};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

pub use message::{Completion, Message, SavePurpose, SaveRequest};
pub use state::{DirtyTracker, OperationKind, SessionPhase, SessionState};

use crate::error::{Result, SessionError};
use crate::progress::ProgressPublisher;
use crate::render::{HistoryEvent, Renderer};

/// Version shown in the window title.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct SessionController<R: Renderer> {
    codec: Arc<dyn WorldCodec>,
    renderer: R,
    runtime: Handle,
    sender: mpsc::Sender<Message>,
    progress: ProgressPublisher,
    state: SessionState,
    world: Option<Arc<WorldDocument>>,
    pixel_map: Option<R::PixelMap>,
    minimap: Option<R::Minimap>,
    points: Vec<String>,
    selected_point: Option<String>,
}

impl<R: Renderer> SessionController<R> {
    /// Create an idle session with no world.
    ///
    /// Workers are spawned on `runtime`; their results are sent on `sender`.
    pub fn new(
        codec: Arc<dyn WorldCodec>,
        renderer: R,
        runtime: Handle,
        sender: mpsc::Sender<Message>,
        progress: ProgressPublisher,
    ) -> Self {
        Self {
            codec,
            renderer,
            runtime,
            sender,
            progress,
            state: SessionState::default(),
            world: None,
            pixel_map: None,
            minimap: None,
            points: Vec::new(),
            selected_point: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.state.current_file()
    }

    pub fn world(&self) -> Option<&WorldDocument> {
        self.world.as_deref()
    }

    /// Mutable access to the world, copying it first if a save still holds
    /// the previous snapshot.
    pub fn world_mut(&mut self) -> Option<&mut WorldDocument> {
        self.world.as_mut().map(Arc::make_mut)
    }

    pub(crate) fn world_handle_mut(&mut self) -> Option<&mut Arc<WorldDocument>> {
        self.world.as_mut()
    }

    pub fn pixel_map(&self) -> Option<&R::PixelMap> {
        self.pixel_map.as_ref()
    }

    pub fn minimap(&self) -> Option<&R::Minimap> {
        self.minimap.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn progress(&self) -> &ProgressPublisher {
        &self.progress
    }

    /// Named map locations: `Spawn`, `Dungeon`, then one per NPC.
    pub fn points(&self) -> &[String] {
        &self.points
    }

    pub fn selected_point(&self) -> Option<&str> {
        self.selected_point.as_deref()
    }

    /// Select one of [`points`](Self::points). Unknown names are ignored.
    pub fn select_point(&mut self, name: &str) -> bool {
        if self.points.iter().any(|p| p == name) {
            self.selected_point = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Record an edit to the world.
    pub fn mark_dirty(&mut self) {
        if self.world.is_some() {
            self.state.tracker.mark_dirty();
        }
    }

    /// `TEdit v<version> <file name>`, with ` *` while there are unsaved edits.
    pub fn window_title(&self) -> String {
        let mut title = format!("TEdit v{VERSION}");
        if let Some(name) = self
            .state
            .current_file()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
        {
            title.push(' ');
            title.push_str(name);
        }
        if self.is_dirty() {
            title.push_str(" *");
        }
        title
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Generate a new world in the background.
    ///
    /// The current world stays in place until the new one is installed.
    pub fn new_world(&mut self, spec: NewWorldSpec) -> Result<()> {
        self.guard()?;
        spec.validate()?;

        tracing::info!(
            "Generating world '{}' ({}x{})",
            spec.title,
            spec.width,
            spec.height
        );
        self.state.phase = SessionPhase::Busy(OperationKind::Generating);

        let progress = self.progress.clone();
        let started = Instant::now();
        self.spawn_worker(OperationKind::Generating, None, SavePurpose::User, move || {
            let result = generate_world(&spec, &|p| progress.publish(p))
                .map(Box::new)
                .map_err(SessionError::from);
            Message::WorldGenerated { started, result }
        });
        Ok(())
    }

    /// Load the world at `path` in the background.
    ///
    /// The current world is released immediately; on failure the session is
    /// left without a world.
    pub fn open_world(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.guard()?;
        let path = path.into();

        tracing::info!("Opening world {}", path.display());
        self.clear_world();
        self.state.phase = SessionPhase::Busy(OperationKind::Loading);

        let codec = Arc::clone(&self.codec);
        let progress = self.progress.clone();
        let started = Instant::now();
        let worker_path = path.clone();
        self.spawn_worker(
            OperationKind::Loading,
            Some(path),
            SavePurpose::User,
            move || {
                let result = codec
                    .load(&worker_path, &|p| progress.publish(p))
                    .map(Box::new)
                    .map_err(SessionError::from);
                Message::WorldLoaded {
                    path: worker_path,
                    started,
                    result,
                }
            },
        );
        Ok(())
    }

    /// Write the world in the background.
    ///
    /// Checks, in order: busy, a world is loaded, a destination is known,
    /// and (unless overwriting) the file on disk is not newer than the
    /// world's last save.
    pub fn save_world(&mut self, request: SaveRequest) -> Result<()> {
        self.guard()?;
        let Some(world) = &self.world else {
            return Err(SessionError::NoWorld);
        };
        let path = request
            .destination
            .or_else(|| self.state.current_file.clone())
            .ok_or(SessionError::NoDestination)?;

        if !request.overwrite {
            check_stale(world, &path)?;
        }

        let snapshot = Arc::clone(world);
        let purpose = request.purpose;
        self.state.phase = SessionPhase::Busy(OperationKind::Saving);
        if purpose == SavePurpose::User {
            self.state.tracker.start_save();
        }

        match purpose {
            SavePurpose::User => tracing::info!("Saving world to {}", path.display()),
            SavePurpose::Autosave => tracing::debug!("Autosaving world to {}", path.display()),
        }

        let codec = Arc::clone(&self.codec);
        let progress = self.progress.clone();
        let worker_path = path.clone();
        self.spawn_worker(OperationKind::Saving, Some(path), purpose, move || {
            let result = codec
                .save(&snapshot, &worker_path, &|p| progress.publish(p))
                .map(|()| modified_time(&worker_path).unwrap_or_else(Utc::now))
                .map_err(SessionError::from);
            Message::WorldSaved {
                path: worker_path,
                purpose,
                result,
            }
        });
        Ok(())
    }

    /// Apply a worker result. Must be called on the consumption context.
    ///
    /// Returns `None` for messages the session does not handle
    /// ([`Message::AutoSaveTick`]).
    pub fn update(&mut self, message: Message) -> Option<Completion> {
        match message {
            Message::WorldGenerated { started, result } => {
                Some(self.finish_install(OperationKind::Generating, None, started, result))
            }
            Message::WorldLoaded {
                path,
                started,
                result,
            } => Some(self.finish_install(OperationKind::Loading, Some(path), started, result)),
            Message::WorldSaved {
                path,
                purpose,
                result,
            } => Some(self.finish_save(path, purpose, result)),
            Message::WorkerFailed {
                operation,
                path,
                purpose,
                reason,
            } => {
                self.state.phase = SessionPhase::Idle;
                if operation == OperationKind::Saving && purpose == SavePurpose::User {
                    self.state.tracker.save_failed();
                }
                tracing::error!("Worker for {} failed: {reason}", operation.label());
                Some(Completion {
                    operation,
                    path,
                    purpose,
                    result: Err(SessionError::WorkerFailed { operation, reason }),
                })
            }
            Message::AutoSaveTick => None,
        }
    }

    /// Hook for the undo manager: refresh the minimap and mark the world
    /// edited.
    pub fn on_history_changed(&mut self, event: HistoryEvent) {
        if let (Some(world), Some(minimap)) = (self.world.as_deref(), self.minimap.as_mut()) {
            self.renderer.update_minimap(world, minimap);
        }
        tracing::trace!("History changed: {event:?}");
        self.mark_dirty();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn guard(&self) -> Result<()> {
        match self.state.phase {
            SessionPhase::Idle => Ok(()),
            SessionPhase::Busy(running) => {
                tracing::warn!("Request dropped: {running} is already in progress");
                Err(SessionError::OperationInProgress { running })
            }
        }
    }

    /// Drop the world and everything derived from it, including the file it
    /// came from and its unsaved-edit state.
    fn clear_world(&mut self) {
        self.world = None;
        self.pixel_map = None;
        self.minimap = None;
        self.points.clear();
        self.selected_point = None;
        self.state.current_file = None;
        self.state.tracker.reset();
    }

    fn finish_install(
        &mut self,
        operation: OperationKind,
        path: Option<PathBuf>,
        started: Instant,
        result: std::result::Result<Box<WorldDocument>, SessionError>,
    ) -> Completion {
        self.state.phase = SessionPhase::Idle;
        let result = match result {
            Ok(world) => {
                self.install_world(*world, path.clone());
                let message = format!(
                    "World loaded in {:.3} seconds.",
                    started.elapsed().as_secs_f64()
                );
                tracing::info!("{message}");
                self.progress.publish(Progress::new(0, message));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed {}: {e}", operation.label());
                Err(e)
            }
        };
        Completion {
            operation,
            path,
            purpose: SavePurpose::User,
            result,
        }
    }

    fn install_world(&mut self, world: WorldDocument, path: Option<PathBuf>) {
        self.pixel_map = Some(self.renderer.render_full_pixel_map(&world));
        self.minimap = Some(self.renderer.render_minimap(&world));
        self.points = seed_points(&world);
        self.selected_point = None;
        self.world = Some(Arc::new(world));
        self.state.current_file = path;
        self.state.tracker.reset();
    }

    fn finish_save(
        &mut self,
        path: PathBuf,
        purpose: SavePurpose,
        result: std::result::Result<DateTime<Utc>, SessionError>,
    ) -> Completion {
        self.state.phase = SessionPhase::Idle;
        let result = match (purpose, result) {
            (SavePurpose::User, Ok(saved_at)) => {
                if let Some(world) = self.world.as_mut() {
                    Arc::make_mut(world).mark_saved_at(saved_at);
                }
                self.state.current_file = Some(path.clone());
                self.state.tracker.save_complete();
                Ok(())
            }
            (SavePurpose::Autosave, Ok(_)) => Ok(()),
            (purpose, Err(e)) => {
                if purpose == SavePurpose::User {
                    self.state.tracker.save_failed();
                    tracing::error!("Failed to save {}: {e}", path.display());
                }
                Err(e)
            }
        };
        Completion {
            operation: OperationKind::Saving,
            path: Some(path),
            purpose,
            result,
        }
    }

    fn spawn_worker<F>(
        &self,
        operation: OperationKind,
        path: Option<PathBuf>,
        purpose: SavePurpose,
        job: F,
    ) where
        F: FnOnce() -> Message + Send + 'static,
    {
        let sender = self.sender.clone();
        let worker = self.runtime.spawn_blocking(job);
        self.runtime.spawn(async move {
            let message = match worker.await {
                Ok(message) => message,
                Err(e) => Message::WorkerFailed {
                    operation,
                    path,
                    purpose,
                    reason: e.to_string(),
                },
            };
            if sender.send(message).await.is_err() {
                tracing::warn!("Session closed before the {operation} result arrived");
            }
        });
    }
}

fn seed_points(world: &WorldDocument) -> Vec<String> {
    ["Spawn", "Dungeon"]
        .into_iter()
        .map(String::from)
        .chain(world.npcs.iter().map(|npc| npc.name.clone()))
        .collect()
}

fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}

/// Refuse to overwrite a file written after the world was last saved.
///
/// A world that was never saved conflicts with any existing file.
fn check_stale(world: &WorldDocument, path: &Path) -> Result<()> {
    let Some(modified_on_disk) = modified_time(path) else {
        return Ok(());
    };
    let last_saved = world.last_saved_at();
    if last_saved.is_none_or(|saved| modified_on_disk > saved) {
        tracing::warn!("Refusing to overwrite {}: newer on disk", path.display());
        return Err(SessionError::StaleFileConflict {
            path: path.to_path_buf(),
            modified_on_disk,
            last_saved,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tedit_world::{Npc, TilePoint};

    #[test]
    fn test_seed_points_order() {
        let mut world = WorldDocument::new("Test", 2, 2);
        world.npcs.push(Npc::new("Guide", TilePoint::new(0, 0)));
        world.npcs.push(Npc::new("Merchant", TilePoint::new(1, 0)));
        assert_eq!(seed_points(&world), ["Spawn", "Dungeon", "Guide", "Merchant"]);
    }

    #[test]
    fn test_stale_check_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let world = WorldDocument::new("Test", 1, 1);
        assert!(check_stale(&world, &dir.path().join("missing.wld")).is_ok());
    }

    #[test]
    fn test_stale_check_never_saved_world() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.wld");
        fs::write(&path, b"x").unwrap();

        let world = WorldDocument::new("Test", 1, 1);
        assert!(matches!(
            check_stale(&world, &path),
            Err(SessionError::StaleFileConflict {
                last_saved: None,
                ..
            })
        ));
    }

    #[test]
    fn test_stale_check_compares_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.wld");
        fs::write(&path, b"x").unwrap();
        let on_disk = modified_time(&path).unwrap();

        let mut world = WorldDocument::new("Test", 1, 1);
        world.mark_saved_at(on_disk);
        assert!(check_stale(&world, &path).is_ok());

        world.mark_saved_at(on_disk - chrono::Duration::seconds(5));
        assert!(check_stale(&world, &path).is_err());
    }
}
