//! The editor: the single consumption context.
//!
//! [`Editor`] owns the session, the autosave scheduler, the tool dispatcher,
//! the paint settings and the clipboard, plus the receiving end of the
//! completion channel. All world mutation happens through `&mut Editor`, so
//! worker results and pointer edits can never interleave.

use std::path::PathBuf;
use std::sync::Arc;

use tedit_world::{NewWorldSpec, Progress, WorldCodec};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

use crate::autosave::{AutosaveOutcome, AutosaveScheduler};
use crate::clipboard::TileClipboard;
use crate::dispatcher::{Activation, ToolDispatcher};
use crate::error::Result;
use crate::mouse::PointerEvent;
use crate::paint::{Modifiers, PaintSettings};
use crate::progress::ProgressPublisher;
use crate::render::{HistoryEvent, Renderer};
use crate::session::{Completion, Message, OperationKind, SaveRequest, SessionController};
use crate::settings::EditorSettings;
use crate::tools::{ToolId, ToolRegistry};

pub struct Editor<R: Renderer> {
    session: SessionController<R>,
    autosave: AutosaveScheduler,
    tools: ToolDispatcher,
    paint: PaintSettings,
    clipboard: TileClipboard,
    receiver: mpsc::Receiver<Message>,
}

impl<R: Renderer> Editor<R> {
    /// Build an editor with the bundled tools.
    ///
    /// `runtime` runs the background workers and the autosave ticker.
    pub fn new(
        settings: &EditorSettings,
        codec: Arc<dyn WorldCodec>,
        renderer: R,
        runtime: Handle,
    ) -> Self {
        Self::with_tools(
            settings,
            codec,
            renderer,
            runtime,
            ToolRegistry::with_builtin_tools(),
        )
    }

    pub fn with_tools(
        settings: &EditorSettings,
        codec: Arc<dyn WorldCodec>,
        renderer: R,
        runtime: Handle,
        registry: ToolRegistry,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(settings.channel_capacity());
        let autosave = AutosaveScheduler::new(
            settings.autosave.clone(),
            settings.temp_dir(),
            runtime.clone(),
            sender.clone(),
        );
        let session = SessionController::new(
            codec,
            renderer,
            runtime,
            sender,
            ProgressPublisher::new(),
        );

        Self {
            session,
            autosave,
            tools: ToolDispatcher::new(registry),
            paint: PaintSettings::new(&settings.paint),
            clipboard: TileClipboard::new(),
            receiver,
        }
    }

    // =========================================================================
    // Components
    // =========================================================================

    pub fn session(&self) -> &SessionController<R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionController<R> {
        &mut self.session
    }

    pub fn autosave(&self) -> &AutosaveScheduler {
        &self.autosave
    }

    pub fn autosave_mut(&mut self) -> &mut AutosaveScheduler {
        &mut self.autosave
    }

    pub fn tools(&self) -> &ToolDispatcher {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolDispatcher {
        &mut self.tools
    }

    pub fn paint(&self) -> &PaintSettings {
        &self.paint
    }

    pub fn clipboard(&self) -> &TileClipboard {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut TileClipboard {
        &mut self.clipboard
    }

    /// Observe progress of background work.
    pub fn subscribe_progress(&self) -> watch::Receiver<Progress> {
        self.session.progress().subscribe()
    }

    // =========================================================================
    // Session operations
    // =========================================================================

    /// Start generating a new world. Autosave pauses until the operation
    /// finishes, and resumes for whichever world is left loaded.
    pub fn new_world(&mut self, spec: NewWorldSpec) -> Result<()> {
        self.session.new_world(spec)?;
        self.autosave.stop();
        Ok(())
    }

    /// Start loading a world. Autosave pauses until it is installed.
    pub fn open_world(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.session.open_world(path)?;
        self.autosave.stop();
        Ok(())
    }

    /// Start saving to `path`, or to the current file when `None`.
    pub fn save_world(&mut self, path: Option<PathBuf>, overwrite: bool) -> Result<()> {
        let request = match path {
            Some(path) => SaveRequest::to_path(path),
            None => SaveRequest::to_current_file(),
        };
        self.session.save_world(request.overwrite(overwrite))
    }

    // =========================================================================
    // Event loop
    // =========================================================================

    /// Apply one message.
    ///
    /// Returns the completion of a user-visible operation. Ticks and
    /// autosave completions are handled here and yield `None`.
    pub fn handle_message(&mut self, message: Message) -> Option<Completion> {
        if matches!(message, Message::AutoSaveTick) {
            self.tick_autosave();
            return None;
        }

        let completion = self.session.update(message)?;
        if completion.is_autosave() {
            self.autosave.on_completion(&completion);
            return None;
        }

        if matches!(
            completion.operation,
            OperationKind::Generating | OperationKind::Loading
        ) {
            if completion.is_ok() {
                self.tools.raise_preview_changed();
                self.autosave.restart();
            } else if self.session.world().is_some() {
                // a failed New keeps the previous world, which still needs autosaving
                self.autosave.restart();
            }
        }
        Some(completion)
    }

    /// Run one autosave tick now.
    pub fn tick_autosave(&mut self) -> AutosaveOutcome {
        let outcome = self.autosave.on_tick(&mut self.session);
        if let AutosaveOutcome::Started(path) = &outcome {
            tracing::debug!("Autosave started: {}", path.display());
        }
        outcome
    }

    /// Drain every message that is already waiting, without blocking.
    pub fn pump(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            completions.extend(self.handle_message(message));
        }
        completions
    }

    /// Wait for the next user-visible completion, handling ticks and
    /// autosaves along the way.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        while let Some(message) = self.receiver.recv().await {
            if let Some(completion) = self.handle_message(message) {
                return Some(completion);
            }
        }
        None
    }

    // =========================================================================
    // Tools and paint
    // =========================================================================

    pub fn set_active_tool(&mut self, id: ToolId) -> Activation {
        self.tools.set_active_tool(id, &self.clipboard)
    }

    /// Activate a tool by name. `None` if no such tool exists.
    pub fn set_active_tool_by_name(&mut self, name: &str) -> Option<Activation> {
        let id = self.tools.find_tool(name)?;
        Some(self.set_active_tool(id))
    }

    pub fn mouse_down(&mut self, event: PointerEvent) -> bool {
        let Some(world) = self.session.world_handle_mut() else {
            return false;
        };
        let changed = self
            .tools
            .dispatch_mouse_down(world, &self.paint, &self.clipboard, event);
        self.after_edit(changed)
    }

    pub fn mouse_up(&mut self, event: PointerEvent) -> bool {
        let Some(world) = self.session.world_handle_mut() else {
            return false;
        };
        let changed = self
            .tools
            .dispatch_mouse_up(world, &self.paint, &self.clipboard, event);
        self.after_edit(changed)
    }

    pub fn mouse_move(&mut self, event: PointerEvent) -> bool {
        let Some(world) = self.session.world_handle_mut() else {
            return false;
        };
        let changed = self
            .tools
            .dispatch_mouse_move(world, &self.paint, &self.clipboard, event);
        self.after_edit(changed)
    }

    fn after_edit(&mut self, changed: bool) -> bool {
        if changed {
            self.session.on_history_changed(HistoryEvent::Saved);
        }
        changed
    }

    /// Change paint settings; the tool preview is invalidated if anything
    /// changed.
    pub fn update_paint(&mut self, change: impl FnOnce(&mut PaintSettings)) {
        let before = self.paint.revision();
        change(&mut self.paint);
        if self.paint.revision() != before {
            self.tools.raise_preview_changed();
        }
    }

    /// Swap the paint selection for the current paint mode.
    pub fn swap(&mut self, modifiers: Modifiers) {
        self.update_paint(|paint| paint.swap(modifiers));
    }

    pub fn on_history_changed(&mut self, event: HistoryEvent) {
        self.session.on_history_changed(event);
    }

    pub fn window_title(&self) -> String {
        self.session.window_title()
    }
}
