//! Drive editor operations to completion for one command.
//!
//! The command line has no event loop of its own. A [`Workflow`] starts an
//! operation on the editor and then waits on the completion channel, showing
//! progress while the worker runs.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use tedit_core::{Editor, EditorSettings, NullRenderer, PointerEvent};
use tedit_world::{BinaryWorldCodec, NewWorldSpec, Progress, TilePoint};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub struct Workflow {
    editor: Editor<NullRenderer>,
    show_progress: bool,
}

impl Workflow {
    /// Build an editor on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new(settings: &EditorSettings, show_progress: bool) -> Self {
        let editor = Editor::new(
            settings,
            Arc::new(BinaryWorldCodec),
            NullRenderer,
            tokio::runtime::Handle::current(),
        );
        Self {
            editor,
            show_progress,
        }
    }

    pub fn editor(&self) -> &Editor<NullRenderer> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor<NullRenderer> {
        &mut self.editor
    }

    pub async fn generate(&mut self, spec: NewWorldSpec) -> Result<()> {
        let title = spec.title.clone();
        self.editor.new_world(spec)?;
        self.wait().await.context("generate world")?;
        info!("Generated world '{title}'");
        Ok(())
    }

    pub async fn open(&mut self, path: &Path) -> Result<()> {
        self.editor.open_world(path)?;
        self.wait()
            .await
            .with_context(|| format!("open {}", path.display()))?;
        Ok(())
    }

    /// Save to `path`, or back to the current file. Returns where the world
    /// was written.
    pub async fn save(&mut self, path: Option<PathBuf>, overwrite: bool) -> Result<PathBuf> {
        self.editor.save_world(path, overwrite)?;
        self.wait()
            .await
            .context("save world")?
            .ok_or_else(|| anyhow!("save completed without a destination"))
    }

    /// Click the pencil at each point. Returns how many clicks changed the
    /// world.
    pub fn pencil(&mut self, points: &[TilePoint]) -> Result<usize> {
        if self.editor.set_active_tool_by_name("Pencil").is_none() {
            return Err(anyhow!("the pencil tool is not available"));
        }
        let mut changed = 0;
        for &point in points {
            if self.editor.mouse_down(PointerEvent::left_at(point.x, point.y)) {
                changed += 1;
            } else {
                debug!("Nothing painted at ({}, {})", point.x, point.y);
            }
            self.editor.mouse_up(PointerEvent::at(point.x, point.y));
        }
        Ok(changed)
    }

    /// Wait for the running operation. Returns the file it touched, if any.
    async fn wait(&mut self) -> Result<Option<PathBuf>> {
        let progress = self
            .show_progress
            .then(|| spawn_progress_bar(self.editor.subscribe_progress()));

        let completion = self.editor.next_completion().await;

        if let Some((bar, relay)) = progress {
            relay.abort();
            bar.finish_and_clear();
        }

        let completion = completion.ok_or_else(|| anyhow!("editor stopped before finishing"))?;
        completion.result?;
        Ok(completion.path)
    }
}

fn spawn_progress_bar(mut receiver: watch::Receiver<Progress>) -> (ProgressBar, JoinHandle<()>) {
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos:>3}% {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.enable_steady_tick(Duration::from_millis(120));

    let sink = bar.clone();
    let relay = tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            let progress = receiver.borrow_and_update().clone();
            sink.set_position(u64::from(progress.percent));
            sink.set_message(progress.message);
        }
    });
    (bar, relay)
}
