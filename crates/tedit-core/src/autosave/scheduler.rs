//! The autosave ticker and tick handling.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::config::AutosaveSettings;
use crate::render::Renderer;
use crate::session::{Completion, Message, SaveRequest, SessionController};

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveOutcome {
    Disabled,
    /// Another operation was running; the tick was dropped.
    Busy,
    NoWorld,
    Started(PathBuf),
    /// The save could not be started. Already logged.
    Failed,
}

/// Where the autosave for `current_file` is written.
///
/// Uses the file stem of the current file, or `newworld` for a world that
/// was never saved.
pub fn autosave_path(temp_dir: &Path, current_file: Option<&Path>) -> PathBuf {
    let stem = current_file
        .and_then(Path::file_stem)
        .and_then(|s| s.to_str())
        .unwrap_or("newworld");
    temp_dir.join(format!("{stem}.autosave"))
}

pub struct AutosaveScheduler {
    settings: AutosaveSettings,
    temp_dir: PathBuf,
    runtime: Handle,
    sender: mpsc::Sender<Message>,
    ticker: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for AutosaveScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutosaveScheduler")
            .field("settings", &self.settings)
            .field("temp_dir", &self.temp_dir)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl AutosaveScheduler {
    /// Create a stopped scheduler. Ticks are sent on `sender`.
    pub fn new(
        settings: AutosaveSettings,
        temp_dir: impl Into<PathBuf>,
        runtime: Handle,
        sender: mpsc::Sender<Message>,
    ) -> Self {
        Self {
            settings,
            temp_dir: temp_dir.into(),
            runtime,
            sender,
            ticker: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Enable or disable saving on tick. The ticker keeps running so that
    /// re-enabling takes effect on the next tick.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
        tracing::info!(
            "Autosave {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    pub fn interval(&self) -> Duration {
        self.settings.interval()
    }

    pub fn settings(&self) -> &AutosaveSettings {
        &self.settings
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Whether the ticker task is running.
    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start the ticker from zero, replacing any running ticker.
    pub fn restart(&mut self) {
        self.stop();

        let period = self.interval();
        let sender = self.sender.clone();
        self.ticker = Some(self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(Message::AutoSaveTick).await.is_err() {
                    break;
                }
            }
        }));
        tracing::debug!("Autosave ticker started ({}s)", period.as_secs());
    }

    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            tracing::debug!("Autosave ticker stopped");
        }
    }

    /// Handle one tick on the consumption context.
    pub fn on_tick<R: Renderer>(&self, session: &mut SessionController<R>) -> AutosaveOutcome {
        if !self.settings.enabled {
            return AutosaveOutcome::Disabled;
        }
        if session.is_busy() {
            tracing::debug!("Skipping autosave: session is busy");
            return AutosaveOutcome::Busy;
        }
        if session.world().is_none() {
            tracing::debug!("Skipping autosave: no world loaded");
            return AutosaveOutcome::NoWorld;
        }

        let path = autosave_path(&self.temp_dir, session.current_file());
        match session.save_world(SaveRequest::autosave(path.clone())) {
            Ok(()) => AutosaveOutcome::Started(path),
            Err(e) => {
                tracing::error!("Autosave could not start: {e}");
                AutosaveOutcome::Failed
            }
        }
    }

    /// Log the result of an autosave. Failures go no further.
    pub fn on_completion(&self, completion: &Completion) {
        let path = completion
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match &completion.result {
            Ok(()) => tracing::info!("Autosaved world to {path}"),
            Err(e) => tracing::error!("Autosave to {path} failed: {e}"),
        }
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
