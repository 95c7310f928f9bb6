//! Periodic autosave to the temp directory.
//!
//! A ticker task sends [`Message::AutoSaveTick`](crate::session::Message)
//! into the session channel. The tick is handled on the consumption context
//! by [`AutosaveScheduler::on_tick`], which saves a snapshot of the world to
//! `<temp dir>/<file stem>.autosave`, or skips the tick when autosave is
//! disabled, the session is busy or there is no world.
//!
//! Autosave never touches the session's current file or dirty flag, and its
//! failures are logged rather than reported.

mod config;
mod scheduler;

pub use config::AutosaveSettings;
pub use scheduler::{AutosaveOutcome, AutosaveScheduler, autosave_path};
