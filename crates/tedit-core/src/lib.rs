//! Session core for the TEdit world editor.
//!
//! This crate coordinates everything that happens to an open world:
//!
//! - **Session lifecycle** (`session`): New/Open/Save on background workers,
//!   busy-guarding, and the completion channel that hands results back
//! - **Autosave** (`autosave`): a periodic ticker that saves a snapshot to the
//!   temp directory and never runs while another operation is in flight
//! - **Tools** (`tools`, `dispatcher`, `mouse`): pointer events routed to the
//!   active tool, with the tile under the pointer tracked
//! - **Paint settings** (`paint`): what the tools paint, with deterministic
//!   swap operations
//! - **Progress** (`progress`): a single-slot progress value for observers
//!
//! [`Editor`] bundles these and is the one place worker results are applied.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tedit_core::{Editor, EditorSettings, NullRenderer};
//! use tedit_world::{BinaryWorldCodec, NewWorldSpec};
//!
//! let mut editor = Editor::new(
//!     &EditorSettings::load(),
//!     Arc::new(BinaryWorldCodec),
//!     NullRenderer,
//!     tokio::runtime::Handle::current(),
//! );
//! editor.new_world(NewWorldSpec::default())?;
//! let completion = editor.next_completion().await;
//! ```

pub mod autosave;
pub mod clipboard;
pub mod dispatcher;
pub mod editor;
pub mod error;
pub mod mouse;
pub mod observer;
pub mod paint;
pub mod progress;
pub mod render;
pub mod session;
pub mod settings;
pub mod tools;

pub use autosave::{AutosaveOutcome, AutosaveScheduler, AutosaveSettings, autosave_path};
pub use clipboard::{Clipboard, TileBuffer, TileClipboard};
pub use dispatcher::{Activation, PreviewChanged, ToolDispatcher};
pub use editor::Editor;
pub use error::{Result, SessionError};
pub use mouse::{MouseButtons, MouseTileState, PointerEvent};
pub use observer::{Observers, SubscriberId};
pub use paint::{MaskMode, Modifiers, PaintChange, PaintDefaults, PaintMode, PaintSettings};
pub use progress::ProgressPublisher;
pub use render::{HistoryEvent, NullRenderer, Renderer};
pub use session::{
    Completion, Message, OperationKind, SavePurpose, SaveRequest, SessionController, SessionPhase,
    SessionState,
};
pub use settings::{EditorSettings, SettingsError};
pub use tools::{ArrowTool, PasteTool, PencilTool, Tool, ToolContext, ToolId, ToolRegistry};
