//! Version checking for the TEdit world editor.
//!
//! The release server publishes a single line of text such as `v3.1.204`.
//! [`check_version`] fetches it and compares it against the running build.
//! The check is best-effort: any network or parse failure yields
//! [`VersionStatus::Unknown`] instead of an error.
//!
//! # Example
//!
//! ```ignore
//! use tedit_updater::{UpdateSettings, VersionStatus, check_version};
//!
//! let settings = UpdateSettings::default();
//! match check_version(&settings.url).await {
//!     VersionStatus::UpdateAvailable(v) => println!("TEdit {v} is available"),
//!     VersionStatus::UpToDate => println!("TEdit is up to date."),
//!     VersionStatus::Unknown => println!("Unable to check version."),
//! }
//! ```

mod check;
mod config;
mod error;
mod version;

pub use check::{VersionStatus, check_version, evaluate};
pub use config::{DEFAULT_VERSION_URL, UpdateSettings};
pub use error::{Result, VersionCheckError};
pub use version::Version;

/// Current application version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
