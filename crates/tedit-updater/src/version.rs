//! Version parsing and comparison.
//!
//! Published versions look like `v3.1.204`; the running build uses the
//! Cargo package version (`3.1.204`).

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VersionCheckError};

/// A `MAJOR.MINOR.BUILD` version.
///
/// Ordering compares major, then minor, then build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl Version {
    #[must_use]
    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
        }
    }

    /// Get the current application version from Cargo.toml.
    #[must_use]
    pub fn current() -> Self {
        Self::from_str(crate::VERSION).unwrap_or_default()
    }

    /// Parse the published version text.
    ///
    /// The text must contain exactly one `v`, followed by the version.
    pub fn from_published(text: &str) -> Result<Self> {
        let mut parts = text.split('v');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(version), None) => Self::from_str(version),
            _ => Err(VersionCheckError::InvalidVersion(text.trim().to_string())),
        }
    }
}

impl FromStr for Version {
    type Err = VersionCheckError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || VersionCheckError::InvalidVersion(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let major = parts[0].parse().map_err(|_| invalid())?;
        let minor = parts[1].parse().map_err(|_| invalid())?;
        let build = parts[2].parse().map_err(|_| invalid())?;

        Ok(Self::new(major, minor, build))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}
