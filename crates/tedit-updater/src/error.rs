//! Error types for the version check.

use thiserror::Error;

/// Errors that can occur while checking for a newer version.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VersionCheckError {
    /// The published version text could not be parsed.
    #[error("invalid version format: {0}")]
    InvalidVersion(String),

    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),
}

impl VersionCheckError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => {
                "Could not reach the update server. Please check your internet connection."
            }
            Self::InvalidVersion(_) => "Unable to check version.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for VersionCheckError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for version-check operations.
pub type Result<T> = std::result::Result<T, VersionCheckError>;
