//! Check whether a newer version has been published.

use crate::error::Result;
use crate::version::Version;

/// Outcome of a version check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    UpToDate,
    UpdateAvailable(Version),
    /// The check could not be completed.
    Unknown,
}

impl VersionStatus {
    /// Message suitable for display to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UpToDate => "TEdit is up to date.".to_string(),
            Self::UpdateAvailable(v) => {
                format!("You are using an outdated version of TEdit. Version {v} is available.")
            }
            Self::Unknown => "Unable to check version.".to_string(),
        }
    }
}

/// Compare published version text against `current`.
pub fn evaluate(published: &str, current: &Version) -> Result<VersionStatus> {
    let latest = Version::from_published(published)?;
    if latest > *current {
        Ok(VersionStatus::UpdateAvailable(latest))
    } else {
        Ok(VersionStatus::UpToDate)
    }
}

/// Fetch the published version from `url` and compare it with this build.
///
/// Never fails: network and parse errors are logged and reported as
/// [`VersionStatus::Unknown`].
pub async fn check_version(url: &str) -> VersionStatus {
    tracing::info!("Checking for updates (current version: {})", crate::VERSION);

    let result = match fetch_published(url).await {
        Ok(text) => evaluate(&text, &Version::current()),
        Err(e) => Err(e),
    };

    match result {
        Ok(status) => {
            tracing::info!("Version check result: {status:?}");
            status
        }
        Err(e) => {
            tracing::warn!("Version check failed: {e}");
            VersionStatus::Unknown
        }
    }
}

async fn fetch_published(url: &str) -> Result<String> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.text().await?)
}
