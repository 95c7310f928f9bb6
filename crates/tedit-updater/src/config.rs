//! Configuration types for the version check.

use serde::{Deserialize, Serialize};

/// Where the release server publishes the latest version string.
pub const DEFAULT_VERSION_URL: &str = "http://www.binaryconstruct.com/downloads/teditversion.txt";

/// User settings for the version check.
///
/// Checking on startup is off unless the user opts in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSettings {
    /// Whether to check for a newer version when the editor starts.
    #[serde(default)]
    pub check_on_startup: bool,

    /// URL of the plain-text version resource.
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    DEFAULT_VERSION_URL.to_string()
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            check_on_startup: false,
            url: default_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = UpdateSettings::default();
        assert!(!settings.check_on_startup);
        assert_eq!(settings.url, DEFAULT_VERSION_URL);
    }
}
