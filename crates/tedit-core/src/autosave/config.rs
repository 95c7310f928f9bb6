//! Autosave configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for autosave behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveSettings {
    /// Whether autosave is enabled.
    pub enabled: bool,

    /// Seconds between autosaves.
    pub interval_secs: u64,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 180, // 3 minutes
        }
    }
}

impl AutosaveSettings {
    /// Create a disabled autosave config.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// The tick period. Never shorter than one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AutosaveSettings::default();
        assert!(config.enabled);
        assert_eq!(config.interval(), Duration::from_secs(180));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = AutosaveSettings {
            interval_secs: 0,
            ..AutosaveSettings::disabled()
        };
        assert!(!config.enabled);
        assert_eq!(config.interval(), Duration::from_secs(1));
    }
}
