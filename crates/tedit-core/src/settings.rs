//! Persistent editor settings.
//!
//! Stored as TOML in the platform config directory. Loading is lenient: a
//! missing or unreadable file yields the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tedit_updater::UpdateSettings;
use thiserror::Error;

use crate::autosave::AutosaveSettings;
use crate::paint::PaintDefaults;

/// Default capacity of the completion channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to create config directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write settings to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Directory for autosaves. Defaults to the platform cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
    /// Capacity of the worker-to-editor completion channel.
    pub channel_capacity: usize,
    // tables last so plain keys stay at the top of the file
    pub autosave: AutosaveSettings,
    pub paint: PaintDefaults,
    pub updates: UpdateSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            temp_dir: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            autosave: AutosaveSettings::default(),
            paint: PaintDefaults::default(),
            updates: UpdateSettings::default(),
        }
    }
}

impl EditorSettings {
    /// Load settings from the default location.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid settings in {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "BinaryConstruct", "TEdit")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Directory autosaves are written to.
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("com", "BinaryConstruct", "TEdit")
                .map(|dirs| dirs.cache_dir().join("temp"))
                .unwrap_or_else(|| std::env::temp_dir().join("tedit"))
        })
    }

    /// Completion channel capacity, at least 1.
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity.max(1)
    }
}
