//! Settings loaded from `settings.json` in the config directory.
//!
//! Every field is optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::paths;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base delay before every search answer.
    pub latency_ms: u64,
    /// Random extra delay per search, so answers overtake each other.
    pub jitter_ms: u64,
    /// Maximum results per search.
    pub limit: usize,
    /// Highlight the first result instead of the placeholder.
    pub auto_select_first_result: bool,
    /// JSON array of `{id, display}` records replacing the built-in cities.
    pub catalog: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            latency_ms: 120,
            jitter_ms: 300,
            limit: 15,
            auto_select_first_result: true,
            catalog: None,
        }
    }
}

impl Settings {
    /// Load from the platform config directory.
    pub fn load() -> Result<Self, AppError> {
        match paths::settings_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&raw).map_err(|source| AppError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}
