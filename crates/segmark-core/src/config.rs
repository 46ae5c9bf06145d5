// crates/segmark-core/src/config.rs
//
// Small per-user settings record, stored as JSON:
//
//   { "last_directory": "/home/me/videos", "scale": 50.0 }
//
// Both directions are best effort. A missing or corrupt file yields defaults;
// a failed save is logged and otherwise ignored.

use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::viewport::DEFAULT_SCALE;

const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the file dialogs open in.
    pub last_directory: String,
    /// Timeline pixels-per-second.
    pub scale:          f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_directory: String::new(),
            scale:          DEFAULT_SCALE,
        }
    }
}

/// `<config dir>/segmark/config.json`, or `None` when the platform has no
/// home directory to resolve against.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "segmark", "segmark")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl AppConfig {
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("[config] {} not found, using defaults", path.display());
            return Self::default();
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[config] {} unusable, using defaults: {e}", path.display());
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Returns whether the file was written.
    pub fn save(&self, path: &Path) -> bool {
        if let Some(dir) = path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                log::error!("[config] failed to create {}: {e}", dir.display());
                return false;
            }
        }
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::error!("[config] failed to serialize settings: {e}");
                return false;
            }
        };
        match fs::write(path, json) {
            Ok(()) => {
                log::info!("[config] settings saved to {}", path.display());
                true
            }
            Err(e) => {
                log::error!("[config] failed to write {}: {e}", path.display());
                false
            }
        }
    }

    /// `last_directory` as a path, when it names an existing directory.
    pub fn start_directory(&self) -> Option<PathBuf> {
        let dir = PathBuf::from(&self.last_directory);
        (!self.last_directory.is_empty() && dir.is_dir()).then_some(dir)
    }

    /// Remember the directory containing `file`.
    pub fn remember_file(&mut self, file: &Path) {
        if let Some(dir) = file.parent() {
            self.last_directory = dir.display().to_string();
        }
    }
}
