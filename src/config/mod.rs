//! Settings management for install-sfml

pub mod schema;

pub use schema::Settings;

use crate::error::{InstallError, InstallResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Settings loader
pub struct ConfigManager {
    settings_path: PathBuf,
}

impl ConfigManager {
    /// Create a config manager with the default path
    pub fn new() -> Self {
        Self {
            settings_path: Self::default_settings_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            settings_path: path,
        }
    }

    /// Get the default settings file path
    pub fn default_settings_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("install-sfml")
            .join("settings.toml")
    }

    /// Get the default cache blob directory
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("install-sfml")
    }

    /// `build-deps.sh` next to the running executable
    pub fn default_deps_script() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("build-deps.sh")
    }

    /// Directory that build trees and downloads are placed in
    pub fn runner_temp() -> PathBuf {
        std::env::var_os("RUNNER_TEMP")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Load settings, using defaults if the file does not exist
    pub async fn load(&self) -> InstallResult<Settings> {
        if !self.settings_path.exists() {
            debug!(
                "Settings file {} not found, using defaults",
                self.settings_path.display()
            );
            return Ok(Settings::default());
        }

        self.load_from_file(&self.settings_path).await
    }

    /// Load settings from a specific file
    pub async fn load_from_file(&self, path: &Path) -> InstallResult<Settings> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| InstallError::io(format!("reading settings from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| InstallError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the settings file path
    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
