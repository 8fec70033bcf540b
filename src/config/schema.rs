//! Settings schema for install-sfml
//!
//! Settings are read from `~/.config/install-sfml/settings.toml` (or the
//! path given with `--settings`). Every field has a default, so the file is
//! optional.

use serde::Deserialize;
use std::path::PathBuf;

/// Root settings structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upstream source repository
    pub source: SourceSettings,

    /// Native build settings
    pub build: BuildSettings,

    /// Build cache settings
    pub cache: CacheSettings,
}

/// Where SFML sources come from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Branch followed by "nightly"
    pub branch: String,

    /// REST API base URL
    pub api_url: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            owner: "SFML".to_string(),
            repo: "SFML".to_string(),
            branch: "master".to_string(),
            api_url: "https://api.github.com".to_string(),
        }
    }
}

/// CMake build settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Parallel build jobs passed to `cmake --build -j`
    pub jobs: u32,

    /// Build shared libraries (`BUILD_SHARED_LIBS`)
    pub shared_libs: bool,

    /// Helper script run before configuring (defaults to `build-deps.sh`
    /// next to the executable)
    pub deps_script: Option<PathBuf>,

    /// Install prefix (defaults to the current directory)
    pub install_prefix: Option<PathBuf>,

    /// Version whose apt dependencies are used for "latest" and "nightly"
    pub baseline_version: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            jobs: 4,
            shared_libs: true,
            deps_script: None,
            install_prefix: None,
            baseline_version: "2.6.0".to_string(),
        }
    }
}

/// Build cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Restore and save build directories
    pub enabled: bool,

    /// Directory holding cache blobs (defaults to the user cache dir)
    pub dir: Option<PathBuf>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}
