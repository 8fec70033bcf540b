//! CLI argument definitions using clap derive
//!
//! Every input can also come from the `INPUT_<NAME>` variable GitHub
//! Actions sets for a step's `with:` block. Actions sets unused inputs to
//! an empty string, which counts as unset.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Default version selector
pub const DEFAULT_SFML: &str = "latest";
/// Default build configuration
pub const DEFAULT_CONFIG: &str = "Release";

/// install-sfml - Install SFML on a CI runner
///
/// Installs the distribution package (`--sfml package` on Linux and macOS)
/// or builds and installs SFML from source with CMake.
#[derive(Parser, Debug)]
#[command(name = "install-sfml")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SFML version: latest, nightly, package or an exact version like 2.6.1
    #[arg(long, env = "INPUT_SFML")]
    pub sfml: Option<String>,

    /// CMake build configuration (Release, Debug, ...)
    #[arg(long, env = "INPUT_CONFIG")]
    pub config: Option<String>,

    /// Architecture passed to the dependency helper script
    #[arg(long, env = "INPUT_ARCH")]
    pub arch: Option<String>,

    /// GitHub token for API requests
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Settings file path
    #[arg(long, env = "INSTALL_SFML_SETTINGS")]
    pub settings: Option<PathBuf>,
}

impl Cli {
    /// Requested version selector
    pub fn sfml(&self) -> &str {
        non_empty(&self.sfml).unwrap_or(DEFAULT_SFML)
    }

    /// Requested build configuration, as given
    pub fn config(&self) -> &str {
        non_empty(&self.config).unwrap_or(DEFAULT_CONFIG)
    }

    pub fn arch(&self) -> &str {
        non_empty(&self.arch).unwrap_or("")
    }

    pub fn token(&self) -> Option<String> {
        non_empty(&self.token).map(str::to_string)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
