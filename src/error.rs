//! Error types for install-sfml
//!
//! All modules use `InstallResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for install-sfml operations
pub type InstallResult<T> = Result<T, InstallError>;

/// All errors that can occur while installing SFML
#[derive(Error, Debug)]
pub enum InstallError {
    // Version errors
    #[error("Version \"{version}\" of {what} is invalid")]
    InvalidVersion { what: String, version: String },

    #[error("Version \"{version}\" of {what} is not supported on {platform}")]
    UnsupportedVersion {
        what: String,
        version: String,
        platform: String,
    },

    // Process errors
    #[error("Command failed: {command}, exit code: {code}\n{output}")]
    CommandFailed {
        command: String,
        code: i32,
        output: String,
    },

    #[error("Failed to start command: {command}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process terminated by signal: {0}")]
    ProcessSignaled(String),

    #[error("Could not find the installed version of {package} in the package manager output")]
    PackageVersionNotFound { package: String },

    // Source host errors
    #[error("Not found upstream: {0}")]
    NotFound(String),

    #[error("HTTP request failed: {url}: {reason}")]
    Http { url: String, reason: String },

    #[error("Archive redirect for {reference} did not include a location header")]
    MissingRedirect { reference: String },

    #[error("Expected exactly one directory in extracted archive {path}, found: {entries:?}")]
    UnexpectedArchiveLayout { path: PathBuf, entries: Vec<String> },

    // Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InstallError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command spawn error
    pub fn command_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            command: command.into(),
            source,
        }
    }

    /// Create an HTTP error
    pub fn http(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Http {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidVersion { .. } => {
                Some("Use \"latest\", \"nightly\", \"package\" or a version like 2.6.1")
            }
            Self::UnsupportedVersion { .. } => {
                Some("\"package\" is only available on Linux (apt) and macOS (Homebrew)")
            }
            Self::NotFound(_) => Some("Check that the requested tag or commit exists upstream"),
            Self::Http { .. } => Some("Pass a token input to avoid GitHub API rate limits"),
            _ => None,
        }
    }
}
