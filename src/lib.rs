//! install-sfml - Install SFML on CI runners
//!
//! Installs SFML from apt or Homebrew, or resolves a version, restores or
//! downloads the sources and builds them with CMake.

pub mod build;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod github;
pub mod install;
pub mod packages;
pub mod platform;
pub mod process;
pub mod source;
pub mod ui;
pub mod version;

pub use error::{InstallError, InstallResult};
