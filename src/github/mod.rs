//! Source hosting API
//!
//! `SourceHost` is the seam between the installer and the upstream
//! repository; `GitHubClient` implements it over the GitHub REST API.

mod client;

pub use client::GitHubClient;

use crate::error::InstallResult;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// A published release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub html_url: String,
}

/// A commit on some branch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub html_url: String,
}

/// Upstream repository operations used by the installer
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// The most recent published release
    async fn latest_release(&self) -> InstallResult<Release>;

    /// The commit a branch, tag or SHA points at
    async fn commit(&self, reference: &str) -> InstallResult<Commit>;

    /// Location of the source archive for `reference`, taken from the
    /// redirect the archive endpoint answers with
    async fn archive_url(&self, reference: &str) -> InstallResult<String>;

    /// Download `url` into `dest`
    async fn download(&self, url: &str, dest: &Path) -> InstallResult<()>;
}
