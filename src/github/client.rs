//! GitHub REST client
//!
//! Requests are blocking (`ureq`) and run on the blocking thread pool.
//! API requests never follow redirects so the archive endpoint's
//! `Location` header can be read; archive downloads do.

use crate::config::schema::SourceSettings;
use crate::error::{InstallError, InstallResult};
use crate::github::{Commit, Release, SourceHost};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

const USER_AGENT: &str = concat!("install-sfml/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Client for one repository
#[derive(Clone)]
pub struct GitHubClient {
    agent: ureq::Agent,
    download_agent: ureq::Agent,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client; an empty token means anonymous access
    pub fn new(source: &SourceSettings, token: Option<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .max_redirects_will_error(false)
            .build()
            .into();
        let download_agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            download_agent,
            api_url: source.api_url.trim_end_matches('/').to_string(),
            owner: source.owner.clone(),
            repo: source.repo.clone(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, self.owner, self.repo, path)
    }

    fn get(&self, url: &str) -> InstallResult<ureq::http::Response<ureq::Body>> {
        debug!("GET {}", url);
        let mut request = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request.call().map_err(|e| InstallError::http(url, e))
    }

    /// GET a repository endpoint and decode its JSON body
    fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> InstallResult<T> {
        let url = self.repo_url(path);
        let response = self.get(&url)?;
        match response.status().as_u16() {
            200 => {
                let body = response.into_body().into_reader();
                Ok(serde_json::from_reader(body)?)
            }
            404 => Err(InstallError::NotFound(what.to_string())),
            status => Err(InstallError::http(url, format!("status {}", status))),
        }
    }

    fn archive_url_blocking(&self, reference: &str) -> InstallResult<String> {
        let url = self.repo_url(&format!("tarball/{}", reference));
        let response = self.get(&url)?;
        match response.status().as_u16() {
            301 | 302 | 303 | 307 | 308 => response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| InstallError::MissingRedirect {
                    reference: reference.to_string(),
                }),
            404 => Err(InstallError::NotFound(reference.to_string())),
            status => Err(InstallError::http(url, format!("status {}", status))),
        }
    }

    fn download_blocking(&self, url: &str, dest: &Path) -> InstallResult<()> {
        debug!("Downloading {} to {}", url, dest.display());
        let response = self
            .download_agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| InstallError::http(url, e))?;
        match response.status().as_u16() {
            200 => {}
            404 => return Err(InstallError::NotFound(url.to_string())),
            status => return Err(InstallError::http(url, format!("status {}", status))),
        }

        let file = File::create(dest)
            .map_err(|e| InstallError::io(format!("creating {}", dest.display()), e))?;
        let mut writer = BufWriter::new(file);
        let mut reader = response.into_body().into_reader();
        std::io::copy(&mut reader, &mut writer)
            .map_err(|e| InstallError::io(format!("downloading {}", url), e))?;
        Ok(())
    }

    /// Run a blocking request on the blocking pool
    async fn blocking<T, F>(&self, f: F) -> InstallResult<T>
    where
        T: Send + 'static,
        F: FnOnce(GitHubClient) -> InstallResult<T> + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || f(client))
            .await
            .map_err(|e| InstallError::Internal(format!("request task failed: {}", e)))?
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn latest_release(&self) -> InstallResult<Release> {
        self.blocking(|c| c.get_json("releases/latest", "latest release"))
            .await
    }

    async fn commit(&self, reference: &str) -> InstallResult<Commit> {
        let reference = reference.to_string();
        self.blocking(move |c| c.get_json(&format!("commits/{}", reference), &reference))
            .await
    }

    async fn archive_url(&self, reference: &str) -> InstallResult<String> {
        let reference = reference.to_string();
        self.blocking(move |c| c.archive_url_blocking(&reference))
            .await
    }

    async fn download(&self, url: &str, dest: &Path) -> InstallResult<()> {
        let url = url.to_string();
        let dest: PathBuf = dest.to_path_buf();
        self.blocking(move |c| c.download_blocking(&url, &dest))
            .await
    }
}
