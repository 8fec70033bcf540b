//! Turning version selectors into concrete source references and
//! fetching those references

pub(crate) mod fetch;

pub use fetch::{fetch_source, only_subdir};

use crate::error::{InstallError, InstallResult};
use crate::github::SourceHost;
use crate::ui::{self, UiContext};
use crate::version::VersionSpec;
use tracing::debug;

/// Resolve a selector to a tag, commit SHA or exact version
///
/// - `nightly`: head commit of `branch`
/// - `latest`: tag of the newest release
/// - numeric: unchanged
pub async fn resolve_ref(
    ctx: &UiContext,
    host: &dyn SourceHost,
    name: &str,
    spec: &VersionSpec,
    branch: &str,
) -> InstallResult<String> {
    match spec {
        VersionSpec::Nightly => {
            ui::info(ctx, &format!("Looking for latest {} commit", name));
            let commit = host.commit(branch).await?;
            ui::info(ctx, &format!("Found {} commit {}", name, commit.html_url));
            Ok(commit.sha)
        }
        VersionSpec::Latest => {
            ui::info(ctx, &format!("Looking for latest {} release", name));
            let release = host.latest_release().await?;
            ui::info(ctx, &format!("Found {} release {}", name, release.html_url));
            Ok(release.tag_name)
        }
        VersionSpec::Numeric(version) => {
            debug!("Using version {} as reference", version);
            Ok(version.to_string())
        }
        VersionSpec::Package => Err(InstallError::Internal(
            "packaged versions have no source reference".to_string(),
        )),
    }
}
