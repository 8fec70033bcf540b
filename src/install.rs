//! Choosing and running an install path

use crate::build;
use crate::cache::CacheGateway;
use crate::config::Settings;
use crate::error::InstallResult;
use crate::github::SourceHost;
use crate::packages::{self, PackageInstall};
use crate::platform::{HostInfo, Platform};
use crate::process::CommandRunner;
use crate::ui::{self, UiContext};
use crate::version::{normalize_config, PACKAGE};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// What the caller asked for
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Version selector (`latest`, `nightly`, `package` or dotted)
    pub sfml: String,
    /// Build configuration, normalized ("Release")
    pub config: String,
    /// Architecture handed to the dependency helper script
    pub arch: String,
}

impl InstallRequest {
    pub fn new(sfml: impl Into<String>, config: &str, arch: impl Into<String>) -> Self {
        Self {
            sfml: sfml.into(),
            config: normalize_config(config),
            arch: arch.into(),
        }
    }
}

/// Collaborators and locations shared by every install path
pub struct InstallContext {
    pub ui: UiContext,
    pub runner: CommandRunner,
    pub host: Arc<dyn SourceHost>,
    pub cache: CacheGateway,
    pub settings: Settings,
    pub platform: Platform,
    pub host_info: HostInfo,
    /// Root for build trees and downloads
    pub work_root: PathBuf,
    /// CMake install prefix
    pub install_prefix: PathBuf,
    /// Helper script run before configuring
    pub deps_script: PathBuf,
}

/// How SFML gets onto the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPlan {
    Apt,
    Brew,
    FromSource,
}

/// Package-manager installs exist only for `package` on Linux and macOS
pub fn plan(sfml: &str, platform: &Platform) -> InstallPlan {
    match (sfml, platform) {
        (PACKAGE, Platform::Linux) => InstallPlan::Apt,
        (PACKAGE, Platform::MacOS) => InstallPlan::Brew,
        _ => InstallPlan::FromSource,
    }
}

/// Install SFML as requested and report the `sfml` and `path` outputs
pub async fn install(ctx: &InstallContext, request: &InstallRequest) -> InstallResult<()> {
    let plan = plan(&request.sfml, &ctx.platform);
    debug!(
        "Installing SFML {} ({}) on {} via {:?}",
        request.sfml, request.config, ctx.platform, plan
    );

    match plan {
        InstallPlan::Apt => {
            let installed = packages::install_sfml_apt(&ctx.ui, &ctx.runner).await?;
            report(&ctx.ui, &installed).await
        }
        InstallPlan::Brew => {
            let installed = packages::install_sfml_brew(&ctx.ui, &ctx.runner).await?;
            report(&ctx.ui, &installed).await
        }
        InstallPlan::FromSource => build::install_from_source(ctx, request).await,
    }
}

async fn report(ctx: &UiContext, installed: &PackageInstall) -> InstallResult<()> {
    ui::set_output(ctx, "sfml", &installed.version).await?;
    ui::set_output(ctx, "path", &installed.path).await
}


#[cfg(test)]
mod tests {
    use super::testing::Harness;
    use super::*;
    use crate::cache::gateway::fake::RestoreAnswer;
    use crate::error::InstallError;
    use crate::github::fake::FakeHost;
    use crate::process::fake::FakeExecutor;
    use crate::process::CommandOutput;
    use tempfile::TempDir;

    #[test]
    fn package_uses_package_managers_on_linux_and_macos() {
        assert_eq!(plan("package", &Platform::Linux), InstallPlan::Apt);
        assert_eq!(plan("package", &Platform::MacOS), InstallPlan::Brew);
        assert_eq!(plan("package", &Platform::Windows), InstallPlan::FromSource);
    }

    #[test]
    fn everything_else_builds_from_source() {
        for platform in [Platform::Linux, Platform::MacOS, Platform::Windows] {
            for sfml in ["latest", "nightly", "2.5.1", "bogus"] {
                assert_eq!(plan(sfml, &platform), InstallPlan::FromSource);
            }
        }
    }

    #[test]
    fn request_normalizes_config() {
        let request = InstallRequest::new("latest", "debug", "");
        assert_eq!(request.config, "Debug");
    }

    #[tokio::test]
    async fn package_on_linux_installs_with_apt_only() {
        let temp = TempDir::new().unwrap();
        let executor = FakeExecutor::new()
            .respond("dpkg -s", CommandOutput::ok("Package: libsfml-dev\nVersion: 2.5.1+dfsg-2\n"));
        let harness = Harness::new(
            temp.path(),
            Platform::Linux,
            executor,
            FakeHost::new("2.6.1", "abc123"),
            RestoreAnswer::Miss,
        );

        install(&harness.ctx, &InstallRequest::new("package", "Release", ""))
            .await
            .unwrap();

        assert_eq!(harness.outputs(), vec!["sfml=2.5.1", "path=/usr"]);
        assert!(harness.host.calls().is_empty());
        assert!(harness.store.calls().is_empty());
        assert!(harness
            .executor
            .commands()
            .iter()
            .any(|c| c.ends_with("-- libsfml-dev xvfb")));
    }

    #[tokio::test]
    async fn package_on_macos_installs_with_brew() {
        let temp = TempDir::new().unwrap();
        let executor = FakeExecutor::new().respond(
            "brew list",
            CommandOutput::ok("/usr/local/Cellar/sfml/2.6.1/lib/libsfml-graphics.dylib\n"),
        );
        let harness = Harness::new(
            temp.path(),
            Platform::MacOS,
            executor,
            FakeHost::new("2.6.1", "abc123"),
            RestoreAnswer::Miss,
        );

        install(&harness.ctx, &InstallRequest::new("package", "Release", ""))
            .await
            .unwrap();

        assert_eq!(
            harness.outputs(),
            vec!["sfml=2.6.1", "path=/usr/local/Cellar/sfml/2.6.1"]
        );
        assert!(harness.store.calls().is_empty());
    }

    #[tokio::test]
    async fn package_on_windows_is_unsupported() {
        let temp = TempDir::new().unwrap();
        let harness = Harness::new(
            temp.path(),
            Platform::Windows,
            FakeExecutor::new(),
            FakeHost::new("2.6.1", "abc123"),
            RestoreAnswer::Miss,
        );

        let err = install(&harness.ctx, &InstallRequest::new("package", "Release", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, InstallError::UnsupportedVersion { .. }));
        assert!(harness.executor.commands().is_empty());
        assert!(harness.host.calls().is_empty());
    }
}
