//! Command-line interface

pub mod args;

pub use args::Cli;

use crate::cache::{CacheGateway, LocalCacheStore};
use crate::config::ConfigManager;
use crate::error::{InstallError, InstallResult};
use crate::github::GitHubClient;
use crate::install::{install, InstallContext, InstallRequest};
use crate::platform::{HostInfo, Platform};
use crate::process::{CommandRunner, ElevationPolicy, SystemExecutor};
use crate::ui::UiContext;
use std::sync::Arc;
use tracing::debug;

/// Load settings, wire up the real collaborators and install
pub async fn execute(cli: &Cli, ui: &UiContext) -> InstallResult<()> {
    let manager = match cli.settings {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let settings = manager.load().await?;
    debug!("Settings loaded from {}", manager.path().display());

    let platform = Platform::detect();
    let elevation = ElevationPolicy::detect(&platform);
    debug!("Platform {}, elevation {:?}", platform, elevation);

    let cache = if settings.cache.enabled {
        let dir = settings
            .cache
            .dir
            .clone()
            .unwrap_or_else(ConfigManager::default_cache_dir);
        debug!("Cache blobs in {}", dir.display());
        CacheGateway::new(Arc::new(LocalCacheStore::new(dir)), ui.clone())
    } else {
        CacheGateway::disabled(ui.clone())
    };

    let install_prefix = match settings.build.install_prefix.clone() {
        Some(prefix) => prefix,
        None => std::env::current_dir()
            .map_err(|e| InstallError::io("getting current directory", e))?,
    };
    let deps_script = settings
        .build
        .deps_script
        .clone()
        .unwrap_or_else(ConfigManager::default_deps_script);

    let ctx = InstallContext {
        ui: ui.clone(),
        runner: CommandRunner::new(Arc::new(SystemExecutor), elevation, ui.clone()),
        host: Arc::new(GitHubClient::new(&settings.source, cli.token())),
        cache,
        platform,
        host_info: HostInfo::current(),
        work_root: ConfigManager::runner_temp(),
        install_prefix,
        deps_script,
        settings,
    };

    let request = InstallRequest::new(cli.sfml(), cli.config(), cli.arch());
    install(&ctx, &request).await
}
