//! Building SFML from source
//!
//! Resolve the requested version to a reference, restore the build tree
//! from cache or download it, then configure, build and install with CMake.
//! On Linux the apt build dependencies are installed while the source tree
//! is being prepared.

pub mod cmake;

pub use cmake::{build_command, configure_command, install_command, CmakeOptions};

use crate::cache::CacheKey;
use crate::error::{InstallError, InstallResult};
use crate::install::{InstallContext, InstallRequest};
use crate::packages::{build_apt_packages, install_apt_packages};
use crate::platform::Platform;
use crate::process::RunOptions;
use crate::source::{fetch_source, resolve_ref};
use crate::ui;
use crate::version::{check_version, DottedVersion, VersionKind, VersionSpec};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Selectors accepted for source builds
pub const FROM_SOURCE_VERSIONS: &[VersionKind] =
    &[VersionKind::Latest, VersionKind::Nightly, VersionKind::Numeric];

const LIBRARY: &str = "SFML";

/// CMake stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configure,
    Build,
    Install,
}

impl Stage {
    fn done_title(self) -> &'static str {
        match self {
            Stage::Configure => "Finished configuring SFML",
            Stage::Build => "Finished building SFML",
            Stage::Install => "Finished installing SFML",
        }
    }

    fn command(self, options: &CmakeOptions) -> Vec<String> {
        match self {
            Stage::Configure => configure_command(options),
            Stage::Build => build_command(options),
            Stage::Install => install_command(options),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Configure => write!(f, "configure"),
            Stage::Build => write!(f, "build"),
            Stage::Install => write!(f, "install"),
        }
    }
}

/// The build tree is ready and this is what the cache said about it
struct PreparedSource {
    key: CacheKey,
    restored: Option<String>,
}

/// Build tree location for a request
pub fn build_dir(work_root: &Path, request: &InstallRequest) -> PathBuf {
    work_root.join(format!("sfml-{}-{}", request.sfml, request.config))
}

/// Build and install SFML from source, reporting `sfml` and `path`
pub async fn install_from_source(ctx: &InstallContext, request: &InstallRequest) -> InstallResult<()> {
    let spec = check_version(LIBRARY, &request.sfml, FROM_SOURCE_VERSIONS, &ctx.platform)?;
    let build_dir = build_dir(&ctx.work_root, request);
    debug!("Building in {}", build_dir.display());

    let (deps, prepared) = tokio::join!(
        install_build_dependencies(ctx, &spec),
        prepare_source(ctx, &spec, &request.config, &build_dir),
    );
    let prepared = prepared?;
    deps?;

    run_deps_script(ctx, &request.arch, &build_dir).await;

    let options = CmakeOptions {
        platform: ctx.platform.clone(),
        config: request.config.clone(),
        prefix: ctx.install_prefix.clone(),
        jobs: ctx.settings.build.jobs,
        shared_libs: ctx.settings.build.shared_libs,
    };
    for stage in [Stage::Configure, Stage::Build, Stage::Install] {
        run_stage(ctx, stage, &options, &build_dir).await?;
    }
    ui::set_output(&ctx.ui, "path", &ctx.install_prefix.display().to_string()).await?;

    ctx.cache
        .try_save(&[build_dir], &prepared.key, prepared.restored.as_deref())
        .await;
    Ok(())
}

/// apt build dependencies; Linux only
async fn install_build_dependencies(ctx: &InstallContext, spec: &VersionSpec) -> InstallResult<()> {
    if ctx.platform != Platform::Linux {
        return Ok(());
    }

    let version = match spec {
        VersionSpec::Numeric(version) => version.clone(),
        _ => {
            let baseline = &ctx.settings.build.baseline_version;
            DottedVersion::parse(baseline).ok_or_else(|| InstallError::InvalidVersion {
                what: "the dependency baseline".to_string(),
                version: baseline.clone(),
            })?
        }
    };
    debug!("Installing build dependencies of SFML {}", version);
    install_apt_packages(&ctx.ui, &ctx.runner, &build_apt_packages(&version)).await
}

/// Resolve the reference, then restore or download the tree into `build_dir`
async fn prepare_source(
    ctx: &InstallContext,
    spec: &VersionSpec,
    config: &str,
    build_dir: &Path,
) -> InstallResult<PreparedSource> {
    let reference = resolve_ref(
        &ctx.ui,
        ctx.host.as_ref(),
        LIBRARY,
        spec,
        &ctx.settings.source.branch,
    )
    .await?;
    ui::set_output(&ctx.ui, "sfml", &reference).await?;

    let key = CacheKey::new(&reference, config, &ctx.host_info);
    let paths = [build_dir.to_path_buf()];
    let restored = ctx.cache.try_restore(&paths, &key).await;
    if restored.is_none() {
        fetch_source(
            &ctx.ui,
            ctx.host.as_ref(),
            LIBRARY,
            &reference,
            build_dir,
            &ctx.work_root,
        )
        .await?;
    }

    remove_stale_cmake_cache(build_dir).await?;
    Ok(PreparedSource { key, restored })
}

/// A cached `CMakeCache.txt` pins paths from the machine that produced it
async fn remove_stale_cmake_cache(build_dir: &Path) -> InstallResult<()> {
    let path = build_dir.join("CMakeCache.txt");
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(InstallError::io(format!("removing {}", path.display()), e)),
    }
}

/// Run the helper script; failures are reported and otherwise ignored
async fn run_deps_script(ctx: &InstallContext, arch: &str, build_dir: &Path) {
    if ctx.platform == Platform::Windows {
        return;
    }
    let script = &ctx.deps_script;
    if !script.is_file() {
        info!("No dependency script at {}, skipping", script.display());
        return;
    }

    let command = vec![
        "bash".to_string(),
        script.display().to_string(),
        arch.to_string(),
        build_dir.display().to_string(),
    ];
    let options = match script.parent() {
        Some(dir) => RunOptions::in_dir(dir),
        None => RunOptions::default(),
    };
    let name = script
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| script.display().to_string());

    match ctx.runner.run(&command, &options).await {
        Ok(output) => ui::info(&ctx.ui, output.stdout.trim_end()),
        Err(e) => ui::info(&ctx.ui, &format!("{} failed: {}", name, e)),
    }
}

async fn run_stage(
    ctx: &InstallContext,
    stage: Stage,
    options: &CmakeOptions,
    build_dir: &Path,
) -> InstallResult<()> {
    info!("Running CMake {} step", stage);
    let command = stage.command(options);
    let run_options = RunOptions::in_dir(build_dir);
    let output = match stage {
        Stage::Install => ctx.runner.run_elevated(&command, &run_options).await?,
        Stage::Configure | Stage::Build => ctx.runner.run(&command, &run_options).await?,
    };
    ui::group(&ctx.ui, stage.done_title(), &output.stdout);
    Ok(())
}
