//! apt (Debian/Ubuntu) packages

use crate::error::{InstallError, InstallResult};
use crate::packages::{numeric_version_in, PackageInstall};
use crate::process::{argv, CommandRunner, RunOptions};
use crate::ui::{self, UiContext};
use crate::version::DottedVersion;
use tracing::debug;

/// Distribution package providing SFML headers and libraries
pub const SFML_PACKAGE: &str = "libsfml-dev";

/// Install prefix of distribution packages
pub const SYSTEM_PREFIX: &str = "/usr";

/// Build dependencies of SFML `version`, sorted
pub fn build_apt_packages(version: &DottedVersion) -> Vec<String> {
    let at_least = |threshold: &str| {
        DottedVersion::parse(threshold).is_some_and(|t| *version >= t)
    };

    let mut packages = vec![
        "libxrandr-dev",
        "libudev-dev",
        "libopenal-dev",
        "libgl1-mesa-dev",
        "libegl1-mesa-dev",
    ];
    if at_least("2.6") {
        packages.push("libxcursor-dev");
    }
    if !at_least("2.5") {
        packages.push("libjpeg-dev");
    }
    if !at_least("2.4") {
        packages.extend(["freeglut3-dev", "libxcb-image0-dev"]);
    }
    packages.extend(["cmake", "xvfb"]);

    let mut packages: Vec<String> = packages.into_iter().map(str::to_string).collect();
    packages.sort();
    packages
}

/// Refresh package lists (best effort) and install `packages`
pub async fn install_apt_packages(
    ctx: &UiContext,
    runner: &CommandRunner,
    packages: &[String],
) -> InstallResult<()> {
    ui::info(ctx, "Installing packages");
    if let Err(e) = runner
        .run_elevated(&argv(&["apt-get", "update"]), &RunOptions::default())
        .await
    {
        debug!("apt-get update failed, continuing: {}", e);
    }

    let mut command = argv(&[
        "apt-get",
        "install",
        "-qy",
        "--no-install-recommends",
        "--no-upgrade",
        "--",
    ]);
    command.extend(packages.iter().cloned());
    let output = runner.run_elevated(&command, &RunOptions::default()).await?;
    ui::group(ctx, "Finished installing packages", &output.stdout);
    Ok(())
}

/// Install the distribution's SFML and report its version
pub async fn install_sfml_apt(
    ctx: &UiContext,
    runner: &CommandRunner,
) -> InstallResult<PackageInstall> {
    install_apt_packages(ctx, runner, &argv(&[SFML_PACKAGE, "xvfb"])).await?;

    let output = runner
        .run(&argv(&["dpkg", "-s", SFML_PACKAGE]), &RunOptions::default())
        .await?;
    let version = dpkg_version(&output.stdout).ok_or_else(|| InstallError::PackageVersionNotFound {
        package: SFML_PACKAGE.to_string(),
    })?;

    Ok(PackageInstall {
        version,
        path: SYSTEM_PREFIX.to_string(),
    })
}

/// Dotted version from `dpkg -s` output, preferring the `Version:` field
fn dpkg_version(status: &str) -> Option<String> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Version:"))
        .and_then(numeric_version_in)
        .or_else(|| numeric_version_in(status))
}
