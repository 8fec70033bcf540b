//! Homebrew (macOS) packages

use crate::error::{InstallError, InstallResult};
use crate::packages::PackageInstall;
use crate::process::{argv, CommandRunner, RunOptions};
use crate::ui::{self, UiContext};
use regex::Regex;
use std::sync::OnceLock;

/// Formula providing SFML
pub const SFML_FORMULA: &str = "sfml";

const NO_INSTALL_CLEANUP: &str = "HOMEBREW_NO_INSTALL_CLEANUP";

fn keg_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?m)^/[\w/]+/sfml/([0-9]+(?:\.[0-9]+)+)[^/\n]*")
            .expect("valid keg path regex")
    })
}

/// Install `packages` with Homebrew, keeping older kegs around
pub async fn install_brew_packages(
    ctx: &UiContext,
    runner: &CommandRunner,
    packages: &[String],
) -> InstallResult<()> {
    ui::info(ctx, "Installing packages");
    ui::export_variable(ctx, NO_INSTALL_CLEANUP, "1").await?;

    let mut command = argv(&["brew", "install"]);
    command.extend(packages.iter().cloned());
    let options = RunOptions::default().with_env(NO_INSTALL_CLEANUP, "1");
    let output = runner.run(&command, &options).await?;
    ui::group(ctx, "Finished installing packages", &output.stdout);
    Ok(())
}

/// Install the Homebrew SFML and report its keg path and version
pub async fn install_sfml_brew(
    ctx: &UiContext,
    runner: &CommandRunner,
) -> InstallResult<PackageInstall> {
    install_brew_packages(ctx, runner, &argv(&[SFML_FORMULA])).await?;

    let output = runner
        .run(&argv(&["brew", "list", SFML_FORMULA]), &RunOptions::default())
        .await?;
    keg_install(&output.stdout).ok_or_else(|| InstallError::PackageVersionNotFound {
        package: SFML_FORMULA.to_string(),
    })
}

/// Keg directory and version from `brew list` output
fn keg_install(listing: &str) -> Option<PackageInstall> {
    let captures = keg_regex().captures(listing)?;
    Some(PackageInstall {
        path: captures.get(0)?.as_str().to_string(),
        version: captures.get(1)?.as_str().to_string(),
    })
}
