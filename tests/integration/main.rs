//! Integration tests for install-sfml
//!
//! Only failure paths that stop before any command, download or cache
//! access are exercised here.

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// The binary with a private settings path and no Actions environment
    fn install_sfml(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("install-sfml");
        cmd.env("INSTALL_SFML_SETTINGS", temp.path().join("settings.toml"))
            .env("RUNNER_TEMP", temp.path())
            .env_remove("GITHUB_ACTIONS")
            .env_remove("GITHUB_OUTPUT")
            .env_remove("GITHUB_ENV")
            .env_remove("INPUT_SFML")
            .env_remove("INPUT_CONFIG")
            .env_remove("INSTALL_SFML_PLATFORM");
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        install_sfml(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Install SFML on CI runners, from the system package manager",
            ));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        install_sfml(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("install-sfml"));
    }

    #[test]
    fn invalid_version_fails() {
        let temp = TempDir::new().unwrap();
        install_sfml(&temp)
            .args(["--sfml", "2.x"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Version \"2.x\" of SFML is invalid"));
    }

    #[test]
    fn version_from_action_input() {
        let temp = TempDir::new().unwrap();
        install_sfml(&temp)
            .env("INPUT_SFML", "banana")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Version \"banana\" of SFML is invalid"));
    }

    #[test]
    fn package_on_windows_is_unsupported() {
        let temp = TempDir::new().unwrap();
        install_sfml(&temp)
            .env("INSTALL_SFML_PLATFORM", "win32")
            .args(["--sfml", "package"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Version \"package\" of SFML is not supported on Windows",
            ));
    }

    #[test]
    fn errors_are_annotated_under_actions() {
        let temp = TempDir::new().unwrap();
        install_sfml(&temp)
            .env("GITHUB_ACTIONS", "true")
            .args(["--sfml", "master"])
            .assert()
            .failure()
            .stdout(predicate::str::contains(
                "::error::Version \"master\" of SFML is invalid",
            ));
    }

    #[test]
    fn invalid_settings_file_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("settings.toml"), "[cache]\nenabled = \"maybe\"\n").unwrap();
        install_sfml(&temp)
            .args(["--sfml", "2.6.1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }
}
