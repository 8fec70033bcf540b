//! Installing SFML and its build dependencies from system package managers

pub mod apt;
pub mod brew;

pub use apt::{build_apt_packages, install_apt_packages, install_sfml_apt};
pub use brew::{install_brew_packages, install_sfml_brew};

use regex::Regex;
use std::sync::OnceLock;

/// Version and location of a package-manager installed SFML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInstall {
    pub version: String,
    pub path: String,
}

fn dotted_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[0-9]+(\.[0-9]+)+").expect("valid dotted version regex"))
}

/// First dotted numeric version appearing anywhere in `text`
pub(crate) fn numeric_version_in(text: &str) -> Option<String> {
    dotted_regex().find(text).map(|m| m.as_str().to_string())
}
