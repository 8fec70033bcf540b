//! Version selectors and dotted version comparison
//!
//! A version selector is either symbolic (`latest`, `nightly`, `package`)
//! or an exact dotted numeric version such as `2.5.1`. Each install path
//! accepts a subset of these kinds.

use crate::error::{InstallError, InstallResult};
use crate::platform::Platform;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// Selector for the newest published release
pub const LATEST: &str = "latest";
/// Selector for the tip of the default branch
pub const NIGHTLY: &str = "nightly";
/// Selector for the distribution-packaged version
pub const PACKAGE: &str = "package";

fn numeric_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)+$").expect("valid numeric version regex"))
}

/// Whether `version` is a well-formed dotted numeric version
pub fn is_numeric_version(version: &str) -> bool {
    numeric_regex().is_match(version)
}

/// A requested version, parsed from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    Latest,
    Nightly,
    Package,
    Numeric(DottedVersion),
}

/// Kind of a version selector, used to express what an install path accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    Latest,
    Nightly,
    Package,
    Numeric,
}

impl VersionSpec {
    /// Parse a selector, failing with `InvalidVersion` for anything unknown
    pub fn parse(what: &str, version: &str) -> InstallResult<Self> {
        match version {
            LATEST => Ok(Self::Latest),
            NIGHTLY => Ok(Self::Nightly),
            PACKAGE => Ok(Self::Package),
            _ => DottedVersion::parse(version)
                .map(Self::Numeric)
                .ok_or_else(|| InstallError::InvalidVersion {
                    what: what.to_string(),
                    version: version.to_string(),
                }),
        }
    }

    /// The kind of this selector
    pub fn kind(&self) -> VersionKind {
        match self {
            Self::Latest => VersionKind::Latest,
            Self::Nightly => VersionKind::Nightly,
            Self::Package => VersionKind::Package,
            Self::Numeric(_) => VersionKind::Numeric,
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST),
            Self::Nightly => f.write_str(NIGHTLY),
            Self::Package => f.write_str(PACKAGE),
            Self::Numeric(version) => write!(f, "{}", version),
        }
    }
}

/// Validate `version` against the kinds an install path accepts
///
/// Unknown strings fail with `InvalidVersion`; known but disallowed kinds
/// fail with `UnsupportedVersion`.
pub fn check_version(
    what: &str,
    version: &str,
    allowed: &[VersionKind],
    platform: &Platform,
) -> InstallResult<VersionSpec> {
    let spec = VersionSpec::parse(what, version)?;
    if allowed.contains(&spec.kind()) {
        Ok(spec)
    } else {
        Err(InstallError::UnsupportedVersion {
            what: what.to_string(),
            version: version.to_string(),
            platform: platform.to_string(),
        })
    }
}

/// A dotted numeric version compared component by component
///
/// Missing trailing components compare as zero, so `2.6` equals `2.6.0`.
/// Components are kept as digit strings with leading zeros stripped, so
/// any component length compares correctly.
#[derive(Debug, Clone)]
pub struct DottedVersion {
    raw: String,
    parts: Vec<String>,
}

impl DottedVersion {
    /// Parse a dotted numeric version; `None` unless it matches `^\d+(\.\d+)+$`
    pub fn parse(version: &str) -> Option<Self> {
        if !is_numeric_version(version) {
            return None;
        }
        let parts = version
            .split('.')
            .map(|part| match part.trim_start_matches('0') {
                "" => "0".to_string(),
                digits => digits.to_string(),
            })
            .collect();
        Some(Self {
            raw: version.to_string(),
            parts,
        })
    }

    /// The version exactly as it was written
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| {
                let a = self.parts.get(i).map_or("0", String::as_str);
                let b = other.parts.get(i).map_or("0", String::as_str);
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Capitalize the first letter of a build configuration ("debug" -> "Debug")
pub fn normalize_config(config: &str) -> String {
    let mut chars = config.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
