//! Platform detection and host descriptors
//!
//! The platform decides which install paths are allowed and how commands
//! are elevated; the host descriptors feed the cache key.

use std::fmt;

/// Environment variable that overrides the detected platform
pub const PLATFORM_OVERRIDE_ENV: &str = "INSTALL_SFML_PLATFORM";

/// Platform the runner is executing on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Linux - apt packages, sudo elevation
    Linux,
    /// macOS - Homebrew packages, sudo elevation
    MacOS,
    /// Windows - no elevation, multi-config generators
    Windows,
    /// Anything else, kept by name for error messages
    Other(String),
}

impl Platform {
    /// Detect the current platform, honoring `INSTALL_SFML_PLATFORM`
    pub fn detect() -> Self {
        match std::env::var(PLATFORM_OVERRIDE_ENV) {
            Ok(value) if !value.is_empty() => Self::parse(&value),
            _ => Self::parse(std::env::consts::OS),
        }
    }

    /// Parse a platform from Rust, Node.js or display names
    pub fn parse(name: &str) -> Self {
        match name {
            "linux" | "Linux" => Platform::Linux,
            "macos" | "darwin" | "macOS" => Platform::MacOS,
            "windows" | "win32" | "Windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }

    /// Get a human-readable platform name
    pub fn name(&self) -> &str {
        match self {
            Platform::Linux => "Linux",
            Platform::MacOS => "macOS",
            Platform::Windows => "Windows",
            Platform::Other(name) => name,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptors of the build host that distinguish cache entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// CPU architecture (e.g. "x86_64")
    pub arch: String,
    /// Operating system name (e.g. "linux")
    pub os: String,
    /// Operating system release (kernel release, or OS version on Windows)
    pub release: String,
}

impl HostInfo {
    /// Describe the current host
    pub fn current() -> Self {
        Self {
            arch: std::env::consts::ARCH.to_string(),
            os: std::env::consts::OS.to_string(),
            release: os_release(),
        }
    }
}

/// Kernel release where the OS reports one, else the OS version
fn os_release() -> String {
    sysinfo::System::kernel_version()
        .or_else(sysinfo::System::os_version)
        .filter(|release| !release.trim().is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn parse_node_and_rust_names() {
        assert_eq!(Platform::parse("linux"), Platform::Linux);
        assert_eq!(Platform::parse("darwin"), Platform::MacOS);
        assert_eq!(Platform::parse("macos"), Platform::MacOS);
        assert_eq!(Platform::parse("win32"), Platform::Windows);
        assert_eq!(Platform::parse("Windows"), Platform::Windows);
        assert_eq!(
            Platform::parse("freebsd"),
            Platform::Other("freebsd".to_string())
        );
    }

    #[test]
    fn platform_name() {
        assert_eq!(Platform::MacOS.name(), "macOS");
        assert_eq!(Platform::Linux.name(), "Linux");
        assert_eq!(Platform::Windows.to_string(), "Windows");
        assert_eq!(Platform::Other("aix".to_string()).name(), "aix");
    }

    #[test]
    #[serial]
    fn detect_honors_override() {
        std::env::set_var(PLATFORM_OVERRIDE_ENV, "win32");
        assert_eq!(Platform::detect(), Platform::Windows);
        std::env::remove_var(PLATFORM_OVERRIDE_ENV);
    }

    #[test]
    fn host_info_is_populated() {
        let host = HostInfo::current();
        assert!(!host.arch.is_empty());
        assert!(!host.os.is_empty());
        assert!(!host.release.is_empty());
    }
}
