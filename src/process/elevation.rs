//! Non-interactive privilege elevation policy

use crate::platform::Platform;
use tracing::debug;

/// How privileged commands are launched
///
/// Decided once at startup and handed to the `CommandRunner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationPolicy {
    /// Run commands unchanged
    Passthrough,
    /// Prefix commands with `sudo -n`, failing instead of prompting
    Sudo,
}

impl ElevationPolicy {
    /// Probe for `sudo`; Windows never elevates
    pub fn detect(platform: &Platform) -> Self {
        if *platform == Platform::Windows {
            debug!("Elevation disabled on Windows");
            return Self::Passthrough;
        }
        match which::which("sudo") {
            Ok(path) => {
                debug!("Elevating privileged commands with {}", path.display());
                Self::Sudo
            }
            Err(_) => {
                debug!("sudo not found in PATH, running privileged commands directly");
                Self::Passthrough
            }
        }
    }

    /// Apply the policy to a command line
    pub fn elevate(&self, command: &[String]) -> Vec<String> {
        match self {
            Self::Passthrough => command.to_vec(),
            Self::Sudo => ["sudo", "-n"]
                .iter()
                .map(|s| s.to_string())
                .chain(command.iter().cloned())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn passthrough_leaves_command() {
        let cmd = argv(&["apt-get", "update"]);
        assert_eq!(ElevationPolicy::Passthrough.elevate(&cmd), cmd);
    }

    #[test]
    fn sudo_is_non_interactive() {
        let cmd = argv(&["cmake", "--build", "."]);
        assert_eq!(
            ElevationPolicy::Sudo.elevate(&cmd),
            argv(&["sudo", "-n", "cmake", "--build", "."])
        );
    }

    #[test]
    fn windows_never_elevates() {
        assert_eq!(
            ElevationPolicy::detect(&Platform::Windows),
            ElevationPolicy::Passthrough
        );
    }
}
