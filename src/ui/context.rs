//! UI context for detecting GitHub Actions vs plain terminal output

use std::path::{Path, PathBuf};

/// UI context that determines output behavior
#[derive(Debug, Clone, Default)]
pub struct UiContext {
    /// Whether running under GitHub Actions (workflow commands are understood)
    github_actions: bool,
    /// File that step outputs are appended to (`$GITHUB_OUTPUT`)
    output_file: Option<PathBuf>,
    /// File that exported variables are appended to (`$GITHUB_ENV`)
    env_file: Option<PathBuf>,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            github_actions: std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true"),
            output_file: non_empty_path("GITHUB_OUTPUT"),
            env_file: non_empty_path("GITHUB_ENV"),
        }
    }

    /// Plain output with no workflow files (for testing or local runs)
    pub fn plain() -> Self {
        Self::default()
    }

    /// Workflow-command output with no workflow files
    #[cfg(test)]
    pub(crate) fn actions() -> Self {
        Self {
            github_actions: true,
            ..Self::default()
        }
    }

    /// Append outputs to `path` instead of printing them
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Append exported variables to `path`
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Check if we should emit GitHub workflow commands
    pub fn is_github_actions(&self) -> bool {
        self.github_actions
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }
}

fn non_empty_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn plain_context() {
        let ctx = UiContext::plain();
        assert!(!ctx.is_github_actions());
        assert!(ctx.output_file().is_none());
        assert!(ctx.env_file().is_none());
    }

    #[test]
    fn with_files() {
        let ctx = UiContext::plain()
            .with_output_file("/tmp/out")
            .with_env_file("/tmp/env");
        assert_eq!(ctx.output_file(), Some(Path::new("/tmp/out")));
        assert_eq!(ctx.env_file(), Some(Path::new("/tmp/env")));
    }

    #[test]
    #[serial]
    fn detect_reads_actions_environment() {
        std::env::set_var("GITHUB_ACTIONS", "true");
        std::env::set_var("GITHUB_OUTPUT", "/tmp/gh-output");
        std::env::set_var("GITHUB_ENV", "");
        let ctx = UiContext::detect();
        assert!(ctx.is_github_actions());
        assert_eq!(ctx.output_file(), Some(Path::new("/tmp/gh-output")));
        assert!(ctx.env_file().is_none());
        std::env::remove_var("GITHUB_ACTIONS");
        std::env::remove_var("GITHUB_OUTPUT");
        std::env::remove_var("GITHUB_ENV");
    }
}
