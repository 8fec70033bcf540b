//! Command execution

use crate::error::{InstallError, InstallResult};
use crate::process::elevation::ElevationPolicy;
use crate::process::error_output_tail;
use crate::ui::{self, UiContext};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

/// Working directory and extra environment for a command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl RunOptions {
    /// Run the command inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            cwd: Some(dir.as_ref().to_path_buf()),
            env: Vec::new(),
        }
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Spawns processes and captures their output
///
/// `SystemExecutor` runs real processes; tests substitute a scripted one.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `command` to completion. Only spawn failures are errors;
    /// a non-zero exit is reported through `CommandOutput::code`.
    async fn execute(&self, command: &[String], options: &RunOptions)
        -> InstallResult<CommandOutput>;
}

/// Executor backed by `tokio::process`
pub struct SystemExecutor;

#[async_trait]
impl CommandExecutor for SystemExecutor {
    async fn execute(
        &self,
        command: &[String],
        options: &RunOptions,
    ) -> InstallResult<CommandOutput> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| InstallError::Internal("empty command line".to_string()))?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref cwd) = options.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &options.env {
            cmd.env(key, value);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| InstallError::command_spawn(command.join(" "), e))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Runs commands, echoing each one and elevating privileged ones
#[derive(Clone)]
pub struct CommandRunner {
    executor: Arc<dyn CommandExecutor>,
    elevation: ElevationPolicy,
    ui: UiContext,
}

impl CommandRunner {
    /// Create a runner with an explicit elevation policy
    pub fn new(executor: Arc<dyn CommandExecutor>, elevation: ElevationPolicy, ui: UiContext) -> Self {
        Self {
            executor,
            elevation,
            ui,
        }
    }

    /// Run a command, failing with `CommandFailed` on a non-zero exit
    pub async fn run(&self, command: &[String], options: &RunOptions) -> InstallResult<CommandOutput> {
        ui::command(&self.ui, command);
        debug!(cwd = ?options.cwd, "Executing: {:?}", command);

        let output = self.executor.execute(command, options).await?;
        match output.code {
            Some(0) => Ok(output),
            Some(code) => Err(InstallError::CommandFailed {
                command: command.join(" "),
                code,
                output: error_output_tail(&output.stdout, &output.stderr),
            }),
            None => Err(InstallError::ProcessSignaled(command.join(" "))),
        }
    }

    /// Run a command that needs superuser privileges
    pub async fn run_elevated(
        &self,
        command: &[String],
        options: &RunOptions,
    ) -> InstallResult<CommandOutput> {
        let elevated = self.elevation.elevate(command);
        self.run(&elevated, options).await
    }
}

/// Build an owned command line from string slices
pub(crate) fn argv<S: AsRef<str>>(parts: &[S]) -> Vec<String> {
    parts.iter().map(|s| s.as_ref().to_string()).collect()
}
