//! Scripted executor for tests

use crate::error::InstallResult;
use crate::process::{CommandExecutor, CommandOutput, RunOptions};
use async_trait::async_trait;
use std::sync::Mutex;

/// Records every command and answers from a prefix-matched script.
/// Unscripted commands succeed with empty output.
#[derive(Default)]
pub struct FakeExecutor {
    responses: Vec<(String, CommandOutput)>,
    calls: Mutex<Vec<(String, RunOptions)>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands whose joined line starts with `prefix`
    pub fn respond(mut self, prefix: &str, output: CommandOutput) -> Self {
        self.responses.push((prefix.to_string(), output));
        self
    }

    /// Joined command lines, in call order
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(line, _)| line.clone())
            .collect()
    }

    /// Options passed with the first command starting with `prefix`
    pub fn options_for(&self, prefix: &str) -> Option<RunOptions> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(line, _)| line.starts_with(prefix))
            .map(|(_, options)| options.clone())
    }

    /// Index of the first call starting with `prefix`
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.commands().iter().position(|line| line.starts_with(prefix))
    }
}

#[async_trait]
impl CommandExecutor for FakeExecutor {
    async fn execute(
        &self,
        command: &[String],
        options: &RunOptions,
    ) -> InstallResult<CommandOutput> {
        let line = command.join(" ");
        self.calls
            .lock()
            .unwrap()
            .push((line.clone(), options.clone()));
        let output = self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::ok(""));
        Ok(output)
    }
}
