//! Subprocess execution with optional privilege elevation
//!
//! - `CommandExecutor`: spawns a process and captures its output
//! - `CommandRunner`: echoes, elevates and checks exit status

mod elevation;
#[cfg(test)]
pub(crate) mod fake;
mod runner;

pub use elevation::ElevationPolicy;
pub(crate) use runner::argv;
pub use runner::{CommandExecutor, CommandOutput, CommandRunner, RunOptions, SystemExecutor};

/// Lines of captured output kept in a `CommandFailed` message
const ERROR_TAIL_LINES: usize = 50;

/// The last `ERROR_TAIL_LINES` lines a failed command wrote.
///
/// CMake, compilers and apt report failures on stderr, so stderr is used
/// when it has any content; stdout only stands in for a silent stderr.
/// Trailing blank lines are dropped.
pub(crate) fn error_output_tail(stdout: &str, stderr: &str) -> String {
    let source = if stderr.trim().is_empty() { stdout } else { stderr };
    let mut tail: Vec<&str> = source
        .lines()
        .rev()
        .skip_while(|line| line.trim().is_empty())
        .take(ERROR_TAIL_LINES)
        .collect();
    tail.reverse();
    tail.join("\n")
}
