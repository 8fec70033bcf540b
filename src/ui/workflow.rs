//! Step outputs and exported variables

use super::context::UiContext;
use super::output::escape_data;
use crate::error::{InstallError, InstallResult};
use console::style;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Report a step output (`sfml`, `path`) to the invoking workflow
pub async fn set_output(ctx: &UiContext, name: &str, value: &str) -> InstallResult<()> {
    debug!("Setting output {}={}", name, value);
    if let Some(path) = ctx.output_file() {
        return append_file_command(path, name, value).await;
    }
    if ctx.is_github_actions() {
        println!("::set-output name={}::{}", name, escape_data(value));
    } else {
        println!("{}: {}", style(name).bold(), value);
    }
    Ok(())
}

/// Export an environment variable to this process and later workflow steps
pub async fn export_variable(ctx: &UiContext, name: &str, value: &str) -> InstallResult<()> {
    debug!("Exporting {}={}", name, value);
    std::env::set_var(name, value);
    if let Some(path) = ctx.env_file() {
        return append_file_command(path, name, value).await;
    }
    if ctx.is_github_actions() {
        println!("::set-env name={}::{}", name, escape_data(value));
    }
    Ok(())
}

/// Append `name=value` (or a heredoc for multi-line values) to a file command
async fn append_file_command(path: &Path, name: &str, value: &str) -> InstallResult<()> {
    let entry = if value.contains('\n') || value.contains('\r') {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
        format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
    } else {
        format!("{}={}\n", name, value)
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| InstallError::io(format!("opening {}", path.display()), e))?;
    file.write_all(entry.as_bytes())
        .await
        .map_err(|e| InstallError::io(format!("writing {}", path.display()), e))?;
    file.flush()
        .await
        .map_err(|e| InstallError::io(format!("flushing {}", path.display()), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn set_output_appends_to_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        let ctx = UiContext::plain().with_output_file(&path);

        set_output(&ctx, "sfml", "2.6.1").await.unwrap();
        set_output(&ctx, "path", "/usr").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "sfml=2.6.1\npath=/usr\n");
    }

    #[tokio::test]
    async fn multi_line_values_use_heredoc() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        let ctx = UiContext::plain().with_output_file(&path);

        set_output(&ctx, "notes", "a\nb").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("notes<<ghadelimiter_"));
        let delimiter = header.trim_start_matches("notes<<");
        assert_eq!(lines.next(), Some("a"));
        assert_eq!(lines.next(), Some("b"));
        assert_eq!(lines.next(), Some(delimiter));
    }

    #[tokio::test]
    async fn export_variable_sets_process_env() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("env");
        let ctx = UiContext::plain().with_env_file(&path);

        export_variable(&ctx, "INSTALL_SFML_EXPORT_TEST", "1")
            .await
            .unwrap();

        assert_eq!(std::env::var("INSTALL_SFML_EXPORT_TEST").unwrap(), "1");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "INSTALL_SFML_EXPORT_TEST=1\n");
    }

    #[tokio::test]
    async fn interleaved_commands_are_readable_immediately() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("output");
        let env = temp.path().join("env");
        let ctx = UiContext::plain()
            .with_output_file(&output)
            .with_env_file(&env);

        for i in 0..20 {
            set_output(&ctx, &format!("out{}", i), &i.to_string())
                .await
                .unwrap();
            export_variable(&ctx, "INSTALL_SFML_INTERLEAVED_TEST", &i.to_string())
                .await
                .unwrap();
            let written = std::fs::read_to_string(&output).unwrap();
            assert!(written.ends_with(&format!("out{}={}\n", i, i)));
        }

        let outputs = std::fs::read_to_string(&output).unwrap();
        let expected: String = (0..20).map(|i| format!("out{}={}\n", i, i)).collect();
        assert_eq!(outputs, expected);
        let exports = std::fs::read_to_string(&env).unwrap();
        assert_eq!(exports.lines().count(), 20);
        assert_eq!(exports.lines().last(), Some("INSTALL_SFML_INTERLEAVED_TEST=19"));
    }
}
