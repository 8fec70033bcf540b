//! Log lines, groups and annotations
//!
//! Under GitHub Actions these are workflow commands (`::warning::`,
//! `::group::`); elsewhere they are plain styled lines.

use super::context::UiContext;
use console::style;

/// Escape a message for use in a workflow command
pub(crate) fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Display an info line; blank messages are dropped
pub fn info(ctx: &UiContext, message: &str) {
    if let Some(line) = info_line(ctx, message) {
        println!("{}", line);
    }
}

fn info_line(ctx: &UiContext, message: &str) -> Option<String> {
    let message = message.trim_end();
    if message.trim().is_empty() {
        None
    } else if ctx.is_github_actions() {
        Some(message.to_string())
    } else {
        Some(format!("{} {}", style("›").dim(), message))
    }
}

/// Echo a command line before it runs
pub fn command(ctx: &UiContext, command: &[String]) {
    println!("{}", command_line(ctx, command));
}

fn command_line(ctx: &UiContext, command: &[String]) -> String {
    if ctx.is_github_actions() {
        format!("[command]{}", command.join(" "))
    } else {
        format!("{}{}", style("[command]").dim(), command.join(" "))
    }
}

/// Display a warning annotation
pub fn warning(ctx: &UiContext, message: &str) {
    if ctx.is_github_actions() {
        println!("::warning::{}", escape_data(message));
    } else {
        println!("{} {}", style("[WARN]").yellow(), message);
    }
}

/// Display an error annotation
pub fn error(ctx: &UiContext, message: &str) {
    if ctx.is_github_actions() {
        println!("::error::{}", escape_data(message));
    } else {
        eprintln!("{} {}", style("Error:").red().bold(), message);
    }
}

/// Display `body` inside a collapsible group titled `title`
pub fn group(ctx: &UiContext, title: &str, body: &str) {
    if ctx.is_github_actions() {
        println!("::group::{}", title);
        println!("{}", body.trim_end());
        println!("::endgroup::");
    } else {
        println!("{}", style(title).bold());
        if !body.trim().is_empty() {
            println!("{}", body.trim_end());
        }
    }
}
