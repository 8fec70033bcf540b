//! install-sfml - Install SFML on CI runners
//!
//! CLI entry point.

use clap::Parser;
use console::style;
use install_sfml::cli::{self, Cli};
use install_sfml::ui::{self, UiContext};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ui = UiContext::detect();
    match cli::execute(&cli, &ui).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&ui, &e.to_string());
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; step debug logging on Actions implies debug
fn init_logging(verbose: u8) {
    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    let filter = match verbose {
        _ if runner_debug => EnvFilter::new("install_sfml=debug"),
        0 => EnvFilter::new("install_sfml=warn"),
        1 => EnvFilter::new("install_sfml=info"),
        _ => EnvFilter::new("install_sfml=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
