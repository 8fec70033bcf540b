//! UI module for CI-friendly output
//!
//! Emits GitHub Actions workflow commands (annotations, groups, step
//! outputs) when running under Actions, with a plain styled fallback for
//! local runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use install_sfml::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::group(&ctx, "Finished building SFML", &stdout);
//! ui::warning(&ctx, "Cache service unavailable");
//! ui::set_output(&ctx, "path", "/usr").await?;
//! ```

mod context;
mod output;
mod workflow;

pub use context::UiContext;
pub use output::{command, error, group, info, warning};
pub use workflow::{export_variable, set_output};
