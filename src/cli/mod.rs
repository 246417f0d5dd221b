//! CLI module for queue-metrics.
//!
//! All CLI logic lives here rather than in main.rs so argument parsing and
//! command output can be unit tested. `main` parses [`Args`], installs the
//! tracing subscriber and hands off to [`run_cli`].

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{run_cli, run_scenarios, validate_scenarios};
pub use output::{print_help, print_version, render_json, render_report};
