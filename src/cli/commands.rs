//! CLI command handlers.

use std::fmt::Write as _;
use std::path::Path;
use std::process::ExitCode;

use tracing::{info, warn};

use super::output::{print_help, print_version, render_json, render_report};
use super::{Args, Command};
use crate::config::ScenarioConfig;
use crate::error::QueueResult;
use crate::queue::{MetricState, QueueModel};

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run { path, json, .. } => report(run_scenarios(&path, json)),
        Command::Validate { path } => report(validate_scenarios(&path)),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

fn report(result: QueueResult<String>) -> ExitCode {
    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Load a scenario file and render every queue in it.
///
/// Unstable or invalid queues are reported, not treated as errors.
///
/// # Errors
///
/// Returns error if the file cannot be loaded or fails validation.
pub fn run_scenarios(path: &Path, json: bool) -> QueueResult<String> {
    let config = ScenarioConfig::load(path)?;
    info!(path = %path.display(), scenarios = config.scenarios.len(), "loaded scenario file");

    let queues = config.build_all();
    for (name, queue) in &queues {
        if queue.state() != MetricState::Value {
            warn!(scenario = %name, state = %queue.state(), "scenario has no finite metrics");
        }
    }

    if json {
        render_json(&queues).map(|mut s| {
            s.push('\n');
            s
        })
    } else {
        Ok(render_report(&queues))
    }
}

/// Validate a scenario file and summarize it.
///
/// # Errors
///
/// Returns error if the file cannot be loaded or fails validation.
pub fn validate_scenarios(path: &Path) -> QueueResult<String> {
    let config = ScenarioConfig::load(path)?;
    let mut out = format!(
        "✓ {}: {} scenario(s), schema {}\n",
        path.display(),
        config.scenarios.len(),
        config.schema_version
    );
    for scenario in &config.scenarios {
        let _ = writeln!(out, "  • {} ({})", scenario.name, scenario.discipline);
    }
    Ok(out)
}
