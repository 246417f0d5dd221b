//! CLI output formatting.
//!
//! Rendering returns `String`s so tests can inspect output without capturing
//! stdout.

use std::fmt::Write as _;

use crate::error::{QueueError, QueueResult};
use crate::queue::{MetricState, MetricsSnapshot, Queue, QueueModel};

/// Print version information.
pub fn print_version() {
    println!("queue-metrics {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"queue-metrics - Steady-state metrics for classic queueing models

USAGE:
    queue-metrics <COMMAND> [OPTIONS]

COMMANDS:
    run <scenarios.yaml>        Evaluate every scenario in the file
        --json                  Print a JSON array of metric snapshots
        -v, --verbose           Enable debug logging

    validate <scenarios.yaml>   Check a scenario file without evaluating it

    help                        Show this help message
    version                     Show version information

DISCIPLINES:
    mm1, md1, mg1 (needs sigma), mmc, priority (lambda may be a list)

EXAMPLES:
    queue-metrics run scenarios.yaml
    queue-metrics run scenarios.yaml --json
    RUST_LOG=queue_metrics=trace queue-metrics run scenarios.yaml

Invalid parameters report NaN; unstable queues (rho >= 1) report inf.
"
    );
}

/// Text report: one state dump per scenario, separated by blank lines.
#[must_use]
pub fn render_report(queues: &[(String, Queue)]) -> String {
    let mut out = String::new();
    for (i, (name, queue)) in queues.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{name}] {}", status_line(queue));
        let _ = writeln!(out, "{queue}");
    }
    out
}

fn status_line(queue: &Queue) -> String {
    match queue.state() {
        MetricState::Value => format!("stable, utilization {:.4}", queue.utilization()),
        MetricState::Infeasible => format!("UNSTABLE, utilization {:.4}", queue.utilization()),
        MetricState::Invalid => "INVALID parameters".to_string(),
    }
}

/// Named snapshot used for JSON output.
#[derive(Debug, serde::Serialize)]
struct NamedSnapshot<'a> {
    scenario: &'a str,
    #[serde(flatten)]
    metrics: MetricsSnapshot,
}

/// JSON report: an array of snapshots tagged with their scenario names.
///
/// Non-finite metrics serialize as `null`.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn render_json(queues: &[(String, Queue)]) -> QueueResult<String> {
    let snapshots: Vec<NamedSnapshot<'_>> = queues
        .iter()
        .map(|(name, queue)| NamedSnapshot {
            scenario: name,
            metrics: queue.snapshot(),
        })
        .collect();
    serde_json::to_string_pretty(&snapshots).map_err(|e| QueueError::serialization(e.to_string()))
}
