//! queue-metrics CLI
//!
//! Evaluates queue scenarios described in YAML.

use std::process::ExitCode;

use queue_metrics::cli::{run_cli, Args};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let default_directive = if args.verbose() {
        "queue_metrics=debug"
    } else {
        "queue_metrics=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    run_cli(args)
}
