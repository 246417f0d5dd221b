//! # queue-metrics
//!
//! Closed-form steady-state metrics for classic single-station queues.
//!
//! Supported disciplines:
//! - M/M/1, M/D/1 and M/G/1 (Pollaczek–Khinchine)
//! - M/M/c (Erlang-C)
//! - Non-preemptive priority M/M/c with K classes
//!
//! Metrics are computed lazily and cached per instance. Invalid parameters
//! yield `NaN`, unstable ones (ρ ≥ 1) yield `+∞`; neither panics.
//!
//! ## Example
//!
//! ```rust
//! use queue_metrics::prelude::*;
//!
//! let queue = MM1Queue::new(20.0, 25.0);
//! assert!((queue.lq() - 3.2).abs() < 1e-9);
//! assert!((queue.w() - 0.2).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Formulas are written as published
    clippy::imprecise_flops,
    clippy::missing_const_for_fn,
    clippy::float_cmp,
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod queue;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{QueueScenario, ScenarioConfig, ScenarioConfigBuilder};
    pub use crate::error::{QueueError, QueueResult};
    pub use crate::queue::{
        solve_littles_law, ArrivalRates, Discipline, KnownMetric, LittleSolution, MD1Queue,
        MG1Queue, MM1Queue, MMcPriorityQueue, MMcQueue, MetricState, MetricsSnapshot, Queue,
        QueueModel, Servers,
    };
}

/// Re-export for public API
pub use error::{QueueError, QueueResult};
