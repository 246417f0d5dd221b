//! M/D/1: Poisson arrivals, one deterministic server.
//!
//! ```text
//! P0 = 1 − ρ
//! Lq = ρ²/(2(1 − ρ))      = ½ · Lq(M/M/1)
//! ```

use std::fmt;

use super::cache::SteadyState;
use super::utilization::traffic_load;
use super::validation::ArrivalRates;
use super::{write_state, Discipline, QueueCore, QueueModel};

/// Closed-form M/D/1 metrics for feasible λ, μ.
#[must_use]
pub fn steady_state(lambda: f64, mu: f64) -> SteadyState {
    let rho = traffic_load(lambda, mu);
    SteadyState {
        p0: 1.0 - rho,
        lq: rho * rho / (2.0 * (1.0 - rho)),
    }
}

/// Single-server queue with constant service time 1/μ.
#[derive(Debug, Clone)]
pub struct MD1Queue {
    core: QueueCore,
}

impl MD1Queue {
    /// Create an M/D/1 queue.
    #[must_use]
    pub fn new(lambda: impl Into<ArrivalRates>, mu: f64) -> Self {
        Self {
            core: QueueCore::new(&lambda.into(), mu),
        }
    }
}

impl QueueModel for MD1Queue {
    fn name(&self) -> &'static str {
        "M/D/1"
    }

    fn discipline(&self) -> Discipline {
        Discipline::Md1
    }

    fn core(&self) -> &QueueCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut QueueCore {
        &mut self.core
    }

    fn steady_state(&self) -> SteadyState {
        steady_state(self.lambda(), self.mu())
    }
}

impl fmt::Display for MD1Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(self, f)
    }
}
