//! M/M/1: Poisson arrivals, one exponential server.
//!
//! ```text
//! ρ  = λ/μ
//! P0 = 1 − ρ
//! Lq = ρ²/(1 − ρ)
//! ```

use std::fmt;

use super::cache::SteadyState;
use super::utilization::traffic_load;
use super::validation::ArrivalRates;
use super::{write_state, Discipline, QueueCore, QueueModel};

/// Closed-form M/M/1 metrics for feasible λ, μ.
#[must_use]
pub fn steady_state(lambda: f64, mu: f64) -> SteadyState {
    let rho = traffic_load(lambda, mu);
    SteadyState {
        p0: 1.0 - rho,
        lq: rho * rho / (1.0 - rho),
    }
}

/// Single-server exponential queue.
#[derive(Debug, Clone)]
pub struct MM1Queue {
    core: QueueCore,
}

impl MM1Queue {
    /// Create an M/M/1 queue. A class list for λ is summed.
    #[must_use]
    pub fn new(lambda: impl Into<ArrivalRates>, mu: f64) -> Self {
        Self {
            core: QueueCore::new(&lambda.into(), mu),
        }
    }
}

impl QueueModel for MM1Queue {
    fn name(&self) -> &'static str {
        "M/M/1"
    }

    fn discipline(&self) -> Discipline {
        Discipline::Mm1
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

impl fmt::Display for MM1Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(self, f)
    }
}
