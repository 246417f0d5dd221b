//! M/G/1: Poisson arrivals, one server with general service time.
//!
//! Pollaczek–Khinchine, with σ the service-time standard deviation:
//!
//! ```text
//! P0 = 1 − ρ
//! Lq = (ρ² + λ²σ²) / (2(1 − ρ))
//! ```
//!
//! σ = 1/μ (exponential service) recovers M/M/1; σ = 0 recovers M/D/1.
//! Stability depends on λ and μ only.

use std::fmt;

use super::cache::SteadyState;
use super::utilization::traffic_load;
use super::validation::{coerce_sigma, is_non_negative, ArrivalRates};
use super::{write_state, Discipline, QueueCore, QueueModel};

/// Closed-form M/G/1 metrics for feasible λ, μ and σ ≥ 0.
#[must_use]
pub fn steady_state(lambda: f64, mu: f64, sigma: f64) -> SteadyState {
    let rho = traffic_load(lambda, mu);
    let variance = sigma * sigma;
    SteadyState {
        p0: 1.0 - rho,
        lq: (rho * rho + lambda * lambda * variance) / (2.0 * (1.0 - rho)),
    }
}

/// Single-server queue with service-time standard deviation σ.
#[derive(Debug, Clone)]
pub struct MG1Queue {
    core: QueueCore,
    sigma: f64,
}

impl MG1Queue {
    /// Create an M/G/1 queue from the service-time standard deviation.
    #[must_use]
    pub fn new(lambda: impl Into<ArrivalRates>, mu: f64, sigma: f64) -> Self {
        Self {
            core: QueueCore::new(&lambda.into(), mu),
            sigma: coerce_sigma(sigma),
        }
    }

    /// Create an M/G/1 queue from the service-time variance σ².
    #[must_use]
    pub fn with_variance(lambda: impl Into<ArrivalRates>, mu: f64, variance: f64) -> Self {
        let sigma = if is_non_negative(variance) {
            variance.sqrt()
        } else {
            f64::NAN
        };
        Self::new(lambda, mu, sigma)
    }

    /// Set σ. Marks the cache dirty.
    pub fn set_sigma(&mut self, sigma: f64) {
        self.sigma = coerce_sigma(sigma);
        self.core.invalidate();
    }
}

impl QueueModel for MG1Queue {
    fn name(&self) -> &'static str {
        "M/G/1"
    }

    fn discipline(&self) -> Discipline {
        Discipline::Mg1
    }

    fn core(&self) -> &QueueCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut QueueCore {
        &mut self.core
    }

    fn sigma(&self) -> Option<f64> {
        Some(self.sigma)
    }

    fn is_valid(&self) -> bool {
        self.core.rates_valid() && is_non_negative(self.sigma)
    }

    fn is_feasible(&self) -> bool {
        self.core.rates_valid() && traffic_load(self.lambda(), self.mu()) < 1.0
    }

    fn steady_state(&self) -> SteadyState {
        steady_state(self.lambda(), self.mu(), self.sigma)
    }
}

impl fmt::Display for MG1Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(self, f)?;
        write!(f, "\n\tsigma: {}", self.sigma)
    }
}
