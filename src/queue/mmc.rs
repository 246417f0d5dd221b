//! M/M/c: Poisson arrivals, c parallel exponential servers (Erlang-C).
//!
//! ```text
//! a    = λ/μ,  ρ = a/c
//! tail = aᶜ / (c!(1 − ρ))
//! P0   = 1 / [ Σ_{n=0}^{c−1} aⁿ/n!  +  tail ]
//! Pw   = tail · P0
//! Lq   = Pw · ρ/(1 − ρ)
//! ```
//!
//! aⁿ/n! peaks near eᵃ and overflows `f64` once a passes ~709, so the
//! closed form is never evaluated directly. Pw comes from the Erlang-B
//! recursion, whose iterates stay in [0, 1]:
//!
//! ```text
//! B₀ = 1,  Bₙ = a·Bₙ₋₁ / (n + a·Bₙ₋₁)
//! Pw = c·B_c / (c − a(1 − B_c))
//! ```
//!
//! and P0 = Pw·(1 − ρ)·c!/aᶜ is taken in log space. P0 underflowing to 0 for
//! very large a is the true value rounded, not a sentinel.

use std::fmt;

use super::cache::SteadyState;
use super::utilization::traffic_load;
use super::validation::{ArrivalRates, Servers};
use super::{write_state, Discipline, QueueCore, QueueModel};

/// Erlang-C intermediate values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErlangC {
    /// Erlang-B blocking probability B(c, a).
    pub blocking: f64,
    /// Probability an arrival has to wait.
    pub wait: f64,
    /// Per-server utilization.
    pub rho: f64,
    /// ln(aᶜ/c!)
    log_tail_term: f64,
}

impl ErlangC {
    /// Evaluate the Erlang-B/Erlang-C chain for feasible λ, μ, c.
    #[must_use]
    pub fn new(lambda: f64, mu: f64, servers: u32) -> Self {
        let a = traffic_load(lambda, mu);
        let c = f64::from(servers);
        let rho = a / c;

        let mut blocking = 1.0;
        let mut log_factorial = 0.0;
        for n in 1..=servers {
            let n = f64::from(n);
            blocking = a * blocking / (n + a * blocking);
            log_factorial += n.ln();
        }

        Self {
            blocking,
            wait: c * blocking / (c - a * (1.0 - blocking)),
            rho,
            log_tail_term: c * a.ln() - log_factorial,
        }
    }

    /// Probability of an empty system.
    #[must_use]
    pub fn p0(&self) -> f64 {
        (self.wait.ln() + (1.0 - self.rho).ln() - self.log_tail_term).exp()
    }

    /// Probability an arrival has to wait (the Erlang-C probability).
    #[must_use]
    pub const fn probability_of_wait(&self) -> f64 {
        self.wait
    }

    /// Expected number waiting.
    #[must_use]
    pub fn lq(&self) -> f64 {
        self.wait * self.rho / (1.0 - self.rho)
    }
}

/// Closed-form M/M/c metrics for feasible λ, μ, c.
#[must_use]
pub fn steady_state(lambda: f64, mu: f64, servers: u32) -> SteadyState {
    let erlang = ErlangC::new(lambda, mu, servers);
    SteadyState {
        p0: erlang.p0(),
        lq: erlang.lq(),
    }
}

/// Multi-server exponential queue.
#[derive(Debug, Clone)]
pub struct MMcQueue {
    core: QueueCore,
    servers: Servers,
}

impl MMcQueue {
    /// Create an M/M/c queue. Non-integer or non-positive `servers` leaves
    /// the queue invalid.
    #[must_use]
    pub fn new(lambda: impl Into<ArrivalRates>, mu: f64, servers: impl Into<Servers>) -> Self {
        Self {
            core: QueueCore::new(&lambda.into(), mu),
            servers: servers.into(),
        }
    }

    pub(crate) fn from_core(core: QueueCore, servers: Servers) -> Self {
        Self { core, servers }
    }

    /// Set c. Marks the cache dirty.
    pub fn set_servers(&mut self, servers: impl Into<Servers>) {
        self.servers = servers.into();
        self.core.invalidate();
    }

    /// Probability an arrival has to wait; sentinel-valued like P0.
    #[must_use]
    pub fn probability_of_wait(&self) -> f64 {
        match self.servers.get() {
            Some(c) if self.is_feasible() => {
                ErlangC::new(self.lambda(), self.mu(), c).probability_of_wait()
            }
            _ if self.is_valid() => f64::INFINITY,
            _ => f64::NAN,
        }
    }
}

impl QueueModel for MMcQueue {
    fn name(&self) -> &'static str {
        "M/M/c"
    }

    fn discipline(&self) -> Discipline {
        Discipline::Mmc
    }

    fn core(&self) -> &QueueCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut QueueCore {
        &mut self.core
    }

    fn servers(&self) -> Option<u32> {
        self.servers.get()
    }

    fn steady_state(&self) -> SteadyState {
        match self.servers.get() {
            Some(c) => steady_state(self.lambda(), self.mu(), c),
            None => SteadyState::INVALID,
        }
    }
}

impl fmt::Display for MMcQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(self, f)?;
        match self.servers.get() {
            Some(c) => write!(f, "\n\tc: {c}"),
            None => write!(f, "\n\tc: NaN"),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::queue::MM1Queue;
    use proptest::prelude::*;

    proptest! {
        /// One server always reproduces M/M/1.
        #[test]
        fn prop_single_server_is_mm1(mu in 0.1f64..100.0, load in 0.01f64..0.99) {
            let lambda = load * mu;
            let mmc = MMcQueue::new(lambda, mu, 1);
            let mm1 = MM1Queue::new(lambda, mu);
            prop_assert!((mmc.lq() - mm1.lq()).abs() <= 1e-9 * mm1.lq().max(1.0));
            prop_assert!((mmc.p0() - mm1.p0()).abs() <= 1e-12);
        }

        /// Adding a server never lengthens the queue.
        #[test]
        fn prop_lq_non_increasing_in_servers(mu in 0.1f64..50.0, c in 1u32..30, load in 0.01f64..0.99) {
            let lambda = load * mu * f64::from(c);
            let fewer = MMcQueue::new(lambda, mu, c);
            let more = MMcQueue::new(lambda, mu, c + 1);
            prop_assert!(more.lq() <= fewer.lq() + 1e-12);
        }

        /// Feasible metrics are finite, non-negative and P0 lies in (0, 1].
        #[test]
        fn prop_feasible_metrics_finite(mu in 0.1f64..50.0, c in 1u32..200, load in 0.0001f64..0.999) {
            let q = MMcQueue::new(load * mu * f64::from(c), mu, c);
            prop_assert!(q.p0() > 0.0 && q.p0() <= 1.0);
            for m in [q.lq(), q.l(), q.wq(), q.w()] {
                prop_assert!(m.is_finite() && m >= 0.0);
            }
            prop_assert!((q.l() - q.lambda() * q.w()).abs() <= 1e-9 * q.l().max(1.0));
        }
    }
}
