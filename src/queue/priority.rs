//! M/M/c with K non-preemptive priority classes.
//!
//! Aggregate metrics are the Erlang-C metrics of λ = Σλₖ. Per-class waits
//! scale the aggregate Wq by cumulative headroom ("barriers"):
//!
//! ```text
//! Bₖ    = 1 − (λ₁ + … + λₖ)/(c·μ),   B₀ = 1
//! Wq,ₖ  = Wq · (1 − ρ) / (Bₖ₋₁ · Bₖ)
//! Wₖ    = Wq,ₖ + 1/μ
//! Lq,ₖ  = λₖ · Wq,ₖ
//! Lₖ    = λₖ · Wₖ
//! ```
//!
//! Since λₖ/(c·μ) = Bₖ₋₁ − Bₖ the per-class queue lengths telescope back to
//! the aggregate: Σ Lq,ₖ = Lq and Σ Lₖ = L.
//!
//! Class indices are 1-based. Out-of-range indices and invalid parameters give
//! NaN; an unstable aggregate or a non-positive barrier gives +∞.

use std::fmt;

use super::cache::{MetricState, SteadyState};
use super::mmc::MMcQueue;
use super::utilization::capacity;
use super::validation::{priority_classes, ArrivalRates, Servers};
use super::{write_state, ClassSnapshot, Discipline, QueueCore, QueueModel};

/// Aggregate λ for a class vector (NaN when the vector was rejected).
fn aggregate(classes: Option<&[f64]>) -> f64 {
    classes.map_or(f64::NAN, |rates| rates.iter().sum())
}

/// Non-preemptive priority queue on c exponential servers.
#[derive(Debug, Clone)]
pub struct MMcPriorityQueue {
    base: MMcQueue,
    classes: Option<Vec<f64>>,
}

impl MMcPriorityQueue {
    /// Create a priority queue from per-class arrival rates (class 1 first).
    ///
    /// A single rate is treated as one class.
    #[must_use]
    pub fn new(lambda: impl Into<ArrivalRates>, mu: f64, servers: impl Into<Servers>) -> Self {
        let classes = priority_classes(&lambda.into());
        let core = QueueCore::with_aggregate(aggregate(classes.as_deref()), mu);
        Self {
            base: MMcQueue::from_core(core, servers.into()),
            classes,
        }
    }

    /// Set c. Marks the cache dirty.
    pub fn set_servers(&mut self, servers: impl Into<Servers>) {
        self.base.set_servers(servers);
    }

    /// The class vector, if admissible.
    #[must_use]
    pub fn class_rates(&self) -> Option<&[f64]> {
        self.classes.as_deref()
    }

    /// Number of priority classes (0 if the vector was rejected).
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.as_ref().map_or(0, Vec::len)
    }

    /// Arrival rate of class `k`.
    #[must_use]
    pub fn lamda_k(&self, k: usize) -> f64 {
        match &self.classes {
            Some(rates) if (1..=rates.len()).contains(&k) => rates[k - 1],
            _ => f64::NAN,
        }
    }

    /// Σ_{j≤k} λⱼ. Caller guarantees the class vector exists and `k ≤ K`.
    fn cumulative_rate(&self, k: usize) -> f64 {
        self.classes
            .as_deref()
            .map_or(f64::NAN, |rates| rates[..k].iter().sum())
    }

    /// Bₖ without the validity/feasibility gate.
    fn raw_barrier(&self, k: usize) -> f64 {
        match self.servers() {
            Some(c) => 1.0 - self.cumulative_rate(k) / capacity(self.mu(), c),
            None => f64::NAN,
        }
    }

    /// Sentinel for class-level queries, or `None` if `k` can be evaluated.
    fn class_gate(&self, k: usize, allow_zero: bool) -> Option<f64> {
        let lowest = usize::from(!allow_zero);
        if !self.is_valid() || !(lowest..=self.class_count()).contains(&k) {
            Some(f64::NAN)
        } else if !self.is_feasible() {
            Some(f64::INFINITY)
        } else {
            None
        }
    }

    /// Cumulative headroom Bₖ after admitting classes 1..=k. `barrier_k(0)` is 1.
    #[must_use]
    pub fn barrier_k(&self, k: usize) -> f64 {
        if let Some(sentinel) = self.class_gate(k, true) {
            return sentinel;
        }
        self.raw_barrier(k)
    }

    /// Expected wait in queue for class `k`.
    #[must_use]
    pub fn wq_k(&self, k: usize) -> f64 {
        if let Some(sentinel) = self.class_gate(k, false) {
            return sentinel;
        }
        let wq = self.wq();
        if !wq.is_finite() {
            return wq;
        }

        let before = self.raw_barrier(k - 1);
        let after = self.raw_barrier(k);
        if before <= 0.0 || after <= 0.0 {
            return f64::INFINITY;
        }
        wq * (1.0 - self.utilization()) / (before * after)
    }

    /// Expected time in system for class `k`.
    #[must_use]
    pub fn w_k(&self, k: usize) -> f64 {
        let wq = self.wq_k(k);
        match MetricState::classify(wq) {
            MetricState::Value => wq + 1.0 / self.mu(),
            _ => wq,
        }
    }

    /// Expected number waiting from class `k`.
    #[must_use]
    pub fn lq_k(&self, k: usize) -> f64 {
        let wq = self.wq_k(k);
        match MetricState::classify(wq) {
            MetricState::Value => self.lamda_k(k) * wq,
            _ => wq,
        }
    }

    /// Expected number in system from class `k`.
    #[must_use]
    pub fn l_k(&self, k: usize) -> f64 {
        let w = self.w_k(k);
        match MetricState::classify(w) {
            MetricState::Value => self.lamda_k(k) * w,
            _ => w,
        }
    }
}

impl QueueModel for MMcPriorityQueue {
    fn name(&self) -> &'static str {
        "M/M/c priority"
    }

    fn discipline(&self) -> Discipline {
        Discipline::Priority
    }

    fn core(&self) -> &QueueCore {
        self.base.core()
    }

    fn core_mut(&mut self) -> &mut QueueCore {
        self.base.core_mut()
    }

    fn servers(&self) -> Option<u32> {
        self.base.servers()
    }

    fn is_valid(&self) -> bool {
        self.classes.is_some() && self.base.is_valid()
    }

    /// Replace the class vector; the aggregate λ is re-derived from it.
    fn set_lambda(&mut self, rates: impl Into<ArrivalRates>) {
        self.classes = priority_classes(&rates.into());
        let lambda = aggregate(self.classes.as_deref());
        self.base.core_mut().set_aggregate_lambda(lambda);
    }

    fn steady_state(&self) -> SteadyState {
        self.base.steady_state()
    }

    fn class_rows(&self) -> Vec<ClassSnapshot> {
        (1..=self.class_count())
            .map(|k| ClassSnapshot {
                class: k,
                lambda: self.lamda_k(k),
                barrier: self.barrier_k(k),
                wq: self.wq_k(k),
                w: self.w_k(k),
                lq: self.lq_k(k),
                l: self.l_k(k),
            })
            .collect()
    }
}

impl fmt::Display for MMcPriorityQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(self, f)?;
        match self.servers() {
            Some(c) => write!(f, "\n\tc: {c}")?,
            None => write!(f, "\n\tc: NaN")?,
        }
        match self.class_rates() {
            Some(rates) => write!(f, "\n\tlamda_k: {rates:?}"),
            None => write!(f, "\n\tlamda_k: NaN"),
        }
    }
}
