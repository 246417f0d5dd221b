//! Steady-state queue models.
//!
//! Five disciplines share one validity/feasibility contract and one lazy
//! metric cache:
//!
//! | Model | Formula family |
//! |-------|----------------|
//! | [`MM1Queue`] | single exponential server |
//! | [`MD1Queue`] | single deterministic server |
//! | [`MG1Queue`] | single general server (Pollaczek–Khinchine) |
//! | [`MMcQueue`] | c exponential servers (Erlang-C) |
//! | [`MMcPriorityQueue`] | Erlang-C with K non-preemptive priority classes |
//!
//! Each model implements [`QueueModel`] by supplying its closed-form
//! [`steady_state`](QueueModel::steady_state); everything else (sentinel
//! classification, caching, L/Wq/W) is provided by the trait. [`Queue`] is the
//! closed sum of all five for callers that pick a discipline at runtime.
//!
//! # Sentinels
//!
//! | Parameters | P0, Lq, L, Wq, W |
//! |------------|------------------|
//! | invalid | NaN |
//! | valid, ρ ≥ 1 | +∞ |
//! | valid, ρ < 1 | closed form |
//!
//! # Threading
//!
//! The cache lives in a [`Cell`], so queues are `Send` but not `Sync`.
//! Serialize access externally (or clone a snapshot) to share one across
//! threads.

pub mod cache;
pub mod derived;
pub mod littles_law;
pub mod md1;
pub mod mg1;
pub mod mm1;
pub mod mmc;
pub mod priority;
pub mod utilization;
pub mod validation;

pub use cache::{MetricCache, MetricState, SteadyState};
pub use littles_law::{solve_littles_law, KnownMetric, LittleSolution};
pub use md1::MD1Queue;
pub use mg1::MG1Queue;
pub use mm1::MM1Queue;
pub use mmc::MMcQueue;
pub use priority::MMcPriorityQueue;
pub use validation::{ArrivalRates, Servers};

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use tracing::{debug, trace};

use validation::{aggregate_rate, coerce_rate, is_positive};

/// Queue discipline tag (Kendall notation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// M/M/1
    Mm1,
    /// M/D/1
    Md1,
    /// M/G/1
    Mg1,
    /// M/M/c
    Mmc,
    /// M/M/c with non-preemptive priority classes
    Priority,
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm1 => write!(f, "M/M/1"),
            Self::Md1 => write!(f, "M/D/1"),
            Self::Mg1 => write!(f, "M/G/1"),
            Self::Mmc => write!(f, "M/M/c"),
            Self::Priority => write!(f, "M/M/c priority"),
        }
    }
}

/// Parameters and cache common to every model.
///
/// λ and μ are stored already coerced: an inadmissible input is kept as NaN.
/// Mutation goes through the owning model's setters only, so a priority
/// queue's aggregate λ always equals the sum of its class rates.
#[derive(Debug, Clone)]
pub struct QueueCore {
    lambda: f64,
    mu: f64,
    cache: Cell<MetricCache>,
    recomputes: Cell<u64>,
}

impl QueueCore {
    /// Create a core from raw rates. Starts dirty.
    #[must_use]
    pub fn new(rates: &ArrivalRates, mu: f64) -> Self {
        Self::with_aggregate(aggregate_rate(rates), mu)
    }

    /// Create a core from an already-aggregated λ.
    #[must_use]
    pub fn with_aggregate(lambda: f64, mu: f64) -> Self {
        Self {
            lambda: coerce_rate(lambda),
            mu: coerce_rate(mu),
            cache: Cell::new(MetricCache::stale()),
            recomputes: Cell::new(0),
        }
    }

    /// Aggregate arrival rate λ (NaN if invalid).
    #[must_use]
    pub const fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Service rate μ (NaN if invalid).
    #[must_use]
    pub const fn mu(&self) -> f64 {
        self.mu
    }

    /// Set λ from raw rates (class lists are summed).
    pub(crate) fn set_lambda(&mut self, rates: &ArrivalRates) {
        self.set_aggregate_lambda(aggregate_rate(rates));
    }

    /// Set an already-aggregated λ.
    pub(crate) fn set_aggregate_lambda(&mut self, lambda: f64) {
        self.lambda = coerce_rate(lambda);
        self.invalidate();
    }

    /// Set μ.
    pub(crate) fn set_mu(&mut self, mu: f64) {
        self.mu = coerce_rate(mu);
        self.invalidate();
    }

    /// Mark the cache dirty. Not value-diffed: every call invalidates.
    pub fn invalidate(&self) {
        let mut cache = self.cache.get();
        cache.invalidate();
        self.cache.set(cache);
        trace!(lambda = self.lambda, mu = self.mu, "metric cache invalidated");
    }

    /// Whether the next metric read will recompute.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.cache.get().dirty
    }

    /// Number of formula evaluations performed so far.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes.get()
    }

    /// λ > 0 and μ > 0.
    #[must_use]
    pub fn rates_valid(&self) -> bool {
        is_positive(self.lambda) && is_positive(self.mu)
    }

    /// Return cached metrics, running `compute` first if dirty.
    fn cached_or(&self, compute: impl FnOnce() -> SteadyState) -> SteadyState {
        let cache = self.cache.get();
        if !cache.dirty {
            return cache.metrics();
        }
        let metrics = compute();
        self.cache.set(MetricCache::fresh(metrics));
        self.recomputes.set(self.recomputes.get() + 1);
        metrics
    }
}

/// Classify the parameters and, when feasible, run the variant formula.
fn evaluate<Q: QueueModel + ?Sized>(queue: &Q) -> SteadyState {
    let metrics = if !queue.is_valid() {
        SteadyState::INVALID
    } else if !queue.is_feasible() {
        SteadyState::INFEASIBLE
    } else {
        queue.steady_state()
    };
    debug!(
        queue = queue.name(),
        lambda = queue.lambda(),
        mu = queue.mu(),
        state = %metrics.state(),
        p0 = metrics.p0,
        lq = metrics.lq,
        "recomputed steady-state metrics"
    );
    metrics
}

/// Shared contract of every queue model.
pub trait QueueModel {
    /// Human-readable model name.
    fn name(&self) -> &'static str;

    /// Discipline tag.
    fn discipline(&self) -> Discipline;

    /// Shared parameters and cache.
    fn core(&self) -> &QueueCore;

    /// Mutable access to the shared parameters.
    ///
    /// `QueueCore` exposes no public mutators; λ and μ change only through
    /// the model's own setters.
    ///
    /// ```compile_fail
    /// use queue_metrics::prelude::*;
    ///
    /// let mut q = MMcPriorityQueue::new([5.0, 10.0, 5.0], 25.0, 1);
    /// q.core_mut().set_aggregate_lambda(10.0);
    /// ```
    fn core_mut(&mut self) -> &mut QueueCore;

    /// Closed-form `(P0, Lq)`. Only called for valid, feasible parameters.
    fn steady_state(&self) -> SteadyState;

    /// Server count (`None` if invalid).
    fn servers(&self) -> Option<u32> {
        Some(1)
    }

    /// Service-time standard deviation, for models that take one.
    fn sigma(&self) -> Option<f64> {
        None
    }

    /// All parameters are admissible.
    fn is_valid(&self) -> bool {
        self.core().rates_valid() && self.servers().is_some()
    }

    /// Valid and stable (ρ < 1).
    fn is_feasible(&self) -> bool {
        self.is_valid() && self.utilization() < 1.0
    }

    /// Aggregate arrival rate λ.
    fn lambda(&self) -> f64 {
        self.core().lambda()
    }

    /// Service rate μ.
    fn mu(&self) -> f64 {
        self.core().mu()
    }

    /// Set λ. Marks the cache dirty.
    fn set_lambda(&mut self, rates: impl Into<ArrivalRates>)
    where
        Self: Sized,
    {
        self.core_mut().set_lambda(&rates.into());
    }

    /// Set μ. Marks the cache dirty.
    fn set_mu(&mut self, mu: f64) {
        self.core_mut().set_mu(mu);
    }

    /// Per-server utilization ρ = λ/(c·μ), NaN if invalid.
    fn utilization(&self) -> f64 {
        match self.servers() {
            Some(c) if self.is_valid() => utilization::utilization(self.lambda(), self.mu(), c),
            _ => f64::NAN,
        }
    }

    /// Alias for [`utilization`](Self::utilization).
    fn ro(&self) -> f64 {
        self.utilization()
    }

    /// Offered load a = λ/μ, NaN if invalid.
    fn r(&self) -> f64 {
        if self.is_valid() {
            utilization::traffic_load(self.lambda(), self.mu())
        } else {
            f64::NAN
        }
    }

    /// Current `(P0, Lq)`, recomputing once if parameters changed.
    fn metrics(&self) -> SteadyState {
        self.core().cached_or(|| evaluate(self))
    }

    /// Sentinel classification of the current metrics.
    fn state(&self) -> MetricState {
        self.metrics().state()
    }

    /// Probability of an empty system.
    fn p0(&self) -> f64 {
        self.metrics().p0
    }

    /// Expected number waiting.
    fn lq(&self) -> f64 {
        self.metrics().lq
    }

    /// Expected number in system.
    fn l(&self) -> f64 {
        derived::number_in_system(self.lq(), self.lambda(), self.mu())
    }

    /// Expected wait in queue.
    fn wq(&self) -> f64 {
        derived::wait_in_queue(self.lq(), self.lambda())
    }

    /// Expected time in system.
    fn w(&self) -> f64 {
        derived::wait_in_system(self.l(), self.lambda())
    }

    /// Whether the next metric read will recompute.
    fn is_dirty(&self) -> bool {
        self.core().is_dirty()
    }

    /// Number of formula evaluations performed so far.
    fn recompute_count(&self) -> u64 {
        self.core().recompute_count()
    }

    /// Per-class rows (priority models only).
    fn class_rows(&self) -> Vec<ClassSnapshot> {
        Vec::new()
    }

    /// Capture every metric in a serializable snapshot.
    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            name: self.name().to_string(),
            discipline: self.discipline(),
            lambda: self.lambda(),
            mu: self.mu(),
            servers: self.servers(),
            sigma: self.sigma(),
            utilization: self.utilization(),
            state: self.state(),
            p0: self.p0(),
            lq: self.lq(),
            l: self.l(),
            wq: self.wq(),
            w: self.w(),
            classes: self.class_rows(),
        }
    }
}

/// Write the state dump shared by every model's `Display`.
pub(crate) fn write_state<Q: QueueModel + ?Sized>(
    queue: &Q,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    writeln!(f, "{}", queue.name())?;
    writeln!(f, "\tlambda: {}", queue.lambda())?;
    writeln!(f, "\tmu: {}", queue.mu())?;
    writeln!(f, "\tP0: {}", queue.p0())?;
    writeln!(f, "\tLq: {}", queue.lq())?;
    writeln!(f, "\tL: {}", queue.l())?;
    writeln!(f, "\tWq: {}", queue.wq())?;
    write!(f, "\tW: {}", queue.w())
}

/// Per-class metrics of a priority queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSnapshot {
    /// 1-based class index (1 = highest priority).
    pub class: usize,
    /// Class arrival rate λₖ.
    pub lambda: f64,
    /// Cumulative headroom Bₖ.
    pub barrier: f64,
    /// Class wait in queue.
    pub wq: f64,
    /// Class time in system.
    pub w: f64,
    /// Class queue length.
    pub lq: f64,
    /// Class number in system.
    pub l: f64,
}

/// Every metric of one queue at one parameter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Model name.
    pub name: String,
    /// Discipline tag.
    pub discipline: Discipline,
    /// Aggregate λ.
    pub lambda: f64,
    /// μ.
    pub mu: f64,
    /// Server count.
    pub servers: Option<u32>,
    /// Service-time standard deviation (M/G/1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
    /// ρ.
    pub utilization: f64,
    /// Sentinel classification.
    pub state: MetricState,
    /// P0.
    pub p0: f64,
    /// Lq.
    pub lq: f64,
    /// L.
    pub l: f64,
    /// Wq.
    pub wq: f64,
    /// W.
    pub w: f64,
    /// Per-class rows (priority only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassSnapshot>,
}

/// Any queue model, chosen at runtime.
#[derive(Debug, Clone)]
pub enum Queue {
    /// M/M/1
    MM1(MM1Queue),
    /// M/D/1
    MD1(MD1Queue),
    /// M/G/1
    MG1(MG1Queue),
    /// M/M/c
    MMc(MMcQueue),
    /// M/M/c with priority classes
    Priority(MMcPriorityQueue),
}

macro_rules! dispatch {
    ($self:expr, $q:ident => $body:expr) => {
        match $self {
            Queue::MM1($q) => $body,
            Queue::MD1($q) => $body,
            Queue::MG1($q) => $body,
            Queue::MMc($q) => $body,
            Queue::Priority($q) => $body,
        }
    };
}

impl Queue {
    /// The priority model, if this is one.
    #[must_use]
    pub const fn as_priority(&self) -> Option<&MMcPriorityQueue> {
        match self {
            Self::Priority(q) => Some(q),
            _ => None,
        }
    }

    /// Set the server count on multi-server models.
    ///
    /// Returns `false` (and leaves the queue untouched) for single-server models.
    pub fn set_servers(&mut self, servers: impl Into<Servers>) -> bool {
        match self {
            Self::MMc(q) => {
                q.set_servers(servers);
                true
            }
            Self::Priority(q) => {
                q.set_servers(servers);
                true
            }
            _ => false,
        }
    }

    /// Set σ on the M/G/1 model.
    ///
    /// Returns `false` (and leaves the queue untouched) for other models.
    pub fn set_sigma(&mut self, sigma: f64) -> bool {
        match self {
            Self::MG1(q) => {
                q.set_sigma(sigma);
                true
            }
            _ => false,
        }
    }
}

impl QueueModel for Queue {
    fn name(&self) -> &'static str {
        dispatch!(self, q => q.name())
    }

    fn discipline(&self) -> Discipline {
        dispatch!(self, q => q.discipline())
    }

    fn core(&self) -> &QueueCore {
        dispatch!(self, q => q.core())
    }

    fn core_mut(&mut self) -> &mut QueueCore {
        dispatch!(self, q => q.core_mut())
    }

    fn steady_state(&self) -> SteadyState {
        dispatch!(self, q => q.steady_state())
    }

    fn servers(&self) -> Option<u32> {
        dispatch!(self, q => q.servers())
    }

    fn sigma(&self) -> Option<f64> {
        dispatch!(self, q => q.sigma())
    }

    fn is_valid(&self) -> bool {
        dispatch!(self, q => q.is_valid())
    }

    fn is_feasible(&self) -> bool {
        dispatch!(self, q => q.is_feasible())
    }

    fn set_lambda(&mut self, rates: impl Into<ArrivalRates>) {
        let rates = rates.into();
        dispatch!(self, q => q.set_lambda(rates));
    }

    fn class_rows(&self) -> Vec<ClassSnapshot> {
        dispatch!(self, q => q.class_rows())
    }
}

impl From<MM1Queue> for Queue {
    fn from(q: MM1Queue) -> Self {
        Self::MM1(q)
    }
}

impl From<MD1Queue> for Queue {
    fn from(q: MD1Queue) -> Self {
        Self::MD1(q)
    }
}

impl From<MG1Queue> for Queue {
    fn from(q: MG1Queue) -> Self {
        Self::MG1(q)
    }
}

impl From<MMcQueue> for Queue {
    fn from(q: MMcQueue) -> Self {
        Self::MMc(q)
    }
}

impl From<MMcPriorityQueue> for Queue {
    fn from(q: MMcPriorityQueue) -> Self {
        Self::Priority(q)
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, q => fmt::Display::fmt(q, f))
    }
}
