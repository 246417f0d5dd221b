//! Lazy metric cache.
//!
//! A queue holds its last computed `(P0, Lq)` pair and a dirty flag. Setters
//! only mark the cache dirty; the next read of P0 or Lq runs the variant
//! formula exactly once and stores the result.
//!
//! # States
//!
//! ```text
//!            setter (any, even same value)
//!   Clean ─────────────────────────────────▶ Dirty
//!     ▲                                        │
//!     └──────── read of P0 / Lq (recompute) ───┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel classification of a metric value.
///
/// Metrics are plain `f64`: NaN marks an invalid parameter set, +∞ an
/// infeasible (unstable) one. Callers should branch on this classification
/// rather than on bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricState {
    /// A finite steady-state value.
    Value,
    /// Parameters are not admissible (NaN sentinel).
    Invalid,
    /// Parameters are admissible but the queue is unstable (∞ sentinel).
    Infeasible,
}

impl MetricState {
    /// Classify a metric value by its sentinel.
    #[must_use]
    pub fn classify(value: f64) -> Self {
        if value.is_nan() {
            Self::Invalid
        } else if value.is_infinite() {
            Self::Infeasible
        } else {
            Self::Value
        }
    }
}

impl fmt::Display for MetricState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::Invalid => write!(f, "invalid"),
            Self::Infeasible => write!(f, "infeasible"),
        }
    }
}

/// The `(P0, Lq)` pair produced by one evaluation of a variant formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyState {
    /// Probability of an empty system.
    pub p0: f64,
    /// Expected number waiting in queue.
    pub lq: f64,
}

impl SteadyState {
    /// Both metrics at the invalid sentinel.
    pub const INVALID: Self = Self {
        p0: f64::NAN,
        lq: f64::NAN,
    };

    /// Both metrics at the infeasible sentinel.
    pub const INFEASIBLE: Self = Self {
        p0: f64::INFINITY,
        lq: f64::INFINITY,
    };

    /// Classification shared by both metrics.
    #[must_use]
    pub fn state(&self) -> MetricState {
        MetricState::classify(self.lq)
    }
}

/// Cached metrics plus the dirty flag.
///
/// Invariant: when `dirty` is false, `p0` and `lq` match the owning queue's
/// current parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricCache {
    /// Cached P0.
    pub p0: f64,
    /// Cached Lq.
    pub lq: f64,
    /// Parameters changed since the last recompute.
    pub dirty: bool,
}

impl MetricCache {
    /// A cache that has never been filled.
    #[must_use]
    pub const fn stale() -> Self {
        Self {
            p0: f64::NAN,
            lq: f64::NAN,
            dirty: true,
        }
    }

    /// A clean cache holding `metrics`.
    #[must_use]
    pub const fn fresh(metrics: SteadyState) -> Self {
        Self {
            p0: metrics.p0,
            lq: metrics.lq,
            dirty: false,
        }
    }

    /// Mark stale without discarding the old values.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// The cached pair, regardless of staleness.
    #[must_use]
    pub const fn metrics(&self) -> SteadyState {
        SteadyState {
            p0: self.p0,
            lq: self.lq,
        }
    }
}

impl Default for MetricCache {
    fn default() -> Self {
        Self::stale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_sentinels() {
        assert_eq!(MetricState::classify(3.2), MetricState::Value);
        assert_eq!(MetricState::classify(0.0), MetricState::Value);
        assert_eq!(MetricState::classify(f64::NAN), MetricState::Invalid);
        assert_eq!(MetricState::classify(f64::INFINITY), MetricState::Infeasible);
    }

    #[test]
    fn test_steady_state_sentinel_constants() {
        assert_eq!(SteadyState::INVALID.state(), MetricState::Invalid);
        assert!(SteadyState::INVALID.p0.is_nan());
        assert_eq!(SteadyState::INFEASIBLE.state(), MetricState::Infeasible);
        assert!(SteadyState::INFEASIBLE.p0.is_infinite());
    }

    #[test]
    fn test_cache_lifecycle() {
        let mut cache = MetricCache::default();
        assert!(cache.dirty);

        let computed = SteadyState { p0: 0.2, lq: 3.2 };
        cache = MetricCache::fresh(computed);
        assert!(!cache.dirty);
        assert_eq!(cache.metrics(), computed);

        cache.invalidate();
        assert!(cache.dirty);
        // Stale values survive invalidation until the next recompute.
        assert_eq!(cache.metrics(), computed);
    }

    #[test]
    fn test_metric_state_display() {
        assert_eq!(MetricState::Value.to_string(), "value");
        assert_eq!(MetricState::Invalid.to_string(), "invalid");
        assert_eq!(MetricState::Infeasible.to_string(), "infeasible");
    }
}
