//! Little's Law solver.
//!
//! Given a stable (λ, μ, c) and any one of L, Lq, W, Wq, recover the other
//! three:
//!
//! ```text
//! Wq = Lq/λ     W = Wq + 1/μ     L = λW
//! ```
//!
//! These relations hold for any stable queue regardless of arrival or service
//! distribution, so the known metric may come from measurement rather than
//! from a closed form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::priority::MMcPriorityQueue;
use super::validation::{ArrivalRates, Servers};
use super::{MMcQueue, Queue, QueueModel};
use crate::error::{QueueError, QueueResult};

/// The metric handed to [`solve_littles_law`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownMetric {
    /// Expected number in system.
    L,
    /// Expected number waiting.
    Lq,
    /// Expected time in system.
    W,
    /// Expected wait in queue.
    Wq,
}

impl fmt::Display for KnownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::L => write!(f, "l"),
            Self::Lq => write!(f, "lq"),
            Self::W => write!(f, "w"),
            Self::Wq => write!(f, "wq"),
        }
    }
}

impl FromStr for KnownMetric {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" => Ok(Self::L),
            "lq" => Ok(Self::Lq),
            "w" => Ok(Self::W),
            "wq" => Ok(Self::Wq),
            other => Err(QueueError::config(format!("unknown metric '{other}'"))),
        }
    }
}

/// All four Little's Law measures plus traffic figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LittleSolution {
    /// Expected number in system.
    pub l: f64,
    /// Expected number waiting.
    pub lq: f64,
    /// Expected time in system.
    pub w: f64,
    /// Expected wait in queue.
    pub wq: f64,
    /// Offered load λ/μ.
    pub r: f64,
    /// Utilization λ/(c·μ).
    pub ro: f64,
    /// Per-class Wq for multi-class rate vectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_wq: Option<Vec<f64>>,
    /// Per-class Lq for multi-class rate vectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_lq: Option<Vec<f64>>,
}

/// Derive L, Lq, W and Wq from one known metric.
///
/// For a rate vector with more than one class the solution also carries
/// per-class Wq and Lq from the priority decomposition.
///
/// # Errors
///
/// - [`QueueError::InvalidParameter`] if λ, μ or c is not admissible
/// - [`QueueError::Infeasible`] if ρ ≥ 1
/// - [`QueueError::InvalidMetric`] if `value` is negative or non-finite, or
///   if a known L or W implies a negative wait in queue
pub fn solve_littles_law(
    rates: impl Into<ArrivalRates>,
    mu: f64,
    servers: impl Into<Servers>,
    known: KnownMetric,
    value: f64,
) -> QueueResult<LittleSolution> {
    let rates = rates.into();
    let servers = servers.into();
    let queue: Queue = match &rates {
        ArrivalRates::Classes(classes) if classes.len() > 1 => {
            MMcPriorityQueue::new(rates.clone(), mu, servers).into()
        }
        _ => MMcQueue::new(rates.clone(), mu, servers).into(),
    };

    if !queue.is_valid() {
        let (name, reason) = if queue.lambda().is_nan() {
            ("lambda", "arrival rates must be finite and non-negative with a positive total")
        } else if queue.mu().is_nan() {
            ("mu", "service rate must be finite and positive")
        } else {
            ("servers", "server count must be a positive integer")
        };
        return Err(QueueError::invalid_parameter(name, reason));
    }
    if !queue.is_feasible() {
        return Err(QueueError::Infeasible {
            utilization: queue.utilization(),
        });
    }
    let invalid_metric = || QueueError::InvalidMetric {
        metric: known.to_string(),
        value,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid_metric());
    }

    let lambda = queue.lambda();
    let service_time = 1.0 / queue.mu();
    let (l, lq, w, wq) = match known {
        KnownMetric::Lq => {
            let wq = value / lambda;
            let w = wq + service_time;
            (lambda * w, value, w, wq)
        }
        KnownMetric::Wq => {
            let w = value + service_time;
            (lambda * w, lambda * value, w, value)
        }
        KnownMetric::L => {
            let w = value / lambda;
            let wq = w - service_time;
            (value, lambda * wq, w, wq)
        }
        KnownMetric::W => {
            let wq = value - service_time;
            (lambda * value, lambda * wq, value, wq)
        }
    };
    // L or W below one mean service time leaves no room for queueing.
    if wq < 0.0 {
        return Err(invalid_metric());
    }

    let (class_wq, class_lq) = match queue.as_priority() {
        Some(priority) => {
            let k_range = 1..=priority.class_count();
            (
                Some(k_range.clone().map(|k| priority.wq_k(k)).collect()),
                Some(k_range.map(|k| priority.lq_k(k)).collect()),
            )
        }
        None => (None, None),
    };

    Ok(LittleSolution {
        l,
        lq,
        w,
        wq,
        r: queue.r(),
        ro: queue.utilization(),
        class_wq,
        class_lq,
    })
}
