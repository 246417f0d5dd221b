//! Derived measures via Little's Law.
//!
//! ```text
//! L  = Lq + λ/μ
//! Wq = Lq / λ
//! W  = L / λ  = Wq + 1/μ
//! ```
//!
//! Every function propagates the sentinel carried by `lq`: NaN in, NaN out;
//! +∞ in, +∞ out.

use super::cache::MetricState;

/// Expected number in system, L = Lq + λ/μ.
#[must_use]
pub fn number_in_system(lq: f64, lambda: f64, mu: f64) -> f64 {
    match MetricState::classify(lq) {
        MetricState::Invalid => f64::NAN,
        MetricState::Infeasible => f64::INFINITY,
        MetricState::Value => lq + lambda / mu,
    }
}

/// Expected wait in queue, Wq = Lq/λ.
#[must_use]
pub fn wait_in_queue(lq: f64, lambda: f64) -> f64 {
    match MetricState::classify(lq) {
        MetricState::Invalid => f64::NAN,
        MetricState::Infeasible => f64::INFINITY,
        MetricState::Value => lq / lambda,
    }
}

/// Expected time in system, W = L/λ.
#[must_use]
pub fn wait_in_system(l: f64, lambda: f64) -> f64 {
    match MetricState::classify(l) {
        MetricState::Invalid => f64::NAN,
        MetricState::Infeasible => f64::INFINITY,
        MetricState::Value => l / lambda,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_littles_law_identities() {
        // M/M/1 at λ=20, μ=25: Lq = 3.2
        let l = number_in_system(3.2, 20.0, 25.0);
        assert!((l - 4.0).abs() < 1e-12);
        assert!((wait_in_queue(3.2, 20.0) - 0.16).abs() < 1e-12);
        assert!((wait_in_system(l, 20.0) - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_sentinels_propagate() {
        assert!(number_in_system(f64::NAN, 20.0, 25.0).is_nan());
        assert!(number_in_system(f64::INFINITY, 30.0, 25.0).is_infinite());
        assert!(wait_in_queue(f64::NAN, 20.0).is_nan());
        assert!(wait_in_queue(f64::INFINITY, 20.0).is_infinite());
        assert!(wait_in_system(f64::NAN, 20.0).is_nan());
        assert!(wait_in_system(f64::INFINITY, 20.0).is_infinite());
    }
}
