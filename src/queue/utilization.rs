//! Traffic intensity.
//!
//! ```text
//! a = λ/μ          (offered load, in Erlangs)
//! ρ = λ/(c·μ)      (per-server utilization; stable iff ρ < 1)
//! ```

/// Offered load a = λ/μ.
#[must_use]
pub fn traffic_load(lambda: f64, mu: f64) -> f64 {
    lambda / mu
}

/// Per-server utilization ρ = λ/(c·μ).
#[must_use]
pub fn utilization(lambda: f64, mu: f64, servers: u32) -> f64 {
    lambda / (f64::from(servers) * mu)
}

/// Total service capacity c·μ.
#[must_use]
pub fn capacity(mu: f64, servers: u32) -> f64 {
    f64::from(servers) * mu
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_server_utilization_equals_load() {
        assert!((traffic_load(20.0, 25.0) - 0.8).abs() < f64::EPSILON);
        assert!((utilization(20.0, 25.0, 1) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_utilization_scales_with_servers() {
        assert!((utilization(20.0, 25.0, 2) - 0.4).abs() < f64::EPSILON);
        assert!((utilization(20.0, 25.0, 4) - 0.2).abs() < f64::EPSILON);
        assert!((capacity(10.0, 2) - 20.0).abs() < f64::EPSILON);
    }
}
