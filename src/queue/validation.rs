//! Parameter validation and coercion.
//!
//! Raw caller input is coerced into its validated internal form at the setter
//! boundary: rates that fail validation are stored as NaN, server counts that
//! are not positive integers are stored as `None`. Nothing here returns an
//! error; admissibility is later read back through `is_valid`.

use serde::{Deserialize, Serialize};

/// Arrival rate input: a single aggregate rate or one rate per priority class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArrivalRates {
    /// A single aggregate rate λ.
    Single(f64),
    /// Ordered per-class rates λ₁..λₖ (class 1 = highest priority).
    Classes(Vec<f64>),
}

impl From<f64> for ArrivalRates {
    fn from(rate: f64) -> Self {
        Self::Single(rate)
    }
}

impl From<Vec<f64>> for ArrivalRates {
    fn from(rates: Vec<f64>) -> Self {
        Self::Classes(rates)
    }
}

impl From<&[f64]> for ArrivalRates {
    fn from(rates: &[f64]) -> Self {
        Self::Classes(rates.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for ArrivalRates {
    fn from(rates: [f64; N]) -> Self {
        Self::Classes(rates.to_vec())
    }
}

/// Number of parallel servers after coercion.
///
/// `Servers::default()` is a single server. Any input that is not a positive
/// integer coerces to the invalid count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Servers(Option<u32>);

impl Servers {
    /// The invalid server count.
    pub const INVALID: Self = Self(None);

    /// Validated count, if any.
    #[must_use]
    pub const fn get(self) -> Option<u32> {
        self.0
    }

    /// Whether the count is a positive integer.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0.is_some()
    }
}

impl Default for Servers {
    fn default() -> Self {
        Self(Some(1))
    }
}

impl From<u32> for Servers {
    fn from(c: u32) -> Self {
        Self((c >= 1).then_some(c))
    }
}

impl From<i32> for Servers {
    fn from(c: i32) -> Self {
        u32::try_from(c).map_or(Self::INVALID, Self::from)
    }
}

impl From<usize> for Servers {
    fn from(c: usize) -> Self {
        u32::try_from(c).map_or(Self::INVALID, Self::from)
    }
}

impl From<f64> for Servers {
    fn from(c: f64) -> Self {
        if c.is_finite() && c >= 1.0 && c.fract() == 0.0 && c <= f64::from(u32::MAX) {
            Self(Some(c as u32))
        } else {
            Self::INVALID
        }
    }
}

/// True iff `x` is a finite number (NaN and ±∞ are not admissible inputs).
#[must_use]
pub fn is_numeric(x: f64) -> bool {
    x.is_finite()
}

/// True iff `x` is finite and strictly positive.
#[must_use]
pub fn is_positive(x: f64) -> bool {
    is_numeric(x) && x > 0.0
}

/// True iff `x` is finite and non-negative.
#[must_use]
pub fn is_non_negative(x: f64) -> bool {
    is_numeric(x) && x >= 0.0
}

/// Coerce a rate (λ or μ): positive finite values pass, anything else is NaN.
#[must_use]
pub fn coerce_rate(x: f64) -> f64 {
    if is_positive(x) {
        x
    } else {
        f64::NAN
    }
}

/// Coerce a service-time standard deviation: σ ≥ 0 passes, anything else is NaN.
#[must_use]
pub fn coerce_sigma(x: f64) -> f64 {
    if is_non_negative(x) {
        x
    } else {
        f64::NAN
    }
}

/// Aggregate λ for non-priority queues.
///
/// A class list is summed; it must be non-empty and every entry positive.
#[must_use]
pub fn aggregate_rate(rates: &ArrivalRates) -> f64 {
    match rates {
        ArrivalRates::Single(rate) => coerce_rate(*rate),
        ArrivalRates::Classes(classes) => {
            if !classes.is_empty() && classes.iter().copied().all(is_positive) {
                classes.iter().sum()
            } else {
                f64::NAN
            }
        }
    }
}

/// Per-class rates for the priority queue.
///
/// Classes may carry a zero rate but must be finite and non-negative, and at
/// least one class must be positive. A single rate is one class.
#[must_use]
pub fn priority_classes(rates: &ArrivalRates) -> Option<Vec<f64>> {
    match rates {
        ArrivalRates::Single(rate) => is_positive(*rate).then(|| vec![*rate]),
        ArrivalRates::Classes(classes) => {
            let admissible = !classes.is_empty()
                && classes.iter().copied().all(is_non_negative)
                && classes.iter().sum::<f64>() > 0.0;
            admissible.then(|| classes.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_predicates() {
        assert!(is_numeric(0.0));
        assert!(!is_numeric(f64::NAN));
        assert!(!is_numeric(f64::INFINITY));

        assert!(is_positive(1e-9));
        assert!(!is_positive(0.0));
        assert!(!is_positive(-1.0));

        assert!(is_non_negative(0.0));
        assert!(!is_non_negative(-0.1));
    }

    #[test]
    fn test_coerce_rate() {
        assert_eq!(coerce_rate(25.0), 25.0);
        assert!(coerce_rate(0.0).is_nan());
        assert!(coerce_rate(-3.0).is_nan());
        assert!(coerce_rate(f64::NAN).is_nan());
        assert!(coerce_rate(f64::INFINITY).is_nan());
    }

    #[test]
    fn test_coerce_sigma_allows_zero() {
        assert_eq!(coerce_sigma(0.0), 0.0);
        assert_eq!(coerce_sigma(0.04), 0.04);
        assert!(coerce_sigma(-0.01).is_nan());
    }

    #[test]
    fn test_servers_coercion() {
        assert_eq!(Servers::from(2).get(), Some(2));
        assert_eq!(Servers::from(2_u32).get(), Some(2));
        assert_eq!(Servers::from(3_usize).get(), Some(3));
        assert_eq!(Servers::from(4.0).get(), Some(4));
        assert!(!Servers::from(0).is_valid());
        assert!(!Servers::from(-1).is_valid());
        assert!(!Servers::from(2.5).is_valid());
        assert!(!Servers::from(0.0).is_valid());
        assert!(!Servers::from(f64::NAN).is_valid());
        assert_eq!(Servers::default().get(), Some(1));
    }

    #[test]
    fn test_aggregate_rate_sums_classes() {
        assert_eq!(aggregate_rate(&ArrivalRates::from([5.0, 10.0, 5.0])), 20.0);
        assert_eq!(aggregate_rate(&ArrivalRates::from(20.0)), 20.0);
        assert!(aggregate_rate(&ArrivalRates::Classes(vec![])).is_nan());
        assert!(aggregate_rate(&ArrivalRates::from([5.0, 0.0])).is_nan());
        assert!(aggregate_rate(&ArrivalRates::from([5.0, -1.0])).is_nan());
    }

    #[test]
    fn test_priority_classes_allow_zero_components() {
        let classes = priority_classes(&ArrivalRates::from([6.0, 0.0, 4.0]));
        assert_eq!(classes, Some(vec![6.0, 0.0, 4.0]));

        assert_eq!(priority_classes(&ArrivalRates::from(3.0)), Some(vec![3.0]));
        assert!(priority_classes(&ArrivalRates::from([0.0, 0.0])).is_none());
        assert!(priority_classes(&ArrivalRates::from([1.0, f64::NAN])).is_none());
        assert!(priority_classes(&ArrivalRates::from([1.0, -2.0])).is_none());
        assert!(priority_classes(&ArrivalRates::Classes(vec![])).is_none());
        assert!(priority_classes(&ArrivalRates::from(0.0)).is_none());
    }
}
