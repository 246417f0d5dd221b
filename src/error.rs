//! Error types for queue-metrics.
//!
//! Metric computation never fails: invalid and unstable parameter sets are
//! reported through NaN / +Infinity sentinels (see [`crate::queue::MetricState`]).
//! `QueueError` covers the fallible edges of the crate instead: loading and
//! validating scenario files, solving Little's Law from a caller-supplied
//! metric, and CLI I/O.

use thiserror::Error;

/// Result type alias for queue-metrics operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Unified error type for all fallible queue-metrics operations.
#[derive(Debug, Error)]
pub enum QueueError {
    // ===== Parameter Errors =====
    /// A queue parameter is not admissible (non-finite, non-positive, non-integer).
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name (e.g. "mu", "servers").
        name: String,
        /// Why the parameter was rejected.
        reason: String,
    },

    /// Parameters are admissible but the queue is unstable (ρ ≥ 1).
    #[error("Infeasible queue: utilization {utilization:.6} >= 1")]
    Infeasible {
        /// Utilization ρ = λ/(c·μ).
        utilization: f64,
    },

    /// A known metric handed to the Little's Law solver is unusable.
    #[error("Invalid value {value} for metric '{metric}'")]
    InvalidMetric {
        /// Metric name ("l", "lq", "w", "wq").
        metric: String,
        /// Offending value.
        value: f64,
    },

    // ===== Configuration Errors =====
    /// Invalid scenario configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl QueueError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error describes the queue parameters themselves
    /// (as opposed to files, schemas or I/O).
    #[must_use]
    pub const fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::Infeasible { .. } | Self::InvalidMetric { .. }
        )
    }
}
