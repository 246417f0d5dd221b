//! Scenario configuration with YAML schema and validation.
//!
//! A scenario file lists named queues to evaluate:
//!
//! ```yaml
//! schema_version: "1.0"
//! scenarios:
//!   - name: checkout
//!     discipline: mmc
//!     lambda: 20.0
//!     mu: 25.0
//!     servers: 2
//!   - name: triage
//!     discipline: priority
//!     lambda: [5.0, 10.0, 5.0]
//!     mu: 25.0
//! ```
//!
//! Validation runs in two passes: the `validator` schema (field shapes), then
//! semantic checks that tie fields to the discipline. Numeric admissibility of
//! λ and μ is *not* checked here: an unstable or invalid queue still loads and
//! reports its sentinel metrics.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use validator::Validate;

use crate::error::{QueueError, QueueResult};
use crate::queue::{
    ArrivalRates, Discipline, MD1Queue, MG1Queue, MM1Queue, MMcPriorityQueue, MMcQueue, Queue,
};

/// Top-level scenario file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Queues to evaluate, in order.
    #[validate(nested)]
    pub scenarios: Vec<QueueScenario>,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl ScenarioConfig {
    /// Load a scenario file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> QueueResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a scenario file from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> QueueResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> QueueResult<String> {
        serde_yaml::to_string(self).map_err(|e| QueueError::serialization(e.to_string()))
    }

    /// Create a builder for programmatic construction.
    #[must_use]
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::default()
    }

    /// Validate constraints the schema cannot express.
    fn validate_semantic(&self) -> QueueResult<()> {
        if self.scenarios.is_empty() {
            return Err(QueueError::config("at least one scenario is required"));
        }

        let mut names = HashSet::new();
        for scenario in &self.scenarios {
            if !names.insert(scenario.name.as_str()) {
                return Err(QueueError::config(format!(
                    "duplicate scenario name '{}'",
                    scenario.name
                )));
            }
            scenario.validate_semantic()?;
        }

        Ok(())
    }

    /// Build every scenario, paired with its name.
    #[must_use]
    pub fn build_all(&self) -> Vec<(String, Queue)> {
        self.scenarios
            .iter()
            .map(|s| (s.name.clone(), s.build()))
            .collect()
    }
}

/// Builder for programmatic construction.
#[derive(Debug, Default)]
pub struct ScenarioConfigBuilder {
    scenarios: Vec<QueueScenario>,
}

impl ScenarioConfigBuilder {
    /// Append a scenario.
    #[must_use]
    pub fn scenario(mut self, scenario: QueueScenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the assembled configuration fails validation.
    pub fn build(self) -> QueueResult<ScenarioConfig> {
        let config = ScenarioConfig {
            schema_version: default_schema_version(),
            scenarios: self.scenarios,
        };
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }
}

/// One queue to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct QueueScenario {
    /// Scenario name (unique within a file).
    #[validate(length(min = 1))]
    pub name: String,

    /// Queue discipline.
    pub discipline: Discipline,

    /// Arrival rate, or per-class rates for `priority`.
    pub lambda: ArrivalRates,

    /// Service rate per server.
    pub mu: f64,

    /// Number of servers (`mmc` and `priority`).
    #[validate(range(min = 1))]
    #[serde(default = "default_servers")]
    pub servers: u32,

    /// Service-time standard deviation (`mg1` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
}

const fn default_servers() -> u32 {
    1
}

impl QueueScenario {
    /// Create a scenario with one server and no σ.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        discipline: Discipline,
        lambda: impl Into<ArrivalRates>,
        mu: f64,
    ) -> Self {
        Self {
            name: name.into(),
            discipline,
            lambda: lambda.into(),
            mu,
            servers: default_servers(),
            sigma: None,
        }
    }

    /// Set the server count.
    #[must_use]
    pub const fn with_servers(mut self, servers: u32) -> Self {
        self.servers = servers;
        self
    }

    /// Set σ.
    #[must_use]
    pub const fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }

    fn validate_semantic(&self) -> QueueResult<()> {
        let single_server = matches!(
            self.discipline,
            Discipline::Mm1 | Discipline::Md1 | Discipline::Mg1
        );
        if single_server && self.servers != 1 {
            return Err(self.error(format!(
                "{} is a single-server discipline, got servers = {}",
                self.discipline, self.servers
            )));
        }

        match (self.discipline, self.sigma) {
            (Discipline::Mg1, None) => {
                return Err(self.error("mg1 requires 'sigma'"));
            }
            (Discipline::Mg1, Some(_)) | (_, None) => {}
            (other, Some(_)) => {
                return Err(self.error(format!("'sigma' is only used by mg1, not {other}")));
            }
        }

        if let ArrivalRates::Classes(classes) = &self.lambda {
            if classes.is_empty() {
                return Err(self.error("'lambda' list must not be empty"));
            }
            if classes.len() > 1 && self.discipline != Discipline::Priority {
                return Err(self.error(format!(
                    "per-class 'lambda' lists are only used by priority, not {}",
                    self.discipline
                )));
            }
        }

        Ok(())
    }

    fn error(&self, message: impl Into<String>) -> QueueError {
        QueueError::config(format!("scenario '{}': {}", self.name, message.into()))
    }

    /// Build the queue this scenario describes.
    #[must_use]
    pub fn build(&self) -> Queue {
        let lambda = self.lambda.clone();
        match self.discipline {
            Discipline::Mm1 => MM1Queue::new(lambda, self.mu).into(),
            Discipline::Md1 => MD1Queue::new(lambda, self.mu).into(),
            Discipline::Mg1 => MG1Queue::new(lambda, self.mu, self.sigma.unwrap_or(f64::NAN)).into(),
            Discipline::Mmc => MMcQueue::new(lambda, self.mu, self.servers).into(),
            Discipline::Priority => MMcPriorityQueue::new(lambda, self.mu, self.servers).into(),
        }
    }
}
