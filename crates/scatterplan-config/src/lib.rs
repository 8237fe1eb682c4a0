//! Configuration system for ScatterPlan.
//!
//! Load evaluation configuration from TOML or YAML files to select the
//! schedule strategy, the cost-model policies and the cost constants
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use scatterplan_config::{EvaluationConfig, StrategyKind, WorkerCount};
//!
//! let config = EvaluationConfig::from_toml_str(r#"
//!     strategy = "halving_doubling"
//!     worker_count = { count = 4 }
//!
//!     [cost]
//!     latency = 0.005
//!
//!     [scoring]
//!     beta = 2.0
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, StrategyKind::HalvingDoubling);
//! assert_eq!(config.worker_count, WorkerCount::Count(4));
//! assert_eq!(config.cost.latency, 0.005);
//! assert_eq!(config.scoring.max_score, 100.0);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use scatterplan_config::EvaluationConfig;
//!
//! let config = EvaluationConfig::load("scatterplan.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;

use scatterplan_core::ScatterPlanError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for ScatterPlanError {
    fn from(err: ConfigError) -> Self {
        ScatterPlanError::Config(err.to_string())
    }
}

/// Main evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EvaluationConfig {
    /// Schedule-construction strategy under test.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Worker threads for construction and traffic aggregation.
    #[serde(default)]
    pub worker_count: WorkerCount,

    /// Phase floor used by the theoretical lower bound.
    #[serde(default)]
    pub lower_bound: LowerBoundPolicy,

    /// How link capacity is assigned to communicating pairs.
    #[serde(default)]
    pub link_allocation: LinkAllocationPolicy,

    /// Latency and bandwidth constants.
    #[serde(default)]
    pub cost: CostConstants,

    /// Score mapping constants.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl EvaluationConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or holds
    /// non-positive constants.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the schedule strategy.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the worker count.
    pub fn with_worker_count(mut self, worker_count: WorkerCount) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Sets the lower-bound phase floor.
    pub fn with_lower_bound(mut self, lower_bound: LowerBoundPolicy) -> Self {
        self.lower_bound = lower_bound;
        self
    }

    /// Sets the link allocation policy.
    pub fn with_link_allocation(mut self, link_allocation: LinkAllocationPolicy) -> Self {
        self.link_allocation = link_allocation;
        self
    }

    /// Replaces the cost constants.
    pub fn with_cost(mut self, cost: CostConstants) -> Self {
        self.cost = cost;
        self
    }

    /// Replaces the scoring constants.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Checks that every constant is finite and strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use scatterplan_config::{CostConstants, EvaluationConfig};
    ///
    /// let config = EvaluationConfig::new().with_cost(CostConstants {
    ///     bandwidth: 0.0,
    ///     ..CostConstants::default()
    /// });
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("cost.latency", self.cost.latency),
            ("cost.slice_size", self.cost.slice_size),
            ("cost.bandwidth", self.cost.bandwidth),
            ("scoring.beta", self.scoring.beta),
            ("scoring.max_score", self.scoring.max_score),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if self.worker_count == WorkerCount::Count(0) {
            return Err(ConfigError::Invalid(
                "worker_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Available schedule-construction strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Neighbour ring, `N - 1` phases.
    #[default]
    Ring,

    /// Recursive halving/doubling, `ceil(log2 N)` phases.
    HalvingDoubling,
}

impl StrategyKind {
    /// Every strategy, in declaration order.
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Ring, StrategyKind::HalvingDoubling];

    /// Returns the snake_case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Ring => "ring",
            StrategyKind::HalvingDoubling => "halving_doubling",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Worker thread configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Run sequentially on the calling thread.
    None,

    /// Dedicated pool with a specific number of threads.
    Count(usize),
}

/// Phase floor used by the theoretical lower bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LowerBoundPolicy {
    /// `ceil(log2 N)` rounds.
    #[default]
    Logarithmic,

    /// `N - 1` rounds.
    Ring,

    /// The phase count of the strategy under test.
    StrategyPhases,
}

/// How link capacity is assigned to communicating rank pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkAllocationPolicy {
    /// Exactly one link per communicating pair.
    #[default]
    SingleLink,

    /// One link per pair, then spare per-rank budget spread over busy pairs.
    SpreadHeadroom,
}

/// Latency and bandwidth constants of the cost model.
///
/// Units are arbitrary but must be consistent: the defaults express latency
/// in milliseconds, slice size in bytes and bandwidth in bytes per unit time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CostConstants {
    /// Fixed start-up cost of one phase (`L`).
    pub latency: f64,

    /// Size of the whole per-rank buffer (`S`).
    pub slice_size: f64,

    /// Per-link bandwidth (`B`).
    pub bandwidth: f64,
}

impl Default for CostConstants {
    fn default() -> Self {
        Self {
            latency: 0.002,
            slice_size: 40.0 * 1024.0 * 1024.0,
            bandwidth: 400.0 * 1024.0 * 1024.0 * 1024.0,
        }
    }
}

/// Score mapping constants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Exponential penalty rate on relative overhead.
    pub beta: f64,

    /// Score awarded at or below the theoretical minimum.
    pub max_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            beta: 1.5,
            max_score: 100.0,
        }
    }
}
