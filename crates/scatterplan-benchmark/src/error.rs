//! Error types for evaluation suites.

use scatterplan::ScatterPlanError;
use thiserror::Error;

/// Error raised while loading, running or reporting a suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] ScatterPlanError),
}
