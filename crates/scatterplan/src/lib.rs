//! ScatterPlan - Multi-Plane Reduce-Scatter Planner
//!
//! Builds the transfer plan of a reduce-scatter collective over `N` ranks and
//! `P` network planes, then scores it under a latency + contention model.
//!
//! # Example
//!
//! ```rust
//! use scatterplan::prelude::*;
//!
//! let evaluation = scatterplan::evaluate(5, 4).unwrap();
//! assert_eq!(evaluation.phase_count, 4);
//! assert_eq!(evaluation.validity, Validity::Valid);
//!
//! // Hand-built blueprints go through the same pipeline
//! let evaluator = Evaluator::new(EvaluationConfig::default()).unwrap();
//! let blueprint = evaluator.build_blueprint(5, 4).unwrap();
//! let size = ProblemSize::new(5, 4).unwrap();
//! assert_eq!(evaluator.evaluate_blueprint(&blueprint, size), evaluation);
//! ```

// Data model
pub use scatterplan_core::{
    Action, ActionKind, Blueprint, Phase, PlaneId, ProblemSize, Rank, Result, ScatterPlanError,
    Schedule, SliceId, StructuralMismatch,
};

// Configuration
pub use scatterplan_config::{
    ConfigError, CostConstants, EvaluationConfig, LinkAllocationPolicy, LowerBoundPolicy,
    ScoringConfig, StrategyKind, WorkerCount,
};

// Construction strategies
pub use scatterplan_strategy::{
    construct_blueprint, strategy_for, BlueprintBuilder, HalvingDoublingStrategy, RingDirection,
    RingStrategy, ScheduleStrategy,
};

// Validation, cost model and scoring
pub use scatterplan_scoring::{
    validate_blueprint, CapacityViolation, CostEstimate, CostModel, Scorer, TimeBreakdown,
};

mod evaluator;
pub use evaluator::{evaluate, Evaluation, Evaluator, Validity};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{evaluate, Evaluation, Evaluator, Validity};
    pub use super::{Action, Blueprint, Phase, ProblemSize, Schedule};
    pub use super::{EvaluationConfig, StrategyKind};
    pub use super::{ScheduleStrategy, Scorer};
}
