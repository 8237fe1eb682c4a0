//! Blueprint scoring for ScatterPlan
//!
//! Turns a blueprint into a bounded score in three steps:
//! - [`validate_blueprint`]: shape check against the declared `(N, P)`
//! - [`CostModel`]: latency + contention time estimate and theoretical minimum
//! - [`Scorer`]: exponential penalty on relative overhead
//!
//! The cost model derives two transient structures, a [`TrafficMatrix`] of
//! per-pair transfer counts and a [`LinkAllocation`] of per-pair capacity,
//! and reports capacity violations as [`CostEstimate::Infeasible`] rather
//! than as an error.
//!
//! # Example
//!
//! ```
//! use scatterplan_config::{CostConstants, ScoringConfig};
//! use scatterplan_core::{Action, Blueprint, Phase, ProblemSize, Schedule};
//! use scatterplan_scoring::{validate_blueprint, CostModel, Scorer};
//!
//! let size = ProblemSize::new(2, 1).unwrap();
//! let phase = Phase::new(vec![Action::transfer(0, 1, 0, 1), Action::transfer(1, 0, 0, 0)]);
//! let blueprint = Blueprint::new(vec![Schedule::new(vec![phase])]);
//!
//! validate_blueprint(&blueprint, size).unwrap();
//!
//! let model = CostModel::new(CostConstants::default());
//! let estimate = model.estimate_time(&blueprint, size);
//! let t_min = model.theoretical_min_time(size, blueprint.phase_count());
//!
//! let score = Scorer::new(ScoringConfig::default()).score_estimate(&estimate, t_min);
//! assert!(score > 0.0 && score <= 100.0);
//! ```

pub mod cost;
pub mod scorer;
pub mod validation;

pub use cost::{
    CapacityViolation, CostEstimate, CostModel, LinkAllocation, TimeBreakdown, TrafficMatrix,
};
pub use scorer::Scorer;
pub use validation::validate_blueprint;
