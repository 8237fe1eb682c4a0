//! ScatterPlan Strategy Engine
//!
//! This crate turns a problem size `(N, P)` into a [`Blueprint`]:
//! - The [`ScheduleStrategy`] capability shared by every algorithm
//! - [`RingStrategy`]: neighbour ring, `N - 1` phases
//! - [`HalvingDoublingStrategy`]: hypercube pairing, `ceil(log2 N)` phases
//! - [`BlueprintBuilder`]: per-plane construction, optionally on rayon
//!
//! # Example
//!
//! ```
//! use scatterplan_core::ProblemSize;
//! use scatterplan_strategy::{construct_blueprint, RingStrategy};
//!
//! let size = ProblemSize::new(4, 2).unwrap();
//! let blueprint = construct_blueprint(&RingStrategy, size);
//!
//! assert_eq!(blueprint.plane_count(), 2);
//! assert_eq!(blueprint.phase_count(), 3);
//! ```
//!
//! [`Blueprint`]: scatterplan_core::Blueprint

pub mod builder;
pub mod halving_doubling;
pub mod ring;
pub mod strategy;

pub use builder::{construct_blueprint, BlueprintBuilder};
pub use halving_doubling::HalvingDoublingStrategy;
pub use ring::{RingDirection, RingStrategy};
pub use strategy::{strategy_for, ScheduleStrategy};
