//! Shared test fixtures for ScatterPlan crates.
//!
//! This crate provides hand-built blueprints and shape assertions for
//! testing. It depends only on `scatterplan-core`, so every other crate can
//! use it as a dev-dependency without cycles.
//!
//! - [`blueprints`] - Fixture blueprints (well-formed, malformed, over budget)
//! - [`assert_uniform_shape`] - Checks `P` schedules of equal length with `N` slots per phase
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! scatterplan-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use scatterplan_test::blueprints::{star_blueprint, pair_exchange_blueprint};
//! ```

pub mod blueprints;

use scatterplan_core::{Blueprint, ProblemSize};

pub use blueprints::{
    blueprint_from_fn, pair_exchange_blueprint, short_phase_blueprint, star_blueprint,
    uneven_schedule_blueprint,
};

/// Asserts that `blueprint` has `P` schedules of equal length whose phases
/// all hold exactly `N` actions.
///
/// # Panics
///
/// Panics with a descriptive message on the first violation.
pub fn assert_uniform_shape(blueprint: &Blueprint, size: ProblemSize) {
    let ranks = size.ranks() as usize;
    assert_eq!(
        blueprint.plane_count(),
        size.planes() as usize,
        "plane count for {size}"
    );
    let phases = blueprint.phase_count();
    for (plane, schedule) in blueprint.iter().enumerate() {
        assert_eq!(schedule.len(), phases, "phase count of plane {plane} for {size}");
        for (index, phase) in schedule.iter().enumerate() {
            assert_eq!(
                phase.len(),
                ranks,
                "action count of plane {plane} phase {index} for {size}"
            );
        }
    }
}
