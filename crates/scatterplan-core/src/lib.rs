//! ScatterPlan Core - Data model for multi-plane reduce-scatter schedules
//!
//! This crate provides the fundamental abstractions for ScatterPlan:
//! - Identifier aliases for ranks, slices and planes
//! - Transfer actions and the phase/schedule/blueprint hierarchy
//! - The validated problem size `(N, P)`
//! - Error types shared by every other crate in the workspace

pub mod blueprint;
pub mod error;
pub mod size;

pub use blueprint::{Action, ActionKind, Blueprint, Phase, Schedule};
pub use error::{Result, ScatterPlanError, StructuralMismatch};
pub use size::ProblemSize;

/// Index of a participant in `[0, N)`.
pub type Rank = u32;

/// Index of the `1/N` data fragment being moved, in `[0, N)`.
pub type SliceId = u32;

/// Index of an independent network channel, in `[0, P)`.
pub type PlaneId = u32;
