//! Error types for ScatterPlan

use thiserror::Error;

use crate::{PlaneId, Rank};

/// Main error type for ScatterPlan operations
#[derive(Debug, Error)]
pub enum ScatterPlanError {
    /// Rank count or plane count was zero
    #[error("Invalid problem size: {ranks} ranks, {planes} planes (both must be at least 1)")]
    InvalidProblemSize { ranks: u32, planes: u32 },

    /// Blueprint shape disagrees with the declared problem size
    #[error("Structural mismatch: {0}")]
    Structure(#[from] StructuralMismatch),

    /// Error in evaluation configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker pool could not be created
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type alias for ScatterPlan operations
pub type Result<T> = std::result::Result<T, ScatterPlanError>;

/// The first way a blueprint's shape disagrees with its declared `(N, P)`.
///
/// Variants are listed in the order the validator checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralMismatch {
    #[error("expected {expected} schedules, found {actual}")]
    PlaneCount { expected: usize, actual: usize },

    #[error("plane {plane} has {actual} phases but plane 0 has {expected}")]
    PhaseCount {
        plane: usize,
        expected: usize,
        actual: usize,
    },

    #[error("plane {plane} phase {phase} has {actual} actions, expected {expected}")]
    ActionCount {
        plane: usize,
        phase: usize,
        expected: usize,
        actual: usize,
    },

    #[error("plane {plane} phase {phase} references rank {rank} outside [0, {ranks})")]
    RankOutOfRange {
        plane: usize,
        phase: usize,
        rank: Rank,
        ranks: u32,
    },

    #[error("action in schedule {plane} is tagged with plane {tagged}")]
    PlaneMismatch { plane: usize, tagged: PlaneId },
}
