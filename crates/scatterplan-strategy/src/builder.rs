//! Blueprint construction across planes.

use rayon::prelude::*;
use scatterplan_core::{Blueprint, Phase, PlaneId, ProblemSize, Schedule};
use tracing::debug;

use crate::strategy::ScheduleStrategy;

/// Builds blueprints from a strategy.
///
/// With parallelism enabled, planes and the phases within them are built on
/// the current rayon pool. Results are collected in index order, so the
/// blueprint is identical to the sequential one.
///
/// # Example
///
/// ```
/// use scatterplan_core::ProblemSize;
/// use scatterplan_strategy::{BlueprintBuilder, HalvingDoublingStrategy};
///
/// let size = ProblemSize::new(8, 3).unwrap();
/// let parallel = BlueprintBuilder::new(HalvingDoublingStrategy).build(size);
/// let sequential = BlueprintBuilder::new(HalvingDoublingStrategy)
///     .with_parallel(false)
///     .build(size);
///
/// assert_eq!(parallel, sequential);
/// assert_eq!(parallel.phase_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct BlueprintBuilder<S> {
    strategy: S,
    parallel: bool,
}

impl<S: ScheduleStrategy> BlueprintBuilder<S> {
    /// Creates a builder for `strategy`, parallel by default.
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            parallel: true,
        }
    }

    /// Enables or disables rayon construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the wrapped strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Builds the blueprint for `size`.
    ///
    /// A single rank yields `P` empty schedules.
    pub fn build(&self, size: ProblemSize) -> Blueprint {
        let ranks = size.ranks();
        let planes = size.planes();

        let schedules: Vec<Schedule> = if self.parallel {
            (0..planes)
                .into_par_iter()
                .map(|plane| self.build_schedule_parallel(ranks, plane))
                .collect()
        } else {
            (0..planes)
                .map(|plane| self.strategy.build_schedule(ranks, plane))
                .collect()
        };
        let blueprint = Blueprint::new(schedules);

        debug!(
            event = "blueprint_built",
            strategy = self.strategy.name(),
            ranks,
            planes,
            phases = blueprint.phase_count() as u64,
            transfers = blueprint.transfer_count() as u64,
            parallel = self.parallel,
        );

        blueprint
    }

    fn build_schedule_parallel(&self, ranks: u32, plane: PlaneId) -> Schedule {
        let phases: Vec<Phase> = (0..self.strategy.phase_count(ranks))
            .into_par_iter()
            .map(|phase| self.strategy.build_phase(ranks, plane, phase))
            .collect();
        Schedule::new(phases)
    }
}

/// Builds the blueprint for `size` with `strategy` on the current rayon pool.
pub fn construct_blueprint<S: ScheduleStrategy>(strategy: S, size: ProblemSize) -> Blueprint {
    BlueprintBuilder::new(strategy).build(size)
}
