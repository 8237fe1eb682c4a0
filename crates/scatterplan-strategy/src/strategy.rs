//! The schedule-construction capability.

use std::fmt::Debug;

use scatterplan_config::StrategyKind;
use scatterplan_core::{Phase, PlaneId, Schedule};

use crate::halving_doubling::HalvingDoublingStrategy;
use crate::ring::RingStrategy;

/// An algorithm producing one plane's schedule for `N` ranks.
///
/// Implementations are pure: a phase depends only on `(N, plane, phase)`,
/// never on previously built phases, so planes and phases may be built in
/// any order or concurrently.
///
/// Every phase returned by [`build_phase`](Self::build_phase) must hold
/// exactly `N` actions, one slot per rank in rank order, with
/// [`Action::idle`](scatterplan_core::Action::idle) filling the slot of a
/// rank that has no partner.
pub trait ScheduleStrategy: Send + Sync + Debug {
    /// Returns the name of this strategy.
    fn name(&self) -> &'static str;

    /// Returns the phase count `K` for `ranks` participants.
    fn phase_count(&self, ranks: u32) -> usize;

    /// Builds phase `phase` of the schedule on `plane`.
    fn build_phase(&self, ranks: u32, plane: PlaneId, phase: usize) -> Phase;

    /// Builds the whole schedule of `plane`.
    fn build_schedule(&self, ranks: u32, plane: PlaneId) -> Schedule {
        (0..self.phase_count(ranks))
            .map(|phase| self.build_phase(ranks, plane, phase))
            .collect()
    }
}

impl<T: ScheduleStrategy + ?Sized> ScheduleStrategy for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn phase_count(&self, ranks: u32) -> usize {
        (**self).phase_count(ranks)
    }

    fn build_phase(&self, ranks: u32, plane: PlaneId, phase: usize) -> Phase {
        (**self).build_phase(ranks, plane, phase)
    }
}

impl<T: ScheduleStrategy + ?Sized> ScheduleStrategy for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn phase_count(&self, ranks: u32) -> usize {
        (**self).phase_count(ranks)
    }

    fn build_phase(&self, ranks: u32, plane: PlaneId, phase: usize) -> Phase {
        (**self).build_phase(ranks, plane, phase)
    }
}

/// Resolves a configured strategy kind to its implementation.
///
/// # Example
///
/// ```
/// use scatterplan_config::StrategyKind;
/// use scatterplan_strategy::strategy_for;
///
/// let strategy = strategy_for(StrategyKind::HalvingDoubling);
/// assert_eq!(strategy.name(), "halving_doubling");
/// assert_eq!(strategy.phase_count(5), 3);
/// ```
pub fn strategy_for(kind: StrategyKind) -> Box<dyn ScheduleStrategy> {
    match kind {
        StrategyKind::Ring => Box::new(RingStrategy),
        StrategyKind::HalvingDoubling => Box::new(HalvingDoublingStrategy),
    }
}
