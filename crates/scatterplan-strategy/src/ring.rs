//! Ring reduce-scatter.
//!
//! Every rank forwards one slice to its ring neighbour per phase. After
//! `N - 1` phases each slice has visited every rank. Planes alternate
//! direction by parity so that both directions of every neighbour link
//! carry load.

use scatterplan_core::{Action, Phase, PlaneId, Rank};

use crate::strategy::ScheduleStrategy;

/// Direction of travel around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingDirection {
    /// Rank `r` sends to `(r + 1) mod N`.
    Clockwise,
    /// Rank `r` sends to `(r - 1 + N) mod N`.
    CounterClockwise,
}

impl RingDirection {
    /// Even planes run clockwise, odd planes counter-clockwise.
    pub fn for_plane(plane: PlaneId) -> Self {
        if plane % 2 == 0 {
            RingDirection::Clockwise
        } else {
            RingDirection::CounterClockwise
        }
    }
}

/// Neighbour-to-neighbour ring with `N - 1` phases.
///
/// # Example
///
/// ```
/// use scatterplan_core::Action;
/// use scatterplan_strategy::{RingStrategy, ScheduleStrategy};
///
/// let phase = RingStrategy.build_phase(4, 0, 0);
/// assert_eq!(phase.actions()[0], Action::transfer(0, 1, 0, 3));
/// assert_eq!(phase.actions()[3], Action::transfer(3, 0, 0, 2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RingStrategy;

impl RingStrategy {
    fn action(ranks: u32, rank: Rank, plane: PlaneId, phase: usize) -> Action {
        let n = u64::from(ranks);
        let r = u64::from(rank);
        let p = phase as u64;

        let (dst, slice) = match RingDirection::for_plane(plane) {
            RingDirection::Clockwise => ((r + 1) % n, (r + n - p % n - 1) % n),
            RingDirection::CounterClockwise => ((r + n - 1) % n, (r + p + 1) % n),
        };
        Action::transfer(rank, dst as Rank, plane, slice as u32)
    }
}

impl ScheduleStrategy for RingStrategy {
    fn name(&self) -> &'static str {
        "ring"
    }

    fn phase_count(&self, ranks: u32) -> usize {
        ranks.saturating_sub(1) as usize
    }

    fn build_phase(&self, ranks: u32, plane: PlaneId, phase: usize) -> Phase {
        (0..ranks)
            .map(|rank| Self::action(ranks, rank, plane, phase))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_count() {
        assert_eq!(RingStrategy.phase_count(1), 0);
        assert_eq!(RingStrategy.phase_count(2), 1);
        assert_eq!(RingStrategy.phase_count(33), 32);
    }

    #[test]
    fn test_clockwise_first_phase() {
        let phase = RingStrategy.build_phase(4, 0, 0);
        assert_eq!(
            phase.actions(),
            &[
                Action::transfer(0, 1, 0, 3),
                Action::transfer(1, 2, 0, 0),
                Action::transfer(2, 3, 0, 1),
                Action::transfer(3, 0, 0, 2),
            ]
        );
    }

    #[test]
    fn test_counter_clockwise_first_phase() {
        let phase = RingStrategy.build_phase(4, 1, 0);
        assert_eq!(
            phase.actions(),
            &[
                Action::transfer(0, 3, 1, 1),
                Action::transfer(1, 0, 1, 2),
                Action::transfer(2, 1, 1, 3),
                Action::transfer(3, 2, 1, 0),
            ]
        );
    }

    #[test]
    fn test_clockwise_last_phase_sends_own_successor_slice() {
        // Phase N-2: rank r sends slice (r - N + 1) mod N = (r + 1) mod N.
        let phase = RingStrategy.build_phase(5, 2, 3);
        for action in phase.iter() {
            assert_eq!(action.slice, (action.src + 1) % 5);
            assert_eq!(action.dst, (action.src + 1) % 5);
        }
    }

    #[test]
    fn test_no_idle_actions() {
        let schedule = RingStrategy.build_schedule(7, 3);
        assert_eq!(schedule.len(), 6);
        for phase in schedule.iter() {
            assert_eq!(phase.len(), 7);
            assert_eq!(phase.idle_count(), 0);
        }
    }

    #[test]
    fn test_direction_alternates_by_parity() {
        assert_eq!(RingDirection::for_plane(0), RingDirection::Clockwise);
        assert_eq!(RingDirection::for_plane(1), RingDirection::CounterClockwise);
        assert_eq!(RingDirection::for_plane(6), RingDirection::Clockwise);
    }

    #[test]
    fn test_single_rank_has_empty_schedule() {
        assert!(RingStrategy.build_schedule(1, 0).is_empty());
    }
}
