//! Fixture blueprints.
//!
//! Provides small blueprints with known traffic patterns, useful for
//! testing the validator and the cost model independently of the
//! construction strategies.

use scatterplan_core::{Action, Blueprint, Phase, PlaneId, Rank, Schedule};

/// Builds a `planes x phases x ranks` blueprint from a per-slot function.
///
/// `action(plane, phase, rank)` fills the slot of `rank`.
pub fn blueprint_from_fn<F>(ranks: u32, planes: u32, phases: usize, action: F) -> Blueprint
where
    F: Fn(PlaneId, usize, Rank) -> Action,
{
    (0..planes)
        .map(|plane| {
            (0..phases)
                .map(|phase| (0..ranks).map(|rank| action(plane, phase, rank)).collect::<Phase>())
                .collect::<Schedule>()
        })
        .collect()
}

/// Two ranks swapping slices once per plane.
///
/// Every plane has one phase `[0 -> 1 (slice 1), 1 -> 0 (slice 0)]`, so the
/// only link is `{0, 1}` and each rank has degree 1.
pub fn pair_exchange_blueprint(planes: u32) -> Blueprint {
    blueprint_from_fn(2, planes, 1, |plane, _, rank| {
        Action::transfer(rank, 1 - rank, plane, 1 - rank)
    })
}

/// Rank 0 sends a slice to every other rank in a single phase.
///
/// Rank 0 ends up with `ranks - 1` distinct partners, which exceeds any
/// plane budget smaller than that. Its own slot is idle.
pub fn star_blueprint(ranks: u32, planes: u32) -> Blueprint {
    blueprint_from_fn(ranks, planes, 1, |plane, _, rank| {
        if rank == 0 {
            Action::idle(0, plane, 0)
        } else {
            Action::transfer(0, rank, plane, rank)
        }
    })
}

/// A two-plane blueprint whose second plane is one phase short.
pub fn uneven_schedule_blueprint(ranks: u32) -> Blueprint {
    let full = |plane: PlaneId, phases: usize| -> Schedule {
        (0..phases)
            .map(|_| {
                (0..ranks)
                    .map(|rank| Action::transfer(rank, (rank + 1) % ranks, plane, rank))
                    .collect::<Phase>()
            })
            .collect()
    };
    Blueprint::new(vec![full(0, 2), full(1, 1)])
}

/// A one-plane, one-phase blueprint missing the last rank's slot.
pub fn short_phase_blueprint(ranks: u32) -> Blueprint {
    let phase: Phase = (0..ranks.saturating_sub(1))
        .map(|rank| Action::transfer(rank, (rank + 1) % ranks, 0, rank))
        .collect();
    Blueprint::new(vec![Schedule::new(vec![phase])])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blueprint_from_fn_shape() {
        let blueprint = blueprint_from_fn(3, 2, 4, |plane, _, rank| Action::idle(rank, plane, rank));
        assert_eq!(blueprint.plane_count(), 2);
        assert_eq!(blueprint.phase_count(), 4);
        assert_eq!(blueprint.action_count(), 24);
        assert_eq!(blueprint.transfer_count(), 0);
    }

    #[test]
    fn test_star_blueprint() {
        let blueprint = star_blueprint(5, 2);
        assert_eq!(blueprint.transfer_count(), 8);
        assert!(blueprint.actions().filter(|a| a.moves_data()).all(|a| a.src == 0));
    }

    #[test]
    fn test_malformed_fixtures() {
        let uneven = uneven_schedule_blueprint(3);
        assert_eq!(uneven.schedules()[0].len(), 2);
        assert_eq!(uneven.schedules()[1].len(), 1);

        let short = short_phase_blueprint(4);
        assert_eq!(short.schedules()[0].phases()[0].len(), 3);
    }
}
