//! Tests for blueprint containers.

use super::*;

fn two_rank_phase(plane: u32) -> Phase {
    Phase::new(vec![
        Action::transfer(0, 1, plane, 0),
        Action::transfer(1, 0, plane, 1),
    ])
}

#[test]
fn test_empty_blueprint_has_zero_phases() {
    let blueprint = Blueprint::default();
    assert_eq!(blueprint.plane_count(), 0);
    assert_eq!(blueprint.phase_count(), 0);
    assert_eq!(blueprint.action_count(), 0);
}

#[test]
fn test_phase_count_reads_first_schedule() {
    let blueprint = Blueprint::new(vec![
        Schedule::new(vec![two_rank_phase(0), two_rank_phase(0)]),
        Schedule::new(vec![two_rank_phase(1)]),
    ]);
    assert_eq!(blueprint.phase_count(), 2);
    assert_eq!(blueprint.action_count(), 6);
}

#[test]
fn test_idle_actions_are_not_transfers() {
    let phase = Phase::new(vec![
        Action::transfer(0, 1, 0, 0),
        Action::transfer(0, 1, 0, 1),
        Action::idle(2, 0, 2),
    ]);
    assert_eq!(phase.len(), 3);
    assert_eq!(phase.idle_count(), 1);
    assert_eq!(phase.transfers().count(), 2);
}

#[test]
fn test_same_rank_transfer_is_not_idle() {
    let local = Action::transfer(3, 3, 0, 1);
    assert!(!local.is_idle());
    assert!(!local.moves_data());
}

#[test]
fn test_link_is_unordered() {
    assert_eq!(Action::transfer(5, 2, 0, 0).link(), (2, 5));
    assert_eq!(Action::transfer(2, 5, 1, 0).link(), (2, 5));
}

#[test]
fn test_phases_at_skips_short_schedules() {
    let blueprint = Blueprint::new(vec![
        Schedule::new(vec![two_rank_phase(0), two_rank_phase(0)]),
        Schedule::new(vec![two_rank_phase(1)]),
    ]);
    assert_eq!(blueprint.phases_at(0).count(), 2);
    assert_eq!(blueprint.phases_at(1).count(), 1);
    assert_eq!(blueprint.phases_at(2).count(), 0);
}

#[test]
fn test_collect_from_iterators() {
    let blueprint: Blueprint = (0..3)
        .map(|plane| (0..2).map(|_| two_rank_phase(plane)).collect::<Schedule>())
        .collect();
    assert_eq!(blueprint.plane_count(), 3);
    assert_eq!(blueprint.phase_count(), 2);
    assert_eq!(blueprint.transfer_count(), 12);
}

#[test]
fn test_action_display() {
    assert_eq!(
        Action::transfer(0, 1, 2, 3).to_string(),
        "0->1 slice 3 @plane 2"
    );
    assert_eq!(Action::idle(4, 0, 4).to_string(), "4 idle @plane 0");
}
