//! Structural validation of blueprints.
//!
//! Checks the shape of a blueprint against its declared problem size.
//! Detects, in order:
//! - Wrong number of schedules
//! - Schedules whose phase count differs from schedule 0
//! - Phases without exactly one slot per rank
//! - Actions naming a rank outside `[0, N)` or tagged with another plane
//!
//! Whether slices actually reach their owners is not checked.

use scatterplan_core::{Blueprint, ProblemSize, StructuralMismatch};

/// Validates the shape of `blueprint` for `size`.
///
/// Stops at the first violation.
///
/// # Examples
///
/// ```
/// use scatterplan_core::{Blueprint, ProblemSize, StructuralMismatch};
/// use scatterplan_scoring::validate_blueprint;
///
/// let size = ProblemSize::new(4, 2).unwrap();
/// let err = validate_blueprint(&Blueprint::default(), size).unwrap_err();
/// assert_eq!(err, StructuralMismatch::PlaneCount { expected: 2, actual: 0 });
/// ```
pub fn validate_blueprint(
    blueprint: &Blueprint,
    size: ProblemSize,
) -> Result<(), StructuralMismatch> {
    let planes = size.planes() as usize;
    let ranks = size.ranks() as usize;

    if blueprint.plane_count() != planes {
        return Err(StructuralMismatch::PlaneCount {
            expected: planes,
            actual: blueprint.plane_count(),
        });
    }

    let expected_phases = blueprint.phase_count();
    for (plane, schedule) in blueprint.iter().enumerate().skip(1) {
        if schedule.len() != expected_phases {
            return Err(StructuralMismatch::PhaseCount {
                plane,
                expected: expected_phases,
                actual: schedule.len(),
            });
        }
    }

    for (plane, schedule) in blueprint.iter().enumerate() {
        for (phase, actions) in schedule.iter().enumerate() {
            if actions.len() != ranks {
                return Err(StructuralMismatch::ActionCount {
                    plane,
                    phase,
                    expected: ranks,
                    actual: actions.len(),
                });
            }
        }
    }

    for (plane, schedule) in blueprint.iter().enumerate() {
        for (phase, actions) in schedule.iter().enumerate() {
            for action in actions {
                if let Some(rank) = [action.src, action.dst]
                    .into_iter()
                    .find(|&rank| rank >= size.ranks())
                {
                    return Err(StructuralMismatch::RankOutOfRange {
                        plane,
                        phase,
                        rank,
                        ranks: size.ranks(),
                    });
                }
                if action.plane as usize != plane {
                    return Err(StructuralMismatch::PlaneMismatch {
                        plane,
                        tagged: action.plane,
                    });
                }
            }
        }
    }

    Ok(())
}
