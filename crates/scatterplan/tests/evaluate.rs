//! End-to-end evaluation through the public API.

use std::collections::BTreeSet;
use std::io::Write;

use scatterplan::prelude::*;
use scatterplan::{
    CostModel, LinkAllocationPolicy, ScatterPlanError, WorkerCount,
};
use scatterplan_test::star_blueprint;

const DEFAULT_CASES: [(u32, u32); 10] = [
    (4, 2),
    (4, 6),
    (5, 2),
    (5, 4),
    (10, 4),
    (10, 10),
    (32, 6),
    (33, 4),
    (64, 8),
    (128, 18),
];

fn evaluator(strategy: StrategyKind) -> Evaluator {
    Evaluator::new(EvaluationConfig::default().with_strategy(strategy)).unwrap()
}

fn pairs(phase: &Phase) -> BTreeSet<(u32, u32)> {
    phase
        .iter()
        .filter(|a| a.moves_data())
        .map(|a| (a.src, a.dst))
        .collect()
}

#[test]
fn blueprint_has_one_schedule_per_plane() {
    for strategy in StrategyKind::ALL {
        let evaluator = evaluator(strategy);
        for (n, p) in [(1, 1), (1, 5), (2, 3), (7, 1), (16, 9)] {
            let blueprint = evaluator.build_blueprint(n, p).unwrap();
            assert_eq!(blueprint.plane_count(), p as usize, "{strategy} N={n} P={p}");
        }
    }
}

#[test]
fn phase_count_depends_only_on_ranks() {
    for strategy in StrategyKind::ALL {
        let evaluator = evaluator(strategy);
        for n in 1..20 {
            let counts: BTreeSet<usize> = (1..6)
                .flat_map(|p| {
                    evaluator
                        .build_blueprint(n, p)
                        .unwrap()
                        .iter()
                        .map(|schedule| schedule.len())
                        .collect::<Vec<_>>()
                })
                .collect();
            assert_eq!(counts.len(), 1, "{strategy} N={n}: {counts:?}");
        }
    }
}

#[test]
fn every_phase_has_one_action_per_rank() {
    for strategy in StrategyKind::ALL {
        let evaluator = evaluator(strategy);
        for (n, p) in DEFAULT_CASES {
            let blueprint = evaluator.build_blueprint(n, p).unwrap();
            for schedule in blueprint.iter() {
                assert!(schedule.iter().all(|phase| phase.len() == n as usize));
            }
        }
    }
}

#[test]
fn ring_first_phase_for_four_ranks() {
    let blueprint = evaluator(StrategyKind::Ring).build_blueprint(4, 1).unwrap();
    let phase = &blueprint.schedules()[0].phases()[0];
    let actions: Vec<(u32, u32, u32)> = phase.iter().map(|a| (a.src, a.dst, a.slice)).collect();
    assert_eq!(actions, vec![(0, 1, 3), (1, 2, 0), (2, 3, 1), (3, 0, 2)]);
}

#[test]
fn halving_doubling_pairs_for_four_ranks() {
    let blueprint = evaluator(StrategyKind::HalvingDoubling)
        .build_blueprint(4, 1)
        .unwrap();
    let schedule = &blueprint.schedules()[0];

    assert_eq!(schedule.len(), 2);
    assert!(schedule.iter().all(|phase| phase.idle_count() == 0));
    assert_eq!(
        pairs(&schedule.phases()[0]),
        BTreeSet::from([(0, 1), (2, 3)])
    );
    assert_eq!(
        pairs(&schedule.phases()[1]),
        BTreeSet::from([(0, 2), (1, 3)])
    );
}

#[test]
fn halving_doubling_idles_for_five_ranks() {
    let blueprint = evaluator(StrategyKind::HalvingDoubling)
        .build_blueprint(5, 2)
        .unwrap();

    assert_eq!(blueprint.phase_count(), 3);
    assert!(blueprint.actions().any(|a| a.is_idle()));
    assert!(blueprint
        .iter()
        .all(|schedule| schedule.iter().all(|phase| phase.len() == 5)));
}

#[test]
fn degree_over_budget_scores_zero() {
    let evaluator = evaluator(StrategyKind::Ring);
    let size = ProblemSize::new(8, 3).unwrap();
    let evaluation = evaluator.evaluate_blueprint(&star_blueprint(8, 3), size);

    assert!(matches!(evaluation.validity, Validity::CapacityInfeasible(_)));
    assert_eq!(evaluation.score, 0.0);
    assert_eq!(evaluation.estimated_time, None);
}

#[test]
fn single_plane_ring_is_infeasible() {
    // Every rank talks to both neighbours but owns one plane.
    let evaluation = evaluator(StrategyKind::Ring).evaluate(6, 1).unwrap();
    assert_eq!(evaluation.validity.name(), "CAPACITY_INFEASIBLE");
    assert_eq!(evaluation.score, 0.0);
}

#[test]
fn single_rank_is_trivially_ideal() {
    for strategy in StrategyKind::ALL {
        let evaluation = evaluator(strategy).evaluate(1, 3).unwrap();
        assert_eq!(evaluation.phase_count, 0);
        assert_eq!(evaluation.estimated_time, Some(0.0));
        assert_eq!(evaluation.min_time, 0.0);
        assert_eq!(evaluation.score, 100.0);
    }
}

#[test]
fn transfer_time_never_grows_with_plane_budget() {
    for strategy in StrategyKind::ALL {
        let blueprint = evaluator(strategy).build_blueprint(16, 4).unwrap();
        let model = CostModel::default().with_link_allocation(LinkAllocationPolicy::SpreadHeadroom);
        let transfers: Vec<f64> = (4..=12)
            .map(|budget| {
                let size = ProblemSize::new(16, budget).unwrap();
                model
                    .estimate_time(&blueprint, size)
                    .breakdown()
                    .map(|b| b.transfer)
                    .unwrap()
            })
            .collect();
        assert!(
            transfers.windows(2).all(|w| w[1] <= w[0]),
            "{strategy}: {transfers:?}"
        );
    }
}

#[test]
fn scoring_boundaries() {
    let scorer = Scorer::default();
    assert_eq!(scorer.score(0.25, 0.25), 100.0);
    assert!((scorer.score(0.5, 0.25) - 22.31).abs() < 0.01);
}

#[test]
fn evaluation_is_deterministic() {
    for strategy in StrategyKind::ALL {
        let evaluator = evaluator(strategy);
        for (n, p) in DEFAULT_CASES {
            assert_eq!(
                evaluator.build_blueprint(n, p).unwrap(),
                evaluator.build_blueprint(n, p).unwrap()
            );
            let first = evaluator.evaluate(n, p).unwrap();
            let second = evaluator.evaluate(n, p).unwrap();
            assert_eq!(first.score.to_bits(), second.score.to_bits());
            assert_eq!(first, second);
        }
    }
}

#[test]
fn sequential_workers_match_parallel() {
    let parallel = evaluator(StrategyKind::Ring);
    let sequential = Evaluator::new(
        EvaluationConfig::default().with_worker_count(WorkerCount::None),
    )
    .unwrap();
    for (n, p) in DEFAULT_CASES {
        assert_eq!(
            parallel.evaluate(n, p).unwrap(),
            sequential.evaluate(n, p).unwrap()
        );
    }
}

#[test]
fn default_cases_score_within_bounds() {
    for strategy in StrategyKind::ALL {
        let evaluator = evaluator(strategy);
        for (n, p) in DEFAULT_CASES {
            let evaluation = evaluator.evaluate(n, p).unwrap();
            assert!(
                (0.0..=100.0).contains(&evaluation.score),
                "{strategy} N={n} P={p}: {}",
                evaluation.score
            );
            assert!(evaluation.min_time > 0.0);
            if evaluation.validity.is_valid() {
                assert!(evaluation.estimated_time.unwrap() > 0.0);
            }
        }
    }
}

#[test]
fn zero_counts_are_rejected() {
    assert!(matches!(
        scatterplan::evaluate(0, 4),
        Err(ScatterPlanError::InvalidProblemSize { .. })
    ));
    assert!(scatterplan::evaluate(4, 0).is_err());
}

#[test]
fn evaluator_loads_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
strategy = "halving_doubling"
worker_count = "none"

[scoring]
max_score = 10.0
"#
    )
    .unwrap();

    let evaluator = Evaluator::load(file.path()).unwrap();
    assert_eq!(evaluator.strategy().name(), "halving_doubling");

    let evaluation = evaluator.evaluate(1, 2).unwrap();
    assert_eq!(evaluation.score, 10.0);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Evaluator::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ScatterPlanError::Config(_)));
}
