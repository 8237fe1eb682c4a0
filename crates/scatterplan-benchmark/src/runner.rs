//! Suite runner.

use std::time::Instant;

use scatterplan::{EvaluationConfig, Evaluator, ProblemSize, StrategyKind};
use tracing::{debug, info};

use crate::config::{SuiteConfig, TestCase};
use crate::error::SuiteError;
use crate::result::{CaseOutcome, Rating, SuiteResult};

/// Evaluates every case of a suite with every configured strategy.
///
/// Per strategy, warmup constructions run first (not measured), then each
/// case is built `run_count` times to time construction and the last
/// blueprint is scored.
///
/// # Example
///
/// ```
/// use scatterplan::StrategyKind;
/// use scatterplan_benchmark::{Suite, SuiteConfig, TestCase};
///
/// let config = SuiteConfig::new("Quick")
///     .with_cases(vec![TestCase::new(4, 2), TestCase::new(8, 3)])
///     .with_strategies(vec![StrategyKind::HalvingDoubling])
///     .with_run_count(1);
///
/// let result = Suite::new(config).run().unwrap();
/// assert_eq!(result.outcomes.len(), 2);
/// assert!(result.outcomes.iter().all(|o| o.is_valid()));
/// ```
#[derive(Debug, Clone)]
pub struct Suite {
    config: SuiteConfig,
}

impl Suite {
    pub fn new(config: SuiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Runs the suite and returns every outcome.
    ///
    /// # Errors
    ///
    /// Fails on an invalid evaluation configuration or a case with zero
    /// ranks or planes.
    pub fn run(&self) -> Result<SuiteResult, SuiteError> {
        let start = Instant::now();
        let mut result = SuiteResult::new(self.config.name());

        info!(
            event = "suite_started",
            suite = self.config.name(),
            cases = self.config.cases().len() as u64,
            strategies = self.config.strategies().len() as u64,
        );

        for &strategy in self.config.strategies() {
            let evaluator = self.evaluator(strategy)?;
            self.warm_up(&evaluator)?;

            for &case in self.config.cases() {
                result.add_outcome(self.run_case(&evaluator, strategy, case)?);
            }
        }

        result.duration = start.elapsed();

        for summary in result.summaries() {
            debug!(
                event = "strategy_summary",
                suite = self.config.name(),
                strategy = summary.strategy.name(),
                total_score = summary.total_score,
                average_score = summary.average_score,
                valid = summary.valid_count as u64,
            );
        }
        let average_score = result.overall_average();
        info!(
            event = "suite_finished",
            suite = self.config.name(),
            duration_ms = result.duration.as_millis() as u64,
            average_score,
            rating = Rating::from_average(average_score).label(),
        );

        Ok(result)
    }

    fn evaluator(&self, strategy: StrategyKind) -> Result<Evaluator, SuiteError> {
        let config: EvaluationConfig = self.config.evaluation().clone().with_strategy(strategy);
        Ok(Evaluator::new(config)?)
    }

    fn warm_up(&self, evaluator: &Evaluator) -> Result<(), SuiteError> {
        let Some(case) = self.config.cases().first() else {
            return Ok(());
        };
        for _ in 0..self.config.warmup_count() {
            evaluator.build_blueprint(case.rank_size, case.plane_num)?;
        }
        Ok(())
    }

    fn run_case(
        &self,
        evaluator: &Evaluator,
        strategy: StrategyKind,
        case: TestCase,
    ) -> Result<CaseOutcome, SuiteError> {
        let size = ProblemSize::new(case.rank_size, case.plane_num)?;
        let runs = self.config.run_count().max(1);

        let start = Instant::now();
        let mut blueprint = evaluator.build_blueprint(case.rank_size, case.plane_num)?;
        for _ in 1..runs {
            blueprint = evaluator.build_blueprint(case.rank_size, case.plane_num)?;
        }
        let construction_time = start.elapsed() / runs as u32;

        let evaluation = evaluator.evaluate_blueprint(&blueprint, size);
        Ok(CaseOutcome {
            case,
            strategy,
            evaluation,
            construction_time,
            transfers: blueprint.transfer_count(),
        })
    }
}
