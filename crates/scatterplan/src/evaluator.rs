//! Evaluation entry point that hides all internal wiring.

use std::fmt;
use std::path::Path;

use rayon::{ThreadPool, ThreadPoolBuilder};
use scatterplan_config::{EvaluationConfig, WorkerCount};
use scatterplan_core::{Blueprint, ProblemSize, Result, ScatterPlanError, StructuralMismatch};
use scatterplan_scoring::{
    validate_blueprint, CapacityViolation, CostEstimate, CostModel, Scorer, TimeBreakdown,
};
use scatterplan_strategy::{strategy_for, BlueprintBuilder, ScheduleStrategy};
use tracing::{info, warn};

/// How far a blueprint got through the evaluation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Validity {
    /// Shape matched and the plane budget was respected.
    Valid,
    /// Shape disagreed with the declared problem size.
    StructuralMismatch(StructuralMismatch),
    /// Some rank needed more link partners than there are planes.
    CapacityInfeasible(CapacityViolation),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    /// Returns the upper-case tag used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Validity::Valid => "VALID",
            Validity::StructuralMismatch(_) => "STRUCTURAL_MISMATCH",
            Validity::CapacityInfeasible(_) => "CAPACITY_INFEASIBLE",
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Valid => f.write_str(self.name()),
            Validity::StructuralMismatch(err) => write!(f, "{}: {err}", self.name()),
            Validity::CapacityInfeasible(violation) => write!(f, "{}: {violation}", self.name()),
        }
    }
}

/// Diagnostics of one evaluated blueprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Declared problem size.
    pub size: ProblemSize,
    /// Score in `[0, max_score]`; 0 unless [`Validity::Valid`].
    pub score: f64,
    /// Phase count of schedule 0.
    pub phase_count: usize,
    /// Estimated time; `None` unless [`Validity::Valid`].
    pub estimated_time: Option<f64>,
    /// Theoretical lower bound.
    pub min_time: f64,
    pub validity: Validity,
    /// Latency and transfer components; `None` unless [`Validity::Valid`].
    pub breakdown: Option<TimeBreakdown>,
}

impl Evaluation {
    /// Returns `estimated_time / min_time` for valid evaluations.
    pub fn overhead_ratio(&self) -> Option<f64> {
        self.estimated_time
            .filter(|_| self.min_time > 0.0)
            .map(|t| t / self.min_time)
    }
}

/// Builds, validates and scores blueprints under one configuration.
///
/// # Example
///
/// ```
/// use scatterplan::{EvaluationConfig, Evaluator, StrategyKind};
///
/// let evaluator = Evaluator::new(
///     EvaluationConfig::new().with_strategy(StrategyKind::HalvingDoubling),
/// )
/// .unwrap();
///
/// let evaluation = evaluator.evaluate(8, 3).unwrap();
/// assert_eq!(evaluation.phase_count, 3);
/// assert!(evaluation.validity.is_valid());
/// ```
#[derive(Debug)]
pub struct Evaluator {
    config: EvaluationConfig,
    strategy: Box<dyn ScheduleStrategy>,
    model: CostModel,
    scorer: Scorer,
    pool: Option<ThreadPool>,
}

impl Evaluator {
    /// Creates an evaluator for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a dedicated
    /// worker pool cannot be started.
    pub fn new(config: EvaluationConfig) -> Result<Self> {
        config.validate()?;

        let parallel = config.worker_count != WorkerCount::None;
        let pool = match config.worker_count {
            WorkerCount::Count(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("scatterplan-worker-{i}"))
                    .build()
                    .map_err(|err| ScatterPlanError::ThreadPool(err.to_string()))?,
            ),
            WorkerCount::Auto | WorkerCount::None => None,
        };

        let model = CostModel::new(config.cost)
            .with_lower_bound(config.lower_bound)
            .with_link_allocation(config.link_allocation)
            .with_parallel(parallel);

        Ok(Self {
            strategy: strategy_for(config.strategy),
            scorer: Scorer::new(config.scoring),
            model,
            pool,
            config,
        })
    }

    /// Creates an evaluator from a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(EvaluationConfig::load(path)?)
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Returns the configured strategy.
    pub fn strategy(&self) -> &dyn ScheduleStrategy {
        self.strategy.as_ref()
    }

    /// Builds the blueprint of the configured strategy for `N` ranks and `P` planes.
    pub fn build_blueprint(&self, ranks: u32, planes: u32) -> Result<Blueprint> {
        let size = ProblemSize::new(ranks, planes)?;
        Ok(self.construct(size))
    }

    /// Builds and scores the configured strategy for `N` ranks and `P` planes.
    ///
    /// # Errors
    ///
    /// Returns [`ScatterPlanError::InvalidProblemSize`] if either count is
    /// zero. Structural and capacity failures are reported through
    /// [`Evaluation::validity`].
    pub fn evaluate(&self, ranks: u32, planes: u32) -> Result<Evaluation> {
        let size = ProblemSize::new(ranks, planes)?;
        let blueprint = self.construct(size);
        Ok(self.evaluate_blueprint(&blueprint, size))
    }

    /// Validates and scores an already built blueprint.
    pub fn evaluate_blueprint(&self, blueprint: &Blueprint, size: ProblemSize) -> Evaluation {
        let phase_count = blueprint.phase_count();
        let min_time = self.model.theoretical_min_time(size, phase_count);

        let evaluation = match validate_blueprint(blueprint, size) {
            Err(mismatch) => {
                warn!(
                    event = "structural_mismatch",
                    ranks = size.ranks(),
                    planes = size.planes(),
                    error = %mismatch,
                );
                Evaluation {
                    size,
                    score: 0.0,
                    phase_count,
                    estimated_time: None,
                    min_time,
                    validity: Validity::StructuralMismatch(mismatch),
                    breakdown: None,
                }
            }
            Ok(()) => {
                let estimate = self.install(|| self.model.estimate_time(blueprint, size));
                let score = self.scorer.score_estimate(&estimate, min_time);
                match estimate {
                    CostEstimate::Feasible(breakdown) => Evaluation {
                        size,
                        score,
                        phase_count,
                        estimated_time: Some(breakdown.total()),
                        min_time,
                        validity: Validity::Valid,
                        breakdown: Some(breakdown),
                    },
                    CostEstimate::Infeasible(violation) => Evaluation {
                        size,
                        score,
                        phase_count,
                        estimated_time: None,
                        min_time,
                        validity: Validity::CapacityInfeasible(violation),
                        breakdown: None,
                    },
                }
            }
        };

        info!(
            event = "evaluation",
            strategy = self.strategy.name(),
            ranks = size.ranks(),
            planes = size.planes(),
            phase_count = phase_count as u64,
            transfers = blueprint.transfer_count() as u64,
            estimated_time = evaluation.estimated_time.unwrap_or(f64::NAN),
            min_time,
            score = evaluation.score,
            validity = evaluation.validity.name(),
        );

        evaluation
    }

    fn construct(&self, size: ProblemSize) -> Blueprint {
        let parallel = self.config.worker_count != WorkerCount::None;
        self.install(|| {
            BlueprintBuilder::new(self.strategy.as_ref())
                .with_parallel(parallel)
                .build(size)
        })
    }

    fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Evaluates the default ring strategy for `N` ranks and `P` planes.
///
/// # Example
///
/// ```
/// let evaluation = scatterplan::evaluate(4, 2).unwrap();
///
/// assert_eq!(evaluation.phase_count, 3);
/// assert!(evaluation.score > 0.0 && evaluation.score <= 100.0);
/// assert!(scatterplan::evaluate(0, 2).is_err());
/// ```
pub fn evaluate(ranks: u32, planes: u32) -> Result<Evaluation> {
    Evaluator::new(EvaluationConfig::default())?.evaluate(ranks, planes)
}
