//! Latency + contention cost model
//!
//! Estimates the communication time of a blueprint from two first-order
//! effects:
//! - a fixed start-up latency per phase, `T1 = K * L`
//! - bandwidth lost to link sharing, `T2 = S / (N * B) * sum_k bottleneck(k)`
//!
//! where `bottleneck(k)` is the worst transfers-per-link ratio of phase `k`
//! over all planes, or 1 for a phase without transfers. Routing is not
//! simulated.

mod allocation;
mod traffic;


use rayon::prelude::*;
use scatterplan_config::{CostConstants, LinkAllocationPolicy, LowerBoundPolicy};
use scatterplan_core::{Blueprint, ProblemSize, Rank};
use thiserror::Error;
use tracing::{debug, warn};

pub use allocation::LinkAllocation;
pub use traffic::TrafficMatrix;

/// A rank needs more distinct link partners than there are planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rank {rank} needs {degree} link partners but only {planes} planes are available")]
pub struct CapacityViolation {
    /// Lowest offending rank.
    pub rank: Rank,
    /// Distinct partners of that rank.
    pub degree: u32,
    /// Plane budget `P`.
    pub planes: u32,
}

/// Time components of a feasible estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBreakdown {
    /// Phase count `K`.
    pub phase_count: usize,
    /// Start-up latency `T1`.
    pub latency: f64,
    /// Contention-driven transfer time `T2`.
    pub transfer: f64,
    /// Bottleneck factor of each phase, in phase order.
    pub bottlenecks: Vec<f64>,
}

impl TimeBreakdown {
    /// Returns `T1 + T2`.
    pub fn total(&self) -> f64 {
        self.latency + self.transfer
    }
}

/// Outcome of a time estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum CostEstimate {
    /// The blueprint fits the plane budget.
    Feasible(TimeBreakdown),
    /// Some rank needs more link partners than there are planes.
    Infeasible(CapacityViolation),
}

impl CostEstimate {
    /// Returns true for a feasible estimate.
    pub fn is_feasible(&self) -> bool {
        matches!(self, CostEstimate::Feasible(_))
    }

    /// Returns the estimated total time, if feasible.
    pub fn total(&self) -> Option<f64> {
        match self {
            CostEstimate::Feasible(breakdown) => Some(breakdown.total()),
            CostEstimate::Infeasible(_) => None,
        }
    }

    /// Returns the time breakdown, if feasible.
    pub fn breakdown(&self) -> Option<&TimeBreakdown> {
        match self {
            CostEstimate::Feasible(breakdown) => Some(breakdown),
            CostEstimate::Infeasible(_) => None,
        }
    }
}

/// Analytical time model for blueprints.
///
/// # Example
///
/// ```
/// use scatterplan_config::CostConstants;
/// use scatterplan_core::ProblemSize;
/// use scatterplan_scoring::CostModel;
///
/// let model = CostModel::new(CostConstants {
///     latency: 1.0,
///     slice_size: 8.0,
///     bandwidth: 1.0,
/// });
/// let size = ProblemSize::new(4, 2).unwrap();
///
/// // ceil(log2 4) * 1.0 + (3/4 * 8.0) / (1.0 * 2)
/// assert_eq!(model.theoretical_min_time(size, 3), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct CostModel {
    constants: CostConstants,
    lower_bound: LowerBoundPolicy,
    link_allocation: LinkAllocationPolicy,
    parallel: bool,
}

impl CostModel {
    /// Creates a model with the default policies, aggregating in parallel.
    pub fn new(constants: CostConstants) -> Self {
        Self {
            constants,
            lower_bound: LowerBoundPolicy::default(),
            link_allocation: LinkAllocationPolicy::default(),
            parallel: true,
        }
    }

    /// Sets the lower-bound phase floor.
    pub fn with_lower_bound(mut self, lower_bound: LowerBoundPolicy) -> Self {
        self.lower_bound = lower_bound;
        self
    }

    /// Sets the link allocation policy.
    pub fn with_link_allocation(mut self, link_allocation: LinkAllocationPolicy) -> Self {
        self.link_allocation = link_allocation;
        self
    }

    /// Enables or disables rayon aggregation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the cost constants.
    pub fn constants(&self) -> &CostConstants {
        &self.constants
    }

    /// Returns the phase floor of the lower bound.
    ///
    /// `strategy_phases` is the phase count of the strategy under test and
    /// is only consulted by [`LowerBoundPolicy::StrategyPhases`].
    pub fn phase_floor(&self, size: ProblemSize, strategy_phases: usize) -> usize {
        match self.lower_bound {
            LowerBoundPolicy::Logarithmic => size.log2_ceil() as usize,
            LowerBoundPolicy::Ring => size.ranks().saturating_sub(1) as usize,
            LowerBoundPolicy::StrategyPhases => strategy_phases,
        }
    }

    /// Returns `T_min = floor * L + ((N - 1) / N * S) / (B * P)`.
    pub fn theoretical_min_time(&self, size: ProblemSize, strategy_phases: usize) -> f64 {
        let CostConstants {
            latency,
            slice_size,
            bandwidth,
        } = self.constants;
        let n = f64::from(size.ranks());
        let p = f64::from(size.planes());

        let t1_min = self.phase_floor(size, strategy_phases) as f64 * latency;
        let t2_min = ((n - 1.0) / n * slice_size) / (bandwidth * p);
        t1_min + t2_min
    }

    /// Estimates the communication time of a validated blueprint.
    ///
    /// Returns [`CostEstimate::Infeasible`] when a rank's distinct link
    /// partners exceed `P`.
    pub fn estimate_time(&self, blueprint: &Blueprint, size: ProblemSize) -> CostEstimate {
        let phase_count = blueprint.phase_count();
        let latency = phase_count as f64 * self.constants.latency;

        let traffic = TrafficMatrix::from_blueprint(blueprint, self.parallel);
        let mut links = LinkAllocation::single_link(&traffic, size.ranks());
        if let Err(violation) = links.check_degree(size.planes()) {
            warn!(
                event = "capacity_violation",
                rank = violation.rank,
                degree = violation.degree,
                planes = violation.planes,
            );
            return CostEstimate::Infeasible(violation);
        }
        if self.link_allocation == LinkAllocationPolicy::SpreadHeadroom {
            links.spread_headroom(&traffic, size.planes());
        }

        let bottlenecks = self.bottlenecks(blueprint, &links);
        let unit = self.constants.slice_size / (f64::from(size.ranks()) * self.constants.bandwidth);
        let transfer = unit * bottlenecks.iter().sum::<f64>();

        debug!(
            event = "cost_estimated",
            ranks = size.ranks(),
            planes = size.planes(),
            phases = phase_count as u64,
            links = links.link_count() as u64,
            max_degree = links.max_degree(),
            latency,
            transfer,
        );

        CostEstimate::Feasible(TimeBreakdown {
            phase_count,
            latency,
            transfer,
            bottlenecks,
        })
    }

    fn bottlenecks(&self, blueprint: &Blueprint, links: &LinkAllocation) -> Vec<f64> {
        let phase_count = blueprint.phase_count();
        if self.parallel {
            (0..phase_count)
                .into_par_iter()
                .map(|k| phase_bottleneck(&TrafficMatrix::for_phase_index(blueprint, k), links))
                .collect()
        } else {
            (0..phase_count)
                .map(|k| phase_bottleneck(&TrafficMatrix::for_phase_index(blueprint, k), links))
                .collect()
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(CostConstants::default())
    }
}

/// Worst transfers-per-link ratio of one phase, or 1 when nothing moves.
fn phase_bottleneck(traffic: &TrafficMatrix, links: &LinkAllocation) -> f64 {
    let worst = traffic
        .iter()
        .filter_map(|((src, dst), count)| {
            let capacity = links.capacity(src, dst);
            (capacity > 0).then(|| f64::from(count) / f64::from(capacity))
        })
        .fold(0.0_f64, f64::max);

    if worst > 0.0 {
        worst
    } else {
        1.0
    }
}
