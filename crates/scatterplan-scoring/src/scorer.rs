//! Relative-overhead scoring.

use scatterplan_config::ScoringConfig;

use crate::cost::CostEstimate;

/// Maps an achieved time and its lower bound to a score in `[0, max_score]`.
///
/// Times at or below the bound score `max_score`. Above it the score decays
/// as `max_score * exp(-beta * (t / t_min - 1))`.
///
/// # Example
///
/// ```
/// use scatterplan_config::ScoringConfig;
/// use scatterplan_scoring::Scorer;
///
/// let scorer = Scorer::new(ScoringConfig::default());
/// assert_eq!(scorer.score(1.0, 1.0), 100.0);
/// assert!((scorer.score(2.0, 1.0) - 22.313).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    beta: f64,
    max_score: f64,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            beta: config.beta,
            max_score: config.max_score,
        }
    }

    /// Returns the penalty exponent.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Returns the score of a run that hits the bound.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// Scores time `t` against the lower bound `t_min`.
    ///
    /// A non-finite time scores 0, as does any time above a non-positive
    /// bound. Zero time against a zero bound scores `max_score`.
    pub fn score(&self, t: f64, t_min: f64) -> f64 {
        if !t.is_finite() || t_min.is_nan() {
            return 0.0;
        }
        if t <= t_min {
            return self.max_score;
        }
        if t_min <= 0.0 {
            return 0.0;
        }
        self.max_score * (-self.beta * (t / t_min - 1.0)).exp()
    }

    /// Scores a cost estimate; infeasible estimates score 0.
    pub fn score_estimate(&self, estimate: &CostEstimate, t_min: f64) -> f64 {
        estimate.total().map_or(0.0, |t| self.score(t, t_min))
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
