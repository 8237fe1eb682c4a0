//! Suite result types.

use std::fmt;
use std::time::Duration;

use scatterplan::{Evaluation, StrategyKind};

use crate::config::TestCase;

/// Grade awarded to an average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    NeedsImprovement,
    Pass,
    Fair,
    Good,
    Excellent,
}

impl Rating {
    /// Grades an average score on the 0-100 scale.
    ///
    /// # Example
    ///
    /// ```
    /// use scatterplan_benchmark::Rating;
    ///
    /// assert_eq!(Rating::from_average(90.0), Rating::Excellent);
    /// assert_eq!(Rating::from_average(79.9), Rating::Fair);
    /// assert_eq!(Rating::from_average(12.0), Rating::NeedsImprovement);
    /// ```
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Rating::Excellent
        } else if average >= 80.0 {
            Rating::Good
        } else if average >= 70.0 {
            Rating::Fair
        } else if average >= 60.0 {
            Rating::Pass
        } else {
            Rating::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Pass => "Pass",
            Rating::NeedsImprovement => "Needs improvement",
        }
    }

    /// Returns one to five stars.
    pub fn stars(&self) -> &'static str {
        match self {
            Rating::Excellent => "★★★★★",
            Rating::Good => "★★★★",
            Rating::Fair => "★★★",
            Rating::Pass => "★★",
            Rating::NeedsImprovement => "★",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stars(), self.label())
    }
}

/// Result of one case under one strategy.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub case: TestCase,
    pub strategy: StrategyKind,
    pub evaluation: Evaluation,
    /// Mean wall time of one blueprint construction.
    pub construction_time: Duration,
    /// Link-occupying actions in the blueprint.
    pub transfers: usize,
}

impl CaseOutcome {
    pub fn score(&self) -> f64 {
        self.evaluation.score
    }

    pub fn is_valid(&self) -> bool {
        self.evaluation.validity.is_valid()
    }
}

/// Aggregate of one strategy over every case.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategySummary {
    pub strategy: StrategyKind,
    pub case_count: usize,
    pub valid_count: usize,
    pub total_score: f64,
    pub average_score: f64,
    pub rating: Rating,
    pub construction_time: Duration,
}

/// Outcomes of a suite run, in strategy then case order.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    pub name: String,
    pub outcomes: Vec<CaseOutcome>,
    /// Wall time of the whole run, warmups included.
    pub duration: Duration,
}

impl SuiteResult {
    /// Creates an empty result.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcomes: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Adds an outcome.
    pub fn add_outcome(&mut self, outcome: CaseOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns the strategies present, in first-seen order.
    pub fn strategies(&self) -> Vec<StrategyKind> {
        let mut strategies = Vec::new();
        for outcome in &self.outcomes {
            if !strategies.contains(&outcome.strategy) {
                strategies.push(outcome.strategy);
            }
        }
        strategies
    }

    /// Returns the outcomes of one strategy.
    pub fn outcomes_for(&self, strategy: StrategyKind) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes
            .iter()
            .filter(move |outcome| outcome.strategy == strategy)
    }

    /// Returns the sum of scores of one strategy.
    pub fn total_score(&self, strategy: StrategyKind) -> f64 {
        self.outcomes_for(strategy).map(CaseOutcome::score).sum()
    }

    /// Returns the mean score of one strategy, or 0 without outcomes.
    pub fn average_score(&self, strategy: StrategyKind) -> f64 {
        let count = self.outcomes_for(strategy).count();
        if count == 0 {
            return 0.0;
        }
        self.total_score(strategy) / count as f64
    }

    /// Returns the rating of one strategy.
    pub fn rating(&self, strategy: StrategyKind) -> Rating {
        Rating::from_average(self.average_score(strategy))
    }

    /// Summarizes every strategy.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use scatterplan::{evaluate, StrategyKind};
    /// use scatterplan_benchmark::{CaseOutcome, Rating, SuiteResult, TestCase};
    ///
    /// let mut result = SuiteResult::new("Smoke");
    /// result.add_outcome(CaseOutcome {
    ///     case: TestCase::new(1, 2),
    ///     strategy: StrategyKind::Ring,
    ///     evaluation: evaluate(1, 2).unwrap(),
    ///     construction_time: Duration::from_micros(5),
    ///     transfers: 0,
    /// });
    ///
    /// let summary = &result.summaries()[0];
    /// assert_eq!(summary.total_score, 100.0);
    /// assert_eq!(summary.rating, Rating::Excellent);
    /// ```
    pub fn summaries(&self) -> Vec<StrategySummary> {
        self.strategies()
            .into_iter()
            .map(|strategy| {
                let outcomes: Vec<&CaseOutcome> = self.outcomes_for(strategy).collect();
                let average_score = self.average_score(strategy);
                StrategySummary {
                    strategy,
                    case_count: outcomes.len(),
                    valid_count: outcomes.iter().filter(|o| o.is_valid()).count(),
                    total_score: self.total_score(strategy),
                    average_score,
                    rating: Rating::from_average(average_score),
                    construction_time: outcomes.iter().map(|o| o.construction_time).sum(),
                }
            })
            .collect()
    }

    /// Returns the strategy with the highest average score.
    ///
    /// Ties keep the strategy that ran first.
    pub fn best_strategy(&self) -> Option<StrategyKind> {
        self.summaries()
            .into_iter()
            .fold(None, |best: Option<StrategySummary>, summary| match best {
                Some(b) if b.average_score >= summary.average_score => Some(b),
                _ => Some(summary),
            })
            .map(|summary| summary.strategy)
    }

    /// Returns the mean score over every outcome.
    pub fn overall_average(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.outcomes.iter().map(CaseOutcome::score).sum::<f64>() / self.outcomes.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scatterplan::{EvaluationConfig, Evaluator};

    fn outcome(strategy: StrategyKind, n: u32, p: u32) -> CaseOutcome {
        let evaluator =
            Evaluator::new(EvaluationConfig::default().with_strategy(strategy)).unwrap();
        let evaluation = evaluator.evaluate(n, p).unwrap();
        CaseOutcome {
            case: TestCase::new(n, p),
            strategy,
            evaluation,
            construction_time: Duration::from_millis(1),
            transfers: 0,
        }
    }

    #[test]
    fn test_rating_tiers() {
        assert_eq!(Rating::from_average(100.0), Rating::Excellent);
        assert_eq!(Rating::from_average(80.0), Rating::Good);
        assert_eq!(Rating::from_average(70.0), Rating::Fair);
        assert_eq!(Rating::from_average(60.0), Rating::Pass);
        assert_eq!(Rating::from_average(59.99), Rating::NeedsImprovement);
        assert!(Rating::Excellent > Rating::Good);
        assert_eq!(Rating::Pass.to_string(), "★★ Pass");
    }

    #[test]
    fn test_empty_result() {
        let result = SuiteResult::new("empty");
        assert!(result.strategies().is_empty());
        assert_eq!(result.average_score(StrategyKind::Ring), 0.0);
        assert_eq!(result.overall_average(), 0.0);
        assert_eq!(result.best_strategy(), None);
    }

    #[test]
    fn test_per_strategy_aggregates() {
        let mut result = SuiteResult::new("mixed");
        result.add_outcome(outcome(StrategyKind::Ring, 1, 2));
        result.add_outcome(outcome(StrategyKind::Ring, 6, 1));
        result.add_outcome(outcome(StrategyKind::HalvingDoubling, 1, 2));

        assert_eq!(
            result.strategies(),
            vec![StrategyKind::Ring, StrategyKind::HalvingDoubling]
        );
        // The single-plane ring is infeasible and scores 0.
        assert_eq!(result.total_score(StrategyKind::Ring), 100.0);
        assert_eq!(result.average_score(StrategyKind::Ring), 50.0);
        assert_eq!(result.rating(StrategyKind::Ring), Rating::NeedsImprovement);

        let summaries = result.summaries();
        assert_eq!(summaries[0].case_count, 2);
        assert_eq!(summaries[0].valid_count, 1);
        assert_eq!(summaries[0].construction_time, Duration::from_millis(2));
        assert_eq!(summaries[1].rating, Rating::Excellent);

        assert_eq!(result.best_strategy(), Some(StrategyKind::HalvingDoubling));
        assert!((result.overall_average() - 200.0 / 3.0).abs() < 1e-9);
    }
}
