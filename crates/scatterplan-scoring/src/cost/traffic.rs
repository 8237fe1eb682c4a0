//! Per-pair transfer counts.

use std::collections::HashMap;

use rayon::prelude::*;
use scatterplan_core::{Action, Blueprint, Phase, Rank};

/// Number of transfers per ordered rank pair `(src, dst)`.
///
/// Only actions that occupy a link are counted; idle placeholders and
/// same-rank transfers are skipped. Matrices combine by addition, so
/// partial matrices built on different workers can be merged in any order.
///
/// # Example
///
/// ```
/// use scatterplan_core::{Action, Phase};
/// use scatterplan_scoring::TrafficMatrix;
///
/// let phase = Phase::new(vec![
///     Action::transfer(0, 1, 0, 0),
///     Action::transfer(0, 1, 0, 1),
///     Action::idle(2, 0, 2),
/// ]);
/// let traffic = TrafficMatrix::from_phase(&phase);
///
/// assert_eq!(traffic.count(0, 1), 2);
/// assert_eq!(traffic.count(1, 0), 0);
/// assert_eq!(traffic.total(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrafficMatrix {
    counts: HashMap<(Rank, Rank), u32>,
}

impl TrafficMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the transfers of `actions`.
    pub fn from_actions<'a>(actions: impl IntoIterator<Item = &'a Action>) -> Self {
        let mut matrix = Self::new();
        for action in actions {
            matrix.record(action);
        }
        matrix
    }

    /// Counts the transfers of one phase.
    pub fn from_phase(phase: &Phase) -> Self {
        Self::from_actions(phase)
    }

    /// Counts the transfers of phase `index` across every plane.
    pub fn for_phase_index(blueprint: &Blueprint, index: usize) -> Self {
        Self::from_actions(blueprint.phases_at(index).flat_map(|phase| phase.iter()))
    }

    /// Counts every transfer of the blueprint.
    ///
    /// With `parallel`, phases are counted on the current rayon pool and
    /// the partial matrices are summed.
    pub fn from_blueprint(blueprint: &Blueprint, parallel: bool) -> Self {
        if !parallel {
            return Self::from_actions(blueprint.actions());
        }
        blueprint
            .schedules()
            .par_iter()
            .flat_map_iter(|schedule| schedule.iter())
            .map(Self::from_phase)
            .reduce(Self::new, Self::merge)
    }

    /// Records one action if it occupies a link.
    pub fn record(&mut self, action: &Action) {
        if action.moves_data() {
            *self.counts.entry((action.src, action.dst)).or_insert(0) += 1;
        }
    }

    /// Adds the counts of `other` into `self`.
    pub fn merge(mut self, mut other: Self) -> Self {
        if self.counts.len() < other.counts.len() {
            std::mem::swap(&mut self, &mut other);
        }
        for (pair, count) in other.counts {
            *self.counts.entry(pair).or_insert(0) += count;
        }
        self
    }

    /// Returns the count for `(src, dst)`.
    pub fn count(&self, src: Rank, dst: Rank) -> u32 {
        self.counts.get(&(src, dst)).copied().unwrap_or(0)
    }

    /// Returns the combined count of both directions between `u` and `v`.
    pub fn demand(&self, u: Rank, v: Rank) -> u32 {
        self.count(u, v) + self.count(v, u)
    }

    /// Iterates over `((src, dst), count)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = ((Rank, Rank), u32)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }

    /// Returns the number of distinct ordered pairs with traffic.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no transfer was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the total number of transfers.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Returns the highest rank appearing in any pair.
    pub fn max_rank(&self) -> Option<Rank> {
        self.counts.keys().map(|&(u, v)| u.max(v)).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scatterplan_core::ProblemSize;
    use scatterplan_strategy::{construct_blueprint, RingStrategy};

    #[test]
    fn test_skips_idle_and_local_transfers() {
        let traffic = TrafficMatrix::from_actions(&[
            Action::idle(1, 0, 1),
            Action::transfer(2, 2, 0, 0),
            Action::transfer(2, 3, 0, 0),
        ]);
        assert_eq!(traffic.len(), 1);
        assert_eq!(traffic.count(2, 3), 1);
    }

    #[test]
    fn test_merge_adds_counts() {
        let a = TrafficMatrix::from_actions(&[Action::transfer(0, 1, 0, 0)]);
        let b = TrafficMatrix::from_actions(&[
            Action::transfer(0, 1, 1, 0),
            Action::transfer(1, 0, 1, 0),
        ]);
        let merged = a.merge(b);
        assert_eq!(merged.count(0, 1), 2);
        assert_eq!(merged.count(1, 0), 1);
        assert_eq!(merged.demand(1, 0), 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let size = ProblemSize::new(17, 6).unwrap();
        let blueprint = construct_blueprint(RingStrategy, size);
        let parallel = TrafficMatrix::from_blueprint(&blueprint, true);
        let sequential = TrafficMatrix::from_blueprint(&blueprint, false);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.total(), blueprint.transfer_count() as u64);
    }

    #[test]
    fn test_ring_traffic_per_neighbour() {
        // Two clockwise planes (0, 2) and one counter-clockwise plane (1), 4 phases each.
        let size = ProblemSize::new(5, 3).unwrap();
        let traffic = TrafficMatrix::from_blueprint(&construct_blueprint(RingStrategy, size), true);
        assert_eq!(traffic.count(0, 1), 8);
        assert_eq!(traffic.count(1, 0), 4);
        assert_eq!(traffic.count(0, 2), 0);
        assert_eq!(traffic.max_rank(), Some(4));
    }

    #[test]
    fn test_phase_index_spans_planes() {
        let size = ProblemSize::new(4, 2).unwrap();
        let blueprint = construct_blueprint(RingStrategy, size);
        let traffic = TrafficMatrix::for_phase_index(&blueprint, 1);
        assert_eq!(traffic.total(), 8);
        assert_eq!(traffic.count(0, 1), 1);
        assert_eq!(traffic.count(1, 0), 1);
    }
}
