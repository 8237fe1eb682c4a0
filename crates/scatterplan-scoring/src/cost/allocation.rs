//! Physical link capacity per rank pair.

use std::collections::HashMap;

use scatterplan_core::Rank;

use super::traffic::TrafficMatrix;
use super::CapacityViolation;

/// Link capacity per unordered rank pair `{u, v}`.
///
/// Every pair with traffic in either direction holds at least one link.
/// A rank's degree is its number of distinct linked partners; its load is
/// the sum of the capacities of its links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAllocation {
    capacity: HashMap<(Rank, Rank), u32>,
    degree: Vec<u32>,
    load: Vec<u32>,
}

impl LinkAllocation {
    /// Allocates exactly one link to every communicating pair.
    ///
    /// # Example
    ///
    /// ```
    /// use scatterplan_core::Action;
    /// use scatterplan_scoring::{LinkAllocation, TrafficMatrix};
    ///
    /// let traffic = TrafficMatrix::from_actions(&[
    ///     Action::transfer(0, 1, 0, 0),
    ///     Action::transfer(1, 0, 1, 0),
    ///     Action::transfer(0, 2, 0, 0),
    /// ]);
    /// let links = LinkAllocation::single_link(&traffic, 3);
    ///
    /// assert_eq!(links.capacity(1, 0), 1);
    /// assert_eq!(links.degree(0), 2);
    /// assert_eq!(links.degree(2), 1);
    /// ```
    pub fn single_link(traffic: &TrafficMatrix, ranks: u32) -> Self {
        let slots = traffic
            .max_rank()
            .map_or(0, |rank| rank as usize + 1)
            .max(ranks as usize);
        let mut allocation = Self {
            capacity: HashMap::new(),
            degree: vec![0; slots],
            load: vec![0; slots],
        };

        for ((src, dst), _) in traffic.iter() {
            let key = (src.min(dst), src.max(dst));
            if allocation.capacity.contains_key(&key) {
                continue;
            }
            allocation.capacity.insert(key, 1);
            for rank in [key.0, key.1] {
                allocation.degree[rank as usize] += 1;
                allocation.load[rank as usize] += 1;
            }
        }
        allocation
    }

    /// Fails with the lowest rank whose degree exceeds `planes`.
    pub fn check_degree(&self, planes: u32) -> Result<(), CapacityViolation> {
        match self
            .degree
            .iter()
            .enumerate()
            .find(|&(_, &degree)| degree > planes)
        {
            Some((rank, &degree)) => Err(CapacityViolation {
                rank: rank as Rank,
                degree,
                planes,
            }),
            None => Ok(()),
        }
    }

    /// Spreads spare per-rank budget over the busiest links.
    ///
    /// Each round visits links by descending two-way demand (ties by pair)
    /// and adds one unit where both endpoints have a load below `planes`.
    /// Rounds repeat until no link can grow. Degrees never change.
    pub fn spread_headroom(&mut self, traffic: &TrafficMatrix, planes: u32) {
        let mut links: Vec<((Rank, Rank), u32)> = self
            .capacity
            .keys()
            .map(|&(u, v)| ((u, v), traffic.demand(u, v)))
            .collect();
        links.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        loop {
            let mut grew = false;
            for &((u, v), _) in &links {
                if self.load[u as usize] < planes && self.load[v as usize] < planes {
                    *self.capacity.entry((u, v)).or_insert(0) += 1;
                    self.load[u as usize] += 1;
                    self.load[v as usize] += 1;
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }
    }

    /// Returns the capacity between `u` and `v` in either order.
    pub fn capacity(&self, u: Rank, v: Rank) -> u32 {
        self.capacity
            .get(&(u.min(v), u.max(v)))
            .copied()
            .unwrap_or(0)
    }

    /// Returns the number of distinct partners of `rank`.
    pub fn degree(&self, rank: Rank) -> u32 {
        self.degree.get(rank as usize).copied().unwrap_or(0)
    }

    /// Returns the total capacity attached to `rank`.
    pub fn load(&self, rank: Rank) -> u32 {
        self.load.get(rank as usize).copied().unwrap_or(0)
    }

    /// Returns the highest degree over all ranks.
    pub fn max_degree(&self) -> u32 {
        self.degree.iter().copied().max().unwrap_or(0)
    }

    /// Returns the number of linked pairs.
    pub fn link_count(&self) -> usize {
        self.capacity.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scatterplan_core::{Action, ProblemSize};
    use scatterplan_strategy::{construct_blueprint, HalvingDoublingStrategy, RingStrategy};
    use scatterplan_test::star_blueprint;

    fn ring_traffic(n: u32, p: u32) -> TrafficMatrix {
        let size = ProblemSize::new(n, p).unwrap();
        TrafficMatrix::from_blueprint(&construct_blueprint(RingStrategy, size), false)
    }

    #[test]
    fn test_both_directions_share_one_link() {
        let links = LinkAllocation::single_link(&ring_traffic(6, 2), 6);
        assert_eq!(links.link_count(), 6);
        for rank in 0..6 {
            assert_eq!(links.degree(rank), 2);
            assert_eq!(links.capacity(rank, (rank + 1) % 6), 1);
        }
        assert_eq!(links.capacity(0, 3), 0);
    }

    #[test]
    fn test_degree_check() {
        let links = LinkAllocation::single_link(&ring_traffic(6, 2), 6);
        assert!(links.check_degree(2).is_ok());
        let violation = links.check_degree(1).unwrap_err();
        assert_eq!(
            violation,
            CapacityViolation {
                rank: 0,
                degree: 2,
                planes: 1
            }
        );
    }

    #[test]
    fn test_star_hub_exceeds_budget() {
        let traffic = TrafficMatrix::from_blueprint(&star_blueprint(6, 2), false);
        let links = LinkAllocation::single_link(&traffic, 6);
        assert_eq!(links.degree(0), 5);
        assert_eq!(links.max_degree(), 5);
        assert_eq!(links.check_degree(4).unwrap_err().rank, 0);
        assert!(links.check_degree(5).is_ok());
    }

    #[test]
    fn test_hypercube_degree_is_log2() {
        let size = ProblemSize::new(8, 3).unwrap();
        let traffic =
            TrafficMatrix::from_blueprint(&construct_blueprint(HalvingDoublingStrategy, size), false);
        let links = LinkAllocation::single_link(&traffic, 8);
        assert!((0..8).all(|rank| links.degree(rank) == 3));
    }

    #[test]
    fn test_spread_headroom_respects_budget() {
        let traffic = ring_traffic(6, 4);
        let mut links = LinkAllocation::single_link(&traffic, 6);
        links.spread_headroom(&traffic, 4);
        for rank in 0..6 {
            assert_eq!(links.load(rank), 4);
            assert_eq!(links.degree(rank), 2);
        }
        for rank in 0..6 {
            assert_eq!(links.capacity(rank, (rank + 1) % 6), 2);
        }
    }

    #[test]
    fn test_spread_headroom_prefers_busy_links() {
        // 0-1 carries three transfers, 1-2 one; rank 1 can afford one extra unit.
        let traffic = TrafficMatrix::from_actions(&[
            Action::transfer(0, 1, 0, 0),
            Action::transfer(0, 1, 1, 0),
            Action::transfer(1, 0, 2, 0),
            Action::transfer(1, 2, 0, 0),
        ]);
        let mut links = LinkAllocation::single_link(&traffic, 3);
        links.spread_headroom(&traffic, 3);
        assert_eq!(links.capacity(0, 1), 2);
        assert_eq!(links.capacity(1, 2), 1);
        assert_eq!(links.load(1), 3);
    }

    #[test]
    fn test_empty_traffic() {
        let links = LinkAllocation::single_link(&TrafficMatrix::new(), 4);
        assert_eq!(links.link_count(), 0);
        assert_eq!(links.max_degree(), 0);
        assert!(links.check_degree(1).is_ok());
    }
}
