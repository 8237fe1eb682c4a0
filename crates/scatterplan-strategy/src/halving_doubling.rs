//! Recursive halving/doubling reduce-scatter.
//!
//! At step `s` ranks are grouped into blocks of `2^(s+1)`; each rank in the
//! lower half of a block pairs with the rank `2^s` above it. For a power of
//! two `N` this is the hypercube pairing `r XOR 2^s`. Otherwise ranks whose
//! mirror falls outside `[0, N)` sit the step out with an idle placeholder.
//!
//! Both ranks of a pair record the exchange as `low -> high`; the exchange
//! itself is bidirectional.

use scatterplan_core::{Action, Phase, PlaneId, Rank};

use crate::strategy::ScheduleStrategy;

/// Hypercube-style pairing with `ceil(log2 N)` phases.
///
/// # Example
///
/// ```
/// use scatterplan_strategy::{HalvingDoublingStrategy, ScheduleStrategy};
///
/// let phase = HalvingDoublingStrategy.build_phase(5, 0, 0);
/// assert_eq!(phase.len(), 5);
/// assert!(phase.actions()[4].is_idle());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HalvingDoublingStrategy;

impl HalvingDoublingStrategy {
    /// Returns the partner of `rank` at `step`, or `None` if it has none.
    pub fn partner(ranks: u32, rank: Rank, step: usize) -> Option<Rank> {
        let half = 1u64 << step;
        let block = half << 1;
        let r = u64::from(rank);
        let block_start = r - r % block;
        let offset = r - block_start;

        let partner = if offset < half {
            block_start + half + offset
        } else {
            block_start + offset - half
        };
        (partner < u64::from(ranks)).then_some(partner as Rank)
    }

    /// Slice moved by `rank` at `step` when `N` is a power of two.
    fn power_of_two_slice(ranks: u32, rank: Rank, step: usize) -> u32 {
        let r = u64::from(rank);
        if step == 0 {
            return rank;
        }
        let mask = 1u64 << (step - 1);
        let low_bits = mask - 1;
        let slice = ((r & !low_bits) << 1) | (r & low_bits);
        (slice % u64::from(ranks)) as u32
    }

    fn action(ranks: u32, rank: Rank, plane: PlaneId, step: usize) -> Action {
        let Some(partner) = Self::partner(ranks, rank, step) else {
            return Action::idle(rank, plane, rank);
        };

        let slice = if ranks.is_power_of_two() {
            Self::power_of_two_slice(ranks, rank, step)
        } else {
            // blockStart + offset is the rank itself.
            rank % ranks
        };
        Action::transfer(rank.min(partner), rank.max(partner), plane, slice)
    }
}

impl ScheduleStrategy for HalvingDoublingStrategy {
    fn name(&self) -> &'static str {
        "halving_doubling"
    }

    fn phase_count(&self, ranks: u32) -> usize {
        match ranks.checked_next_power_of_two() {
            Some(pow) => pow.trailing_zeros() as usize,
            None => u32::BITS as usize,
        }
    }

    fn build_phase(&self, ranks: u32, plane: PlaneId, phase: usize) -> Phase {
        (0..ranks)
            .map(|rank| Self::action(ranks, rank, plane, phase))
            .collect()
    }
}
