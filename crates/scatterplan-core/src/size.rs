//! Validated problem dimensions.

use std::fmt;

use crate::error::{Result, ScatterPlanError};

/// Number of ranks `N` and planes `P` for one evaluation.
///
/// Both dimensions are at least 1. A single rank is a degenerate but valid
/// problem: every schedule is empty.
///
/// # Examples
///
/// ```
/// use scatterplan_core::ProblemSize;
///
/// let size = ProblemSize::new(8, 4).unwrap();
/// assert_eq!(size.ranks(), 8);
/// assert_eq!(size.planes(), 4);
/// assert!(!size.is_degenerate());
///
/// assert!(ProblemSize::new(0, 4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemSize {
    ranks: u32,
    planes: u32,
}

impl ProblemSize {
    /// Creates a problem size, rejecting zero ranks or zero planes.
    pub fn new(ranks: u32, planes: u32) -> Result<Self> {
        if ranks == 0 || planes == 0 {
            return Err(ScatterPlanError::InvalidProblemSize { ranks, planes });
        }
        Ok(Self { ranks, planes })
    }

    /// Returns `N`.
    #[inline]
    pub const fn ranks(&self) -> u32 {
        self.ranks
    }

    /// Returns `P`.
    #[inline]
    pub const fn planes(&self) -> u32 {
        self.planes
    }

    /// Returns true when there is nothing to exchange (`N == 1`).
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.ranks <= 1
    }

    /// Returns true when `N` is an exact power of two.
    #[inline]
    pub const fn is_power_of_two(&self) -> bool {
        self.ranks.is_power_of_two()
    }

    /// Returns `ceil(log2 N)`, the hypercube round count.
    ///
    /// ```
    /// use scatterplan_core::ProblemSize;
    ///
    /// assert_eq!(ProblemSize::new(1, 1).unwrap().log2_ceil(), 0);
    /// assert_eq!(ProblemSize::new(4, 1).unwrap().log2_ceil(), 2);
    /// assert_eq!(ProblemSize::new(5, 1).unwrap().log2_ceil(), 3);
    /// ```
    #[inline]
    pub const fn log2_ceil(&self) -> u32 {
        match self.ranks.checked_next_power_of_two() {
            Some(pow) => pow.trailing_zeros(),
            None => u32::BITS,
        }
    }
}

impl fmt::Display for ProblemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N={}, P={}", self.ranks, self.planes)
    }
}
