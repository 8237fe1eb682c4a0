//! Single transfer instances.

use std::fmt;

use crate::{PlaneId, Rank, SliceId};

/// Whether an action moves data or only holds a rank's slot in a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    /// A real transfer from `src` to `dst`.
    #[default]
    Transfer,
    /// Placeholder for a rank without a partner this round.
    Idle,
}

/// One transfer of a slice between two ranks on one plane.
///
/// Idle placeholders keep `src == dst` but are identified by their
/// [`ActionKind`], never by the endpoints alone.
///
/// # Examples
///
/// ```
/// use scatterplan_core::{Action, ActionKind};
///
/// let send = Action::transfer(0, 1, 0, 3);
/// assert!(send.moves_data());
///
/// let idle = Action::idle(4, 0, 4);
/// assert_eq!(idle.kind, ActionKind::Idle);
/// assert!(!idle.moves_data());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub src: Rank,
    pub dst: Rank,
    pub plane: PlaneId,
    pub slice: SliceId,
    pub kind: ActionKind,
}

impl Action {
    /// Creates a transfer of `slice` from `src` to `dst` on `plane`.
    #[inline]
    pub const fn transfer(src: Rank, dst: Rank, plane: PlaneId, slice: SliceId) -> Self {
        Self {
            src,
            dst,
            plane,
            slice,
            kind: ActionKind::Transfer,
        }
    }

    /// Creates a placeholder for `rank`, which has no partner this round.
    #[inline]
    pub const fn idle(rank: Rank, plane: PlaneId, slice: SliceId) -> Self {
        Self {
            src: rank,
            dst: rank,
            plane,
            slice,
            kind: ActionKind::Idle,
        }
    }

    /// Returns true for idle placeholders.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        matches!(self.kind, ActionKind::Idle)
    }

    /// Returns true when the action occupies a link between two distinct ranks.
    ///
    /// A transfer whose endpoints coincide stays on the rank and uses no link.
    #[inline]
    pub const fn moves_data(&self) -> bool {
        !self.is_idle() && self.src != self.dst
    }

    /// Returns the endpoints as an unordered pair `(low, high)`.
    #[inline]
    pub fn link(&self) -> (Rank, Rank) {
        (self.src.min(self.dst), self.src.max(self.dst))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Transfer => write!(
                f,
                "{}->{} slice {} @plane {}",
                self.src, self.dst, self.slice, self.plane
            ),
            ActionKind::Idle => write!(f, "{} idle @plane {}", self.src, self.plane),
        }
    }
}
