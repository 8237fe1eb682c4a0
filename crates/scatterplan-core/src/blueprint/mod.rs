//! Phase, schedule and blueprint containers
//!
//! A blueprint is the complete transfer plan for one `(N, P)` problem:
//! - `Blueprint`: one `Schedule` per plane, indexed by plane id
//! - `Schedule`: phases of one plane, run strictly in order
//! - `Phase`: one action slot per rank, all running concurrently
//!
//! Containers are plain ordered vectors. Shape invariants (equal phase
//! counts, `N` actions per phase) are checked by the validator in
//! `scatterplan-scoring`, not enforced on construction, so that malformed
//! blueprints from external strategies can still be represented and scored.

mod action;

#[cfg(test)]
mod tests;

pub use action::{Action, ActionKind};

/// One synchronous round on one plane: an action slot per rank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Phase {
    actions: Vec<Action>,
}

impl Phase {
    /// Creates a phase from its actions, in rank-slot order.
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Returns the actions of this phase.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Returns the number of action slots.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if the phase holds no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterates over the actions.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Iterates over actions that occupy a link.
    pub fn transfers(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| a.moves_data())
    }

    /// Returns the number of idle placeholders.
    pub fn idle_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_idle()).count()
    }
}

impl FromIterator<Action> for Phase {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Phase {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Ordered phases of a single plane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Schedule {
    phases: Vec<Phase>,
}

impl Schedule {
    /// Creates a schedule from its phases.
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// Returns the phases.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Returns the phase at `index`, if present.
    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Returns the phase count `K`.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Returns true if the schedule has no phases.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Iterates over the phases.
    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }
}

impl FromIterator<Phase> for Schedule {
    fn from_iter<I: IntoIterator<Item = Phase>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Phase;
    type IntoIter = std::slice::Iter<'a, Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.iter()
    }
}

/// The complete per-plane schedule set for one `(N, P)`.
///
/// # Examples
///
/// ```
/// use scatterplan_core::{Action, Blueprint, Phase, Schedule};
///
/// let phase = Phase::new(vec![Action::transfer(0, 1, 0, 0), Action::transfer(1, 0, 0, 1)]);
/// let blueprint = Blueprint::new(vec![Schedule::new(vec![phase])]);
///
/// assert_eq!(blueprint.plane_count(), 1);
/// assert_eq!(blueprint.phase_count(), 1);
/// assert_eq!(blueprint.transfer_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Blueprint {
    schedules: Vec<Schedule>,
}

impl Blueprint {
    /// Creates a blueprint from its schedules, indexed by plane id.
    pub fn new(schedules: Vec<Schedule>) -> Self {
        Self { schedules }
    }

    /// Returns the schedules.
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Returns the schedule of `plane`, if present.
    pub fn schedule(&self, plane: usize) -> Option<&Schedule> {
        self.schedules.get(plane)
    }

    /// Returns the number of schedules.
    pub fn plane_count(&self) -> usize {
        self.schedules.len()
    }

    /// Returns `K`, the phase count of schedule 0 (0 for an empty blueprint).
    pub fn phase_count(&self) -> usize {
        self.schedules.first().map_or(0, Schedule::len)
    }

    /// Returns the number of action slots across all planes and phases.
    pub fn action_count(&self) -> usize {
        self.actions().count()
    }

    /// Returns the number of actions that occupy a link.
    pub fn transfer_count(&self) -> usize {
        self.actions().filter(|a| a.moves_data()).count()
    }

    /// Iterates over every action of every phase of every plane.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.schedules
            .iter()
            .flat_map(|schedule| schedule.iter())
            .flat_map(|phase| phase.iter())
    }

    /// Iterates over the phase at `index` of every plane that has one.
    pub fn phases_at(&self, index: usize) -> impl Iterator<Item = &Phase> {
        self.schedules
            .iter()
            .filter_map(move |schedule| schedule.phase(index))
    }

    /// Iterates over the schedules.
    pub fn iter(&self) -> std::slice::Iter<'_, Schedule> {
        self.schedules.iter()
    }
}

impl FromIterator<Schedule> for Blueprint {
    fn from_iter<I: IntoIterator<Item = Schedule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Blueprint {
    type Item = &'a Schedule;
    type IntoIter = std::slice::Iter<'a, Schedule>;

    fn into_iter(self) -> Self::IntoIter {
        self.schedules.iter()
    }
}
