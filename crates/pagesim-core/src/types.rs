//! Core data model for simulation runs.
//!
//! Everything the engine emits is serde-serializable so traces can be
//! exported and inspected outside the process.

use crate::policy::Policy;
use serde::{Deserialize, Serialize};

/// A page identifier. Pages are abstract units of memory reference;
/// the simulation only ever compares them for equality.
pub type Page = u32;

/// A fixed-length set of memory frames, each either empty or holding
/// one resident page.
///
/// Invariant: no two slots hold the same page at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSet {
    slots: Vec<Option<Page>>,
}

impl FrameSet {
    /// Create an empty frame set with `frame_count` slots.
    pub fn new(frame_count: usize) -> Self {
        Self {
            slots: vec![None; frame_count],
        }
    }

    /// The slot contents, in frame-index order.
    pub fn slots(&self) -> &[Option<Page>] {
        &self.slots
    }

    /// Whether `page` is currently resident.
    pub fn contains(&self, page: Page) -> bool {
        self.slots.contains(&Some(page))
    }

    /// Index of the lowest empty slot, if any.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Index of the slot holding `page`, if resident.
    pub fn index_of(&self, page: Page) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(page))
    }

    /// Place `page` into the slot at `index`, returning the previous
    /// occupant.
    pub(crate) fn load(&mut self, index: usize, page: Page) -> Option<Page> {
        self.slots[index].replace(page)
    }

    /// Resident pages paired with their frame indices, in frame order.
    pub fn residents(&self) -> impl Iterator<Item = (usize, Page)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|page| (index, page)))
    }
}

/// Policy-specific auxiliary ordering, captured per step so the
/// playback layer can explain *why* the next victim will be chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pages", rename_all = "snake_case")]
pub enum HelperState {
    /// Resident pages in load order, oldest first.
    FifoQueue(Vec<Page>),
    /// Resident pages ordered most-recently-used first.
    LruStack(Vec<Page>),
    /// The unconsumed suffix of the reference string. Explanatory only:
    /// Optimal recomputes distances fresh each step rather than owning
    /// an eviction structure.
    FutureWindow(Vec<Page>),
}

impl HelperState {
    /// The pages carried by this helper, in its native order.
    pub fn pages(&self) -> &[Page] {
        match self {
            HelperState::FifoQueue(pages)
            | HelperState::LruStack(pages)
            | HelperState::FutureWindow(pages) => pages,
        }
    }
}

/// Cumulative hit/fault counters as of a given step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// References that found their page already resident.
    pub hits: usize,
    /// References that required loading the page.
    pub faults: usize,
    /// References processed so far. Always `hits + faults`.
    pub total: usize,
}

impl Statistics {
    /// Hit ratio in `[0.0, 1.0]`; zero before any reference.
    pub fn hit_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.hits as f64 / self.total as f64
        }
    }
}

/// The atomic unit of history: everything known about the simulation
/// immediately after one reference was processed.
///
/// Snapshots are immutable once emitted. Each owns its collections, so
/// later engine steps cannot alias into previously produced snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSnapshot {
    /// 0-based position in the reference string.
    pub step: usize,
    /// The page referenced at this step.
    pub page: Page,
    /// Frame contents *after* applying this step.
    pub frames: FrameSet,
    /// Whether the reference was a hit.
    pub hit: bool,
    /// The page evicted at this step, on a replacement fault.
    pub evicted: Option<Page>,
    /// The frame slot touched by this step (hit location or load target).
    pub frame_index: usize,
    /// Policy helper ordering *after* this step.
    pub helper: HelperState,
    /// Human-readable narration of the outcome.
    pub narration: String,
    /// Cumulative statistics as of this step.
    pub stats: Statistics,
}

/// The complete, immutable trace of one simulation run.
///
/// Produced once by [`crate::simulate`] and read-only thereafter;
/// starting a new run replaces the whole value rather than mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    policy: Policy,
    frame_count: usize,
    reference_string: Vec<Page>,
    steps: Vec<StepSnapshot>,
}

impl History {
    pub(crate) fn new(
        policy: Policy,
        frame_count: usize,
        reference_string: Vec<Page>,
        steps: Vec<StepSnapshot>,
    ) -> Self {
        Self {
            policy,
            frame_count,
            reference_string,
            steps,
        }
    }

    /// The policy this run was simulated under.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The configured frame count.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// The full input reference string.
    pub fn reference_string(&self) -> &[Page] {
        &self.reference_string
    }

    /// Number of steps; equals the reference string length.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True only for the degenerate empty run.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Snapshot at `step`, if in range.
    pub fn step(&self, step: usize) -> Option<&StepSnapshot> {
        self.steps.get(step)
    }

    /// All snapshots in order.
    pub fn steps(&self) -> &[StepSnapshot] {
        &self.steps
    }

    /// Cumulative statistics at the final step.
    pub fn final_stats(&self) -> Statistics {
        self.steps.last().map(|s| s.stats).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_set_tracks_membership_and_empty_slots() {
        let mut frames = FrameSet::new(3);
        assert_eq!(frames.slots(), &[None, None, None]);
        assert_eq!(frames.first_empty(), Some(0));

        assert_eq!(frames.load(0, 7), None);
        assert_eq!(frames.load(1, 3), None);
        assert!(frames.contains(7));
        assert!(!frames.contains(9));
        assert_eq!(frames.first_empty(), Some(2));
        assert_eq!(frames.index_of(3), Some(1));

        // Replacement reuses the slot and returns the victim.
        assert_eq!(frames.load(0, 9), Some(7));
        assert!(!frames.contains(7));
        assert!(frames.contains(9));
    }

    #[test]
    fn residents_iterates_in_frame_order() {
        let mut frames = FrameSet::new(3);
        frames.load(2, 5);
        frames.load(0, 1);
        let residents: Vec<_> = frames.residents().collect();
        assert_eq!(residents, vec![(0, 1), (2, 5)]);
    }

    #[test]
    fn statistics_hit_ratio_handles_zero_total() {
        assert_eq!(Statistics::default().hit_ratio(), 0.0);
        let stats = Statistics {
            hits: 1,
            faults: 3,
            total: 4,
        };
        assert!((stats.hit_ratio() - 0.25).abs() < f64::EPSILON);
    }
}
