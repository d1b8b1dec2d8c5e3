//! The simulation engine: a pure function from inputs to a complete
//! state history.
//!
//! The engine walks the reference string once. Each step classifies the
//! reference as a hit or fault, applies the policy, and emits an
//! immutable [`StepSnapshot`] owning defensive copies of all working
//! state. Later steps can never alter snapshots already emitted.

use crate::policy::{Policy, PolicyQueue};
use crate::types::{FrameSet, History, Page, Statistics, StepSnapshot};
use crate::MAX_FRAMES;
use tracing::debug;

/// Run a complete simulation and return its history.
///
/// Deterministic and total: the same inputs always produce an
/// identical [`History`]. Preconditions (`pages` non-empty,
/// `1 <= frame_count <= MAX_FRAMES`) are enforced by the caller and
/// only debug-asserted here; the policy tag boundary is where
/// [`crate::SimError::UnsupportedPolicy`] is raised, via
/// [`Policy::from_str`](std::str::FromStr).
pub fn simulate(pages: &[Page], frame_count: usize, policy: Policy) -> History {
    debug_assert!(!pages.is_empty(), "reference string must be non-empty");
    debug_assert!(
        (1..=MAX_FRAMES).contains(&frame_count),
        "frame count must be within 1..={MAX_FRAMES}"
    );

    let mut frames = FrameSet::new(frame_count);
    let mut queue = PolicyQueue::new(policy);
    let mut stats = Statistics::default();
    let mut steps = Vec::with_capacity(pages.len());

    for (step, &page) in pages.iter().enumerate() {
        // The suffix the current step has not yet consumed; Optimal
        // measures next-use distances against it.
        let future = &pages[step + 1..];
        let snapshot = apply_step(
            step, page, future, policy, &mut frames, &mut queue, &mut stats,
        );
        debug!(
            step,
            page,
            hit = snapshot.hit,
            evicted = ?snapshot.evicted,
            frame = snapshot.frame_index,
            "processed reference"
        );
        steps.push(snapshot);
    }

    History::new(policy, frame_count, pages.to_vec(), steps)
}

/// Evaluate a single reference and emit its snapshot.
fn apply_step(
    step: usize,
    page: Page,
    future: &[Page],
    policy: Policy,
    frames: &mut FrameSet,
    queue: &mut PolicyQueue,
    stats: &mut Statistics,
) -> StepSnapshot {
    stats.total += 1;

    let (hit, evicted, frame_index, narration) = if let Some(index) = frames.index_of(page) {
        stats.hits += 1;
        queue.touch(page);
        let narration = format!("Step {}: page {page} is already in frame {index} (hit).", step + 1);
        (true, None, index, narration)
    } else {
        stats.faults += 1;
        if let Some(index) = frames.first_empty() {
            // Compulsory fault: lowest empty slot takes the page.
            frames.load(index, page);
            queue.admit(page);
            let narration = format!(
                "Step {}: page {page} loaded into empty frame {index} (compulsory fault).",
                step + 1
            );
            (false, None, index, narration)
        } else {
            // Replacement fault: the victim's slot is reused in place.
            let victim = queue
                .evict(frames, future)
                .expect("frames are full, so a victim must exist");
            let index = frames
                .index_of(victim)
                .expect("victim is resident by the helper membership invariant");
            frames.load(index, page);
            queue.admit(page);
            let narration = format!(
                "Step {}: page {page} replaced page {victim} in frame {index} ({policy} victim).",
                step + 1
            );
            (false, Some(victim), index, narration)
        }
    };

    StepSnapshot {
        step,
        page,
        frames: frames.clone(),
        hit,
        evicted,
        frame_index,
        helper: queue.helper_state(future),
        narration,
        stats: *stats,
    }
}
