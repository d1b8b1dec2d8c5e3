//! Replacement policies and their working state.
//!
//! The policy is a closed enum: each variant carries its own victim
//! selection, so adding a policy means adding a variant here rather
//! than threading string tags through the engine.

use crate::errors::SimError;
use crate::types::{FrameSet, HelperState, Page};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// The rule determining which resident page is evicted on a
/// replacement fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Evict the page resident longest, by load order alone.
    Fifo,
    /// Evict the least recently referenced page.
    Lru,
    /// Evict the page whose next use is farthest in the future.
    Optimal,
}

impl Policy {
    /// All supported policies, in presentation order.
    pub const ALL: [Policy; 3] = [Policy::Fifo, Policy::Lru, Policy::Optimal];
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Lru => write!(f, "LRU"),
            Policy::Optimal => write!(f, "Optimal"),
        }
    }
}

impl FromStr for Policy {
    type Err = SimError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "lru" => Ok(Policy::Lru),
            "optimal" | "opt" => Ok(Policy::Optimal),
            other => Err(SimError::UnsupportedPolicy(other.to_string())),
        }
    }
}

/// Per-run working state for a policy.
///
/// FIFO and LRU maintain a resident ordering that mirrors the frame
/// set; Optimal keeps nothing and scans the unconsumed suffix of the
/// reference string when it needs a victim.
#[derive(Debug)]
pub(crate) enum PolicyQueue {
    Fifo(VecDeque<Page>),
    Lru(Vec<Page>),
    Optimal,
}

impl PolicyQueue {
    pub(crate) fn new(policy: Policy) -> Self {
        match policy {
            Policy::Fifo => PolicyQueue::Fifo(VecDeque::new()),
            Policy::Lru => PolicyQueue::Lru(Vec::new()),
            Policy::Optimal => PolicyQueue::Optimal,
        }
    }

    /// Record a hit on `page`. Only LRU reorders on hits.
    pub(crate) fn touch(&mut self, page: Page) {
        match self {
            PolicyQueue::Fifo(_) | PolicyQueue::Optimal => {}
            PolicyQueue::Lru(stack) => {
                if let Some(pos) = stack.iter().position(|&p| p == page) {
                    stack.remove(pos);
                }
                stack.insert(0, page);
            }
        }
    }

    /// Record that `page` was loaded into a frame, after any eviction.
    pub(crate) fn admit(&mut self, page: Page) {
        match self {
            PolicyQueue::Fifo(queue) => queue.push_back(page),
            PolicyQueue::Lru(stack) => stack.insert(0, page),
            PolicyQueue::Optimal => {}
        }
    }

    /// Choose and forget the victim for a replacement fault.
    ///
    /// `frames` holds the current residents and `future` the not yet
    /// consumed suffix of the reference string (used by Optimal only).
    /// Frames are full when this is called, so FIFO/LRU orderings are
    /// non-empty by the membership invariant.
    pub(crate) fn evict(&mut self, frames: &FrameSet, future: &[Page]) -> Option<Page> {
        match self {
            PolicyQueue::Fifo(queue) => queue.pop_front(),
            PolicyQueue::Lru(stack) => stack.pop(),
            PolicyQueue::Optimal => farthest_next_use(frames, future),
        }
    }

    /// Snapshot of the helper ordering shown to the user.
    pub(crate) fn helper_state(&self, future: &[Page]) -> HelperState {
        match self {
            PolicyQueue::Fifo(queue) => HelperState::FifoQueue(queue.iter().copied().collect()),
            PolicyQueue::Lru(stack) => HelperState::LruStack(stack.clone()),
            PolicyQueue::Optimal => HelperState::FutureWindow(future.to_vec()),
        }
    }
}

/// Optimal victim selection: the resident whose next occurrence in
/// `future` is farthest away, with never-used-again treated as
/// infinitely far.
///
/// Ties break to the lowest frame index: slots are scanned in index
/// order and a candidate is only displaced by a strictly farther one.
fn farthest_next_use(frames: &FrameSet, future: &[Page]) -> Option<Page> {
    let mut victim: Option<(Page, Option<usize>)> = None;
    for (_, resident) in frames.residents() {
        let distance = future.iter().position(|&p| p == resident);
        let farther = match (&victim, distance) {
            (None, _) => true,
            // An earlier slot already never occurs again; keep it.
            (Some((_, None)), _) => false,
            (Some((_, Some(_))), None) => true,
            (Some((_, Some(best))), Some(cand)) => cand > *best,
        };
        if farther {
            victim = Some((resident, distance));
        }
    }
    victim.map(|(page, _)| page)
}
