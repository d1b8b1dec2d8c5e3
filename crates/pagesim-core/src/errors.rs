//! Error taxonomy for the simulation core.

use crate::MAX_FRAMES;
use thiserror::Error;

/// Result alias used across the pagesim crates.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors surfaced by the simulation core and its input boundary.
///
/// The engine itself is total: every error here is raised while
/// validating inputs, before a run starts. Simulation never fails
/// mid-run, and nothing is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A policy tag that is not one of `fifo`, `lru`, `optimal`.
    #[error("unsupported replacement policy: '{0}' (expected fifo, lru, or optimal)")]
    UnsupportedPolicy(String),

    /// The reference string parsed to zero pages.
    #[error("reference string must contain at least one page")]
    EmptyReferenceString,

    /// Frame count outside the supported range.
    #[error("frame count {0} is out of range (expected 1..={MAX_FRAMES})")]
    InvalidFrameCount(usize),

    /// A scenario file could not be read or did not validate.
    #[error("invalid scenario: {0}")]
    ScenarioError(String),
}
