//! Deterministic page-replacement simulation engine.
//!
//! Given a reference string, a frame count, and an eviction policy, the
//! engine computes the complete state history of the run up front: one
//! immutable [`StepSnapshot`] per referenced page, carrying the frame
//! contents after the step, the hit/fault outcome, the policy's helper
//! ordering, a narration line, and cumulative statistics.
//!
//! The engine is a pure function. Same inputs always produce an
//! identical [`History`]; there is no clock, randomness, or hidden
//! state anywhere in this crate.
//!
//! ```
//! use pagesim_core::{simulate, Policy};
//!
//! let history = simulate(&[1, 2, 1, 3], 2, Policy::Fifo);
//! assert_eq!(history.len(), 4);
//! assert_eq!(history.final_stats().faults, 3);
//! ```

pub mod engine;
pub mod errors;
pub mod policy;
pub mod types;

pub use engine::simulate;
pub use errors::{Result, SimError};
pub use policy::Policy;
pub use types::{FrameSet, HelperState, History, Page, Statistics, StepSnapshot};

/// Maximum number of frames a run may configure.
pub const MAX_FRAMES: usize = 10;
