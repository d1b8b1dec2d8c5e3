//! Collaborator contracts driven by the playback controller.
//!
//! Implementations live in the outer layer (terminal, tests). Both
//! contracts are deliberately narrow: sinks receive already-computed
//! snapshots and must not feed anything back into simulation state.

use pagesim_core::{Page, Policy, Statistics, StepSnapshot};

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
    Success,
}

/// Renders one snapshot. Must be idempotent and purely visual.
///
/// The previous snapshot is passed explicitly so an implementation can
/// highlight the slot that changed (e.g. mark the evicted frame)
/// without any shared state correlating consecutive renders.
pub trait DisplaySink {
    fn render(
        &mut self,
        previous: Option<&StepSnapshot>,
        current: &StepSnapshot,
        reference_string: &[Page],
        policy: Policy,
    );
}

/// Receives statistics, messages, and the execution log.
pub trait StatusSink {
    /// Update cumulative statistics; `step` is 1-based for display.
    fn update_statistics(&mut self, stats: &Statistics, step: usize, total_steps: usize);

    /// Show a transient status message.
    fn set_message(&mut self, text: &str, severity: Severity);

    /// Append one narration line to the execution log.
    fn append_log(&mut self, text: &str);

    /// Discard the execution log (full replay restarts it).
    fn clear_log(&mut self);

    /// Lock or unlock input controls while automatic playback runs.
    fn set_controls_enabled(&mut self, running: bool);
}
