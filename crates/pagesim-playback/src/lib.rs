//! Playback over a precomputed simulation history.
//!
//! The [`PlaybackController`] owns a [`pagesim_core::History`] and a
//! cursor into it, and drives two narrow collaborator contracts: a
//! [`DisplaySink`] that renders snapshots and a [`StatusSink`] that
//! receives statistics, messages, and the execution log. The log is
//! append-only and monotone: scrubbing backward and forward never
//! duplicates or reorders entries.
//!
//! Automatic playback uses a timer-request protocol rather than an
//! internal timer: scheduling operations hand back a [`TimerRequest`]
//! and the owner (see [`driver`]) sleeps and calls
//! [`PlaybackController::on_timer`]. Requests carry an epoch; `pause`
//! invalidates outstanding epochs, so a stale wakeup is a no-op and at
//! most one live advance can ever be pending.

pub mod controller;
pub mod driver;
pub mod sinks;

pub use controller::{PlaybackController, PlaybackPhase, TimerRequest};
pub use driver::run_to_completion;
pub use sinks::{DisplaySink, Severity, StatusSink};
