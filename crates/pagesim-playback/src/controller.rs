//! The playback state machine.

use crate::sinks::{DisplaySink, Severity, StatusSink};
use pagesim_core::History;
use std::time::Duration;
use tracing::debug;

/// Playback phase.
///
/// A controller always holds a history, so there is no "no history
/// loaded" state. `Finished` is reached only by forward playback or
/// stepping arriving at the last snapshot; playing again from there
/// restarts from step 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Paused,
    Playing,
    Finished,
}

/// A request for the owner to wake the controller after `delay`.
///
/// The epoch ties the wakeup to the scheduling operation that produced
/// it: `pause` (and a new `play`) invalidate older epochs, making stale
/// wakeups no-ops. At most one live request exists at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub(crate) epoch: u64,
    /// How long to wait before calling [`PlaybackController::on_timer`].
    pub delay: Duration,
}

/// Control-value bounds accepted by [`PlaybackController::set_speed`].
pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;

const DEFAULT_SPEED: u8 = 5;

/// Maps a speed control value to the delay between automatic advances.
/// Inverse and bounded: speed 1 -> 2s, speed 10 -> 200ms.
fn delay_for_speed(speed: u8) -> Duration {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    Duration::from_millis(u64::from(MAX_SPEED - speed + 1) * 200)
}

/// Owns a history, a cursor into it, and the play/pause/speed state
/// machine. Renders through the display and status sinks while keeping
/// the execution log monotone and duplicate-free.
pub struct PlaybackController<D, S> {
    history: History,
    display: D,
    status: S,
    cursor: usize,
    phase: PlaybackPhase,
    delay: Duration,
    /// Highest cursor whose narration has been logged.
    logged_through: Option<usize>,
    /// Current timer generation; requests from older generations are
    /// ignored by [`Self::on_timer`].
    epoch: u64,
}

impl<D: DisplaySink, S: StatusSink> PlaybackController<D, S> {
    /// Create a paused controller positioned at step 0.
    ///
    /// `history` must be non-empty; the caller validates inputs before
    /// simulating, so an empty history cannot reach this layer.
    pub fn new(history: History, display: D, status: S) -> Self {
        debug_assert!(!history.is_empty(), "playback requires a non-empty history");
        Self {
            history,
            display,
            status,
            cursor: 0,
            phase: PlaybackPhase::Paused,
            delay: delay_for_speed(DEFAULT_SPEED),
            logged_through: None,
            epoch: 0,
        }
    }

    /// Start or resume automatic playback.
    ///
    /// No-op while already playing. From the last snapshot this is a
    /// full replay: the cursor returns to 0 and the log is cleared
    /// before anything renders. The current step is rendered
    /// synchronously; the returned request schedules the next advance.
    pub fn play(&mut self) -> Option<TimerRequest> {
        if self.phase == PlaybackPhase::Playing {
            return None;
        }
        if self.cursor == self.last_index() {
            debug!("restarting playback from step 0");
            self.cursor = 0;
            self.logged_through = None;
            self.status.clear_log();
        }
        self.phase = PlaybackPhase::Playing;
        self.epoch += 1;
        self.status.set_controls_enabled(true);
        self.render(false);
        if self.cursor == self.last_index() {
            // Single-step history: rendering step 0 already finished it.
            self.finish();
            return None;
        }
        Some(TimerRequest {
            epoch: self.epoch,
            delay: self.delay,
        })
    }

    /// Stop automatic playback. Cancels any pending advance.
    pub fn pause(&mut self) {
        if self.phase != PlaybackPhase::Playing {
            return;
        }
        debug!(cursor = self.cursor, "playback paused");
        self.epoch += 1;
        self.phase = PlaybackPhase::Paused;
        self.status.set_controls_enabled(false);
    }

    /// Timer wakeup. Advances one step if the request is still current.
    pub fn on_timer(&mut self, request: TimerRequest) -> Option<TimerRequest> {
        if self.phase != PlaybackPhase::Playing || request.epoch != self.epoch {
            // Cancelled or superseded; a stale timer must not advance
            // the cursor it no longer owns.
            return None;
        }
        self.cursor += 1;
        self.render(false);
        if self.cursor == self.last_index() {
            self.finish();
            return None;
        }
        Some(TimerRequest {
            epoch: self.epoch,
            delay: self.delay,
        })
    }

    /// Terminal transition: self-pause, signal completion, unlock
    /// controls.
    fn finish(&mut self) {
        debug!("playback reached the final step");
        self.epoch += 1;
        self.phase = PlaybackPhase::Finished;
        self.status
            .set_message("Simulation complete.", Severity::Success);
        self.status.set_controls_enabled(false);
    }

    /// Manually advance one step. No-op at the last snapshot.
    pub fn step_forward(&mut self) {
        if self.cursor >= self.last_index() {
            return;
        }
        self.pause();
        self.cursor += 1;
        // Forward stepping always enters unseen territory, so it logs.
        self.render(false);
        if self.cursor == self.last_index() {
            self.phase = PlaybackPhase::Finished;
        }
    }

    /// Manually step back one step. No-op at step 0. Revisiting seen
    /// history renders without logging.
    pub fn step_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.pause();
        self.phase = PlaybackPhase::Paused;
        self.cursor -= 1;
        self.render(true);
    }

    /// Adjust playback speed. Takes effect on the next scheduled
    /// advance; an already pending one keeps its original delay.
    pub fn set_speed(&mut self, value: u8) {
        self.delay = delay_for_speed(value);
        debug!(delay_ms = self.delay.as_millis() as u64, "speed changed");
    }

    /// The request matching the currently scheduled advance, if any.
    /// Lets an owner that dropped its sleep re-arm without replaying.
    pub fn timer_request(&self) -> Option<TimerRequest> {
        (self.phase == PlaybackPhase::Playing).then_some(TimerRequest {
            epoch: self.epoch,
            delay: self.delay,
        })
    }

    /// Push the snapshot at the cursor to both sinks; log its narration
    /// unless suppressed or already seen.
    fn render(&mut self, suppress_log: bool) {
        let current = &self.history.steps()[self.cursor];
        let previous = self.cursor.checked_sub(1).map(|i| &self.history.steps()[i]);
        self.display.render(
            previous,
            current,
            self.history.reference_string(),
            self.history.policy(),
        );
        self.status
            .update_statistics(&current.stats, self.cursor + 1, self.history.len());
        let unseen = self.logged_through.map_or(true, |w| self.cursor > w);
        if !suppress_log && unseen {
            self.status.append_log(&current.narration);
            self.logged_through = Some(self.cursor);
        }
    }

    fn last_index(&self) -> usize {
        self.history.len() - 1
    }

    /// Current cursor position (0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current phase.
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Delay applied to the next scheduled advance.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The history being replayed.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The status sink (primarily for inspection in tests).
    pub fn status(&self) -> &S {
        &self.status
    }

    /// The display sink.
    pub fn display(&self) -> &D {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_mapping_is_inverse_and_clamped() {
        assert_eq!(delay_for_speed(1), Duration::from_millis(2000));
        assert_eq!(delay_for_speed(10), Duration::from_millis(200));
        assert!(delay_for_speed(3) > delay_for_speed(7));
        assert_eq!(delay_for_speed(0), delay_for_speed(1));
        assert_eq!(delay_for_speed(200), delay_for_speed(10));
    }
}
