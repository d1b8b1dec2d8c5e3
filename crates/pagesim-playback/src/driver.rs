//! Async driver for automatic playback.

use crate::controller::{PlaybackController, TimerRequest};
use crate::sinks::{DisplaySink, StatusSink};
use tracing::debug;

/// Drive playback until it pauses or finishes.
///
/// Starts playback (a no-op if already playing) and then services each
/// [`TimerRequest`] with a `tokio::time` sleep. The controller is only
/// ever touched from this call, preserving the single-owner rule; any
/// `pause` issued between awaits simply ends the loop through the
/// epoch check.
pub async fn run_to_completion<D, S>(controller: &mut PlaybackController<D, S>)
where
    D: DisplaySink,
    S: StatusSink,
{
    let mut pending: Option<TimerRequest> = controller.play().or_else(|| controller.timer_request());
    while let Some(request) = pending {
        tokio::time::sleep(request.delay).await;
        pending = controller.on_timer(request);
    }
    debug!(cursor = controller.cursor(), "automatic playback stopped");
}
