//! Countdown: tick the timer down while the user picks a category.
//!
//! For tick index `i` (from 0) the timer shows `N - (i + 1)`. Tick `N + 1`
//! ends the countdown without emitting. A value below 1 also clears the
//! themes so the choice disappears with the last second. A zero-length
//! countdown runs as one second so the themes still get cleared.

use std::time::Duration;

use log::{debug, warn};
use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;

use super::{ActionSender, EpicSettings, Queued};
use crate::core::action::Action;

/// Actions emitted for one tick showing `value`.
pub fn step(value: u32) -> Vec<Action> {
    if value < 1 {
        vec![Action::SetTimer(value), Action::SetThemes(Vec::new())]
    } else {
        vec![Action::SetTimer(value)]
    }
}

pub async fn run(
    token: CancellationToken,
    instance: u64,
    settings: EpicSettings,
    sender: ActionSender,
) {
    // interval_at panics on a zero period
    let period = settings.tick.max(Duration::from_millis(1));
    let seconds = settings.countdown_secs.max(1);
    let mut ticker = interval_at(Instant::now() + period, period);
    let mut count: u32 = 0;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Countdown cancelled after {} ticks", count);
                return;
            }
            _ = ticker.tick() => {}
        }

        count += 1;
        if count > seconds {
            debug!("Countdown finished after {} ticks", count - 1);
            return;
        }

        for action in step(seconds - count) {
            if token.is_cancelled() {
                return;
            }
            if sender.send(Queued::Countdown { instance, action }).is_err() {
                warn!("Failed to send countdown tick: receiver dropped");
                return;
            }
        }
    }
}
