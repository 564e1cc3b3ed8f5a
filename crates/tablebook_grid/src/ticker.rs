// --- File: crates/tablebook_grid/src/ticker.rs ---
//! Periodic clock events for the now line.

use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use crate::grid::GridEvent;
use crate::now_indicator::venue_now;

const MIN_PERIOD: Duration = Duration::from_millis(100);

/// Background task sending [`GridEvent::Tick`] every `period`, the first one immediately.
///
/// The task stops when the ticker is dropped or the receiver goes away.
#[derive(Debug)]
pub struct NowTicker {
    handle: JoinHandle<()>,
}

impl NowTicker {
    /// Ticks with the venue's wall-clock time.
    pub fn spawn(period: Duration, tz: Tz, sender: Sender<GridEvent>) -> Self {
        Self::spawn_with_clock(period, move || venue_now(tz).time(), sender)
    }

    pub fn spawn_with_clock<F>(period: Duration, clock: F, sender: Sender<GridEvent>) -> Self
    where
        F: Fn() -> NaiveTime + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let handle = tokio::spawn(async move {
            let mut ticks = interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if sender.send(GridEvent::Tick(clock())).await.is_err() {
                    debug!("Now ticker receiver closed, stopping");
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Aborts the task now; dropping the ticker does the same.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for NowTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
