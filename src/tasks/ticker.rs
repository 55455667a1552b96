//! Cancellable once-per-period background task

use std::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Handle to a repeating task; dropping it cancels the task
///
/// The callback first runs one full period after spawning and keeps
/// running until it returns `false` or the handle is dropped. Ticks
/// missed while the host was busy are delayed, not replayed.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a task calling `on_tick` every `period`
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let first = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if !on_tick() {
                    debug!("Ticker stopped by its callback");
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Whether the task has already exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task; equivalent to dropping the handle
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
