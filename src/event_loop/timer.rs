//! Deferred callbacks on a serialized context.
//!
//! # Responsibilities
//! - Schedule a closure to run on the context after a delay
//! - Guarantee a cancelled timer never enqueues its callback
//! - Keep the active-timer gauge accurate across fire and cancel

use std::time::Duration;

use tokio::sync::oneshot;

use crate::event_loop::context::Handle;

/// Cancellation handle for a scheduled callback.
///
/// Dropping the handle cancels the timer, so callers that want the callback
/// to run must keep the handle alive until it fires.
#[derive(Debug)]
pub struct TimerHandle {
    cancel: oneshot::Sender<()>,
}

impl TimerHandle {
    /// Cancel the timer. A no-op if the callback was already enqueued.
    pub fn cancel(self) {
        let _ = self.cancel.send(());
    }
}

impl<S: 'static> Handle<S> {
    /// Schedule `callback` to run on the context after `delay`.
    ///
    /// The delay elapses off-context, but the callback itself is enqueued
    /// like any other job, so it observes the same serialization guarantee
    /// as every closure running on this context. A zero delay enqueues the
    /// callback as soon as the scheduler wakes, behind anything already
    /// queued.
    pub fn schedule_after<F>(&self, delay: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let jobs = self.jobs.clone();
        let gauge = std::sync::Arc::clone(&self.active_timers);
        gauge.fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    gauge.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
                    let _ = jobs.send(Box::new(callback));
                }
                _ = &mut cancel_rx => {
                    gauge.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
                }
            }
        });

        TimerHandle { cancel: cancel_tx }
    }
}
