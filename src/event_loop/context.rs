//! Single-threaded execution context for a connection.
//!
//! # Responsibilities
//! - Run closures strictly one at a time against the owned state
//! - Bridge results back to callers running under any concurrency model
//! - Expose the timer gauge for resource-leak checks
//!
//! # Design Decisions
//! - State is moved into the consumer task and only ever touched there,
//!   so exclusive access is enforced by ownership rather than a lock
//! - Closures are boxed `FnOnce(&mut S)`; the state type itself never
//!   crosses the channel

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// A unit of work executed on the owning context.
pub(crate) type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

/// The context has shut down and can no longer run closures.
#[derive(Debug, Error)]
#[error("execution context closed")]
pub struct LoopClosed;

/// Spawns serialized execution contexts.
pub struct EventLoop;

impl EventLoop {
    /// Spawn a context owning `state`.
    ///
    /// Must be called from within a Tokio runtime. The context runs until
    /// every [`Handle`] clone has been dropped.
    pub fn spawn<S: Send + 'static>(mut state: S) -> Handle<S> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job<S>>();

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job(&mut state);
            }
        });

        Handle {
            jobs: tx,
            active_timers: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// Handle onto a serialized context, cloneable and usable from any task.
pub struct Handle<S> {
    pub(crate) jobs: mpsc::UnboundedSender<Job<S>>,
    pub(crate) active_timers: Arc<AtomicUsize>,
}

impl<S> Clone for Handle<S> {
    fn clone(&self) -> Self {
        Self {
            jobs: self.jobs.clone(),
            active_timers: Arc::clone(&self.active_timers),
        }
    }
}

impl<S: 'static> Handle<S> {
    /// Run `job` on the context and await its result.
    ///
    /// The closure executes on the context's consumer task; the caller
    /// suspends until the result crosses back over a oneshot channel.
    pub async fn enqueue<T, F>(&self, job: F) -> Result<T, LoopClosed>
    where
        T: Send + 'static,
        F: FnOnce(&mut S) -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.jobs
            .send(Box::new(move |state| {
                let _ = tx.send(job(state));
            }))
            .map_err(|_| LoopClosed)?;
        rx.await.map_err(|_| LoopClosed)
    }

    /// Fire-and-forget variant of [`Handle::enqueue`].
    pub fn submit<F>(&self, job: F) -> Result<(), LoopClosed>
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        self.jobs.send(Box::new(job)).map_err(|_| LoopClosed)
    }

    /// Number of timers scheduled on this context that have neither fired
    /// nor been cancelled.
    pub fn active_timers(&self) -> usize {
        self.active_timers.load(Ordering::Relaxed)
    }
}
