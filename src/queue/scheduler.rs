//! Schedulers for deferred drains
//!
//! A scheduler accepts a unit of work and guarantees it runs eventually, as a
//! whole, with no preemption by other units it runs. Both schedulers here run
//! jobs one at a time in submission order.

use crate::core::sync::lock_or_recover;
use crate::queue::error::{QueueError, QueueResult};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

/// One deferred drain
pub type DrainJob = Box<dyn FnOnce() + Send + 'static>;

pub trait DrainScheduler: Send + Sync {
    /// Queue a job for later execution. Never runs the job inline.
    fn submit(&self, job: DrainJob) -> QueueResult<()>;
}

/// FIFO scheduler backed by a single tokio worker task
///
/// Jobs run on the blocking pool of the runtime the scheduler was spawned
/// on, one after another in submission order; the worker awaits each job
/// before starting the next. A job that panics is logged and skipped; the
/// worker carries on with the next job. The worker exits when the scheduler is
/// dropped or its runtime shuts down.
pub struct TokioScheduler {
    sender: UnboundedSender<DrainJob>,
}

impl TokioScheduler {
    /// Spawn the worker onto the given runtime
    pub fn spawn(handle: &Handle) -> Self {
        let (sender, mut receiver) = unbounded_channel::<DrainJob>();

        handle.spawn(async move {
            log::trace!("Drain worker started");
            while let Some(job) = receiver.recv().await {
                // Callbacks and the drain guard wait are blocking
                match tokio::task::spawn_blocking(job).await {
                    Ok(()) => {}
                    Err(e) if e.is_panic() => {
                        log::error!("Deferred drain panicked; continuing with next job")
                    }
                    Err(e) => {
                        log::warn!("Deferred drain did not finish: {}", e);
                        break;
                    }
                }
            }
            log::trace!("Drain worker stopped");
        });

        Self { sender }
    }

    /// Spawn the worker onto the runtime of the calling context
    pub fn current() -> QueueResult<Self> {
        let handle = Handle::try_current().map_err(|e| QueueError::SchedulerUnavailable {
            message: e.to_string(),
        })?;
        Ok(Self::spawn(&handle))
    }
}

impl DrainScheduler for TokioScheduler {
    fn submit(&self, job: DrainJob) -> QueueResult<()> {
        self.sender
            .send(job)
            .map_err(|_| QueueError::SchedulerUnavailable {
                message: "drain worker has stopped".to_string(),
            })
    }
}

/// Scheduler that holds jobs until the owner runs them
///
/// Lets a harness observe the state between a deferred drain being
/// scheduled and it actually running, without any timing assumptions.
#[derive(Default)]
pub struct ManualScheduler {
    jobs: Mutex<VecDeque<DrainJob>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs waiting to run
    pub fn queued(&self) -> usize {
        lock_or_recover(&self.jobs, "manual scheduler").len()
    }

    /// Run every queued job in FIFO order, returning how many ran
    ///
    /// Jobs submitted while this runs are picked up in the same call.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Lock released before running so jobs may submit more work
            let next = lock_or_recover(&self.jobs, "manual scheduler").pop_front();
            match next {
                Some(job) => {
                    job();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl DrainScheduler for ManualScheduler {
    fn submit(&self, job: DrainJob) -> QueueResult<()> {
        lock_or_recover(&self.jobs, "manual scheduler").push_back(job);
        Ok(())
    }
}
