//! Bounded worker pool with per-kind in-flight counters

use crate::core::{Countdown, Job, JobKind, Result, StressError};
use crate::pool::worker::Worker;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How often a phase waiter re-checks the pool for a recorded failure.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// State shared between the pool handle and its workers.
pub(crate) struct PoolShared {
    /// In-flight count per job kind. Built eagerly over [`JobKind::ALL`],
    /// so every kind is present from construction.
    counts: HashMap<JobKind, AtomicI64>,
    /// Dropping the sender is the broadcast-once cancellation signal.
    cancel: Mutex<Option<Sender<()>>>,
    cancelled: AtomicBool,
    /// First job failure observed by any worker.
    failure: Mutex<Option<StressError>>,
    /// Receiver kept for draining queued jobs on abort.
    jobs: Receiver<Job>,
}

impl PoolShared {
    pub(crate) fn increment(&self, kind: JobKind) {
        if let Some(count) = self.counts.get(&kind) {
            count.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn decrement(&self, kind: JobKind) {
        if let Some(count) = self.counts.get(&kind) {
            count.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Close the cancellation signal. Safe to call more than once.
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Dropping the sender disconnects every worker's receiver clone.
        drop(self.cancel.lock().take());
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Record the run's first failure, cancel the pool, and discard queued
    /// jobs so their completion handles are released.
    pub(crate) fn abort(&self, err: StressError) {
        {
            let mut failure = self.failure.lock();
            if failure.is_none() {
                *failure = Some(err);
            }
        }
        self.cancel();
        while let Ok(job) = self.jobs.try_recv() {
            drop(job);
        }
    }
}

/// A fixed-size pool of workers consuming a bounded FIFO job queue.
///
/// Submissions block when the queue is full (backpressure, not failure), so
/// callers size the capacity to the total workload of a phase. Workers race
/// to dequeue; completion order across workers is not deterministic.
///
/// # Failure policy
///
/// The pool is fail-fast: the first failed job action cancels the whole
/// pool. The failure is recorded and exposed through
/// [`take_failure`](Self::take_failure) rather than terminating the process
/// from inside a worker, so orchestration code decides how the run ends and
/// tests can intercept the abort.
///
/// # Example
///
/// ```rust
/// use daemon_stress::core::{Countdown, Job, JobKind};
/// use daemon_stress::pool::WorkerPool;
///
/// # fn main() -> daemon_stress::core::Result<()> {
/// let pool = WorkerPool::new(4, 16)?;
/// let countdown = Countdown::new();
///
/// for _ in 0..16 {
///     pool.submit(Job::tracked(JobKind::ImageTag, &countdown, || Ok(())))?;
/// }
///
/// pool.wait_phase(&countdown);
/// pool.shutdown()?;
/// # Ok(())
/// # }
/// ```
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    jobs: Sender<Job>,
    workers: Mutex<Vec<Worker>>,
}

impl WorkerPool {
    /// Create a pool and immediately spawn `worker_count` workers.
    ///
    /// # Panics
    ///
    /// Panics if `worker_count` or `queue_capacity` is 0.
    pub fn new(worker_count: usize, queue_capacity: usize) -> Result<Self> {
        assert!(worker_count > 0, "worker_count must be greater than 0");
        assert!(queue_capacity > 0, "queue_capacity must be greater than 0");

        let (jobs_tx, jobs_rx) = crossbeam_channel::bounded::<Job>(queue_capacity);
        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded::<()>(0);

        let counts = JobKind::ALL
            .iter()
            .map(|kind| (*kind, AtomicI64::new(0)))
            .collect();

        let shared = Arc::new(PoolShared {
            counts,
            cancel: Mutex::new(Some(cancel_tx)),
            cancelled: AtomicBool::new(false),
            failure: Mutex::new(None),
            jobs: jobs_rx.clone(),
        });

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            match Worker::spawn(id, Arc::clone(&shared), jobs_rx.clone(), cancel_rx.clone()) {
                Ok(worker) => workers.push(worker),
                Err(err) => {
                    shared.cancel();
                    return Err(err);
                }
            }
        }

        Ok(Self {
            shared,
            jobs: jobs_tx,
            workers: Mutex::new(workers),
        })
    }

    /// Enqueue a job, blocking while the queue is full.
    ///
    /// Fails with [`StressError::PoolShutDown`] once the pool has been shut
    /// down or aborted; the rejected job is dropped, which releases its
    /// completion handle.
    pub fn submit(&self, job: Job) -> Result<()> {
        if self.shared.is_cancelled() {
            return Err(StressError::PoolShutDown);
        }
        self.jobs.send(job).map_err(|_| StressError::PoolShutDown)
    }

    /// Best-effort, non-blocking view of in-flight counts per job kind,
    /// in [`JobKind::ALL`] order.
    ///
    /// The read is not synchronized with any job boundary; treat the result
    /// as approximate.
    pub fn snapshot(&self) -> PoolSnapshot {
        let counts = JobKind::ALL
            .iter()
            .map(|kind| {
                let count = self
                    .shared
                    .counts
                    .get(kind)
                    .map(|c| c.load(Ordering::Relaxed))
                    .unwrap_or(0);
                (*kind, count)
            })
            .collect();
        PoolSnapshot { counts }
    }

    /// Block until `countdown` reaches zero or the pool records a failure.
    ///
    /// Producers call this to wait out a phase; a pool abort discards
    /// queued jobs and releases their handles, so this cannot hang on work
    /// that will never run.
    pub fn wait_phase(&self, countdown: &Countdown) {
        loop {
            if countdown.wait_timeout(WAIT_POLL_INTERVAL) {
                return;
            }
            if self.has_failed() {
                return;
            }
        }
    }

    /// Whether any worker has recorded a job failure.
    pub fn has_failed(&self) -> bool {
        self.shared.failure.lock().is_some()
    }

    /// Take the first recorded job failure, if any.
    pub fn take_failure(&self) -> Option<StressError> {
        self.shared.failure.lock().take()
    }

    /// Number of worker threads still attached to this pool.
    pub fn worker_count(&self) -> usize {
        self.workers.lock().len()
    }

    /// Close the cancellation signal and join all workers.
    ///
    /// Idempotent: the signal closes exactly once and later calls are
    /// no-ops. Queued jobs that no worker claimed are dropped when the last
    /// receiver goes away.
    pub fn shutdown(&self) -> Result<()> {
        self.shared.cancel();

        let workers = std::mem::take(&mut *self.workers.lock());
        for worker in workers {
            let id = worker.id();
            worker
                .join()
                .map_err(|_| StressError::join(id, "worker panicked"))?;
        }
        Ok(())
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            log::error!("failed to shut down worker pool during drop: {}", err);
        }
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.worker_count())
            .field("cancelled", &self.shared.is_cancelled())
            .field("failed", &self.has_failed())
            .finish()
    }
}

/// Point-in-time view of per-kind in-flight counts.
///
/// `Display` renders one `Kind: count` line per kind, matching the format
/// of the stress phase's jobs summary log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    counts: Vec<(JobKind, i64)>,
}

impl PoolSnapshot {
    /// In-flight count for `kind`.
    pub fn count(&self, kind: JobKind) -> i64 {
        self.counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// All `(kind, count)` pairs in [`JobKind::ALL`] order.
    pub fn counts(&self) -> &[(JobKind, i64)] {
        &self.counts
    }
}

impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (kind, count) in &self.counts {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}: {}", kind, count)?;
            first = false;
        }
        Ok(())
    }
}
