//! Worker thread implementation

use crate::core::{Job, Result, StressError};
use crate::pool::worker_pool::PoolShared;
use crossbeam_channel::{select, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A worker thread that consumes jobs from the shared queue until the
/// pool's cancellation signal closes.
pub(crate) struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    /// Spawn a new worker.
    ///
    /// The worker selects between the cancellation signal and the job
    /// queue; it exits when the signal closes or the queue disconnects.
    pub(crate) fn spawn(
        id: usize,
        shared: Arc<PoolShared>,
        jobs: Receiver<Job>,
        cancel: Receiver<()>,
    ) -> Result<Self> {
        let thread = thread::Builder::new()
            .name(format!("stress-worker-{}", id))
            .spawn(move || {
                Self::run(id, &shared, &jobs, &cancel);
            })
            .map_err(|e| StressError::spawn(id, e))?;

        Ok(Self {
            id,
            thread: Some(thread),
        })
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    /// Join the worker thread.
    pub(crate) fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| StressError::join(self.id, "worker panicked"))?;
        }
        Ok(())
    }

    /// Main worker loop.
    ///
    /// Counters are adjusted around the action unconditionally, so a failed
    /// job can never leak an in-flight increment. A failed action aborts
    /// the whole pool: the error is recorded, the cancellation signal is
    /// closed, and the queue is drained so phase waiters are released.
    fn run(id: usize, shared: &PoolShared, jobs: &Receiver<Job>, cancel: &Receiver<()>) {
        loop {
            select! {
                recv(cancel) -> _ => {
                    // The sender is only ever dropped, never written to;
                    // any wakeup here means shutdown.
                    break;
                }
                recv(jobs) -> msg => {
                    let mut job = match msg {
                        Ok(job) => job,
                        Err(_) => break,
                    };

                    let kind = job.kind();
                    shared.increment(kind);
                    let result = job.execute();
                    shared.decrement(kind);

                    if let Err(err) = result {
                        log::error!("[worker {}] {} job failed: {}", id, kind, err);
                        shared.abort(StressError::job_failed(id, kind, err.to_string()));
                        // Dropping the job after the abort record means a
                        // phase waiter woken by this job always observes
                        // the failure.
                        drop(job);
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            // Backstop for pools dropped without an explicit shutdown; the
            // cancellation signal has already been closed by the pool's own
            // Drop, so the thread is either finished or about to be.
            const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

            let start = std::time::Instant::now();
            loop {
                if thread.is_finished() {
                    if thread.join().is_err() {
                        log::error!("worker {} panicked during shutdown", self.id);
                    }
                    break;
                }
                if start.elapsed() >= JOIN_TIMEOUT {
                    log::warn!(
                        "worker {} did not finish within {}s during drop; thread may be leaked",
                        self.id,
                        JOIN_TIMEOUT.as_secs()
                    );
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}
