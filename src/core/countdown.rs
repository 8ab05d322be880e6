//! Phase completion latch shared between producers and the pool

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::Duration;

/// A countdown latch tracking outstanding jobs for one phase.
///
/// Producers register work with [`add`](Self::add) (once per job, at job
/// construction) and block in [`wait`](Self::wait) until every registered
/// job has called [`done`](Self::done). Clones share the same count.
///
/// # Example
///
/// ```rust
/// use daemon_stress::core::Countdown;
/// use std::thread;
///
/// let countdown = Countdown::new();
/// countdown.add(2);
///
/// let c = countdown.clone();
/// thread::spawn(move || {
///     c.done();
///     c.done();
/// });
///
/// countdown.wait();
/// assert_eq!(countdown.remaining(), 0);
/// ```
#[derive(Clone, Default)]
pub struct Countdown {
    inner: Arc<CountdownInner>,
}

#[derive(Default)]
struct CountdownInner {
    count: Mutex<i64>,
    zero: Condvar,
}

impl Countdown {
    /// Create a latch with a count of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `n` additional outstanding jobs.
    pub fn add(&self, n: i64) {
        let mut count = self.inner.count.lock();
        *count += n;
    }

    /// Mark one job as finished, waking waiters when the count reaches zero.
    ///
    /// # Panics
    ///
    /// Panics if called more times than [`add`](Self::add) registered; a
    /// negative count means a job was double-counted.
    pub fn done(&self) {
        let mut count = self.inner.count.lock();
        *count -= 1;
        assert!(*count >= 0, "countdown went negative");
        if *count == 0 {
            self.inner.zero.notify_all();
        }
    }

    /// Current number of outstanding jobs.
    pub fn remaining(&self) -> i64 {
        *self.inner.count.lock()
    }

    /// Block until the count reaches zero.
    ///
    /// Returns immediately if nothing is outstanding.
    pub fn wait(&self) {
        let mut count = self.inner.count.lock();
        while *count > 0 {
            self.inner.zero.wait(&mut count);
        }
    }

    /// Block until the count reaches zero or `timeout` elapses.
    ///
    /// Returns `true` if the count reached zero.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        let mut count = self.inner.count.lock();
        while *count > 0 {
            if self
                .inner
                .zero
                .wait_until(&mut count, deadline)
                .timed_out()
            {
                return *count == 0;
            }
        }
        true
    }
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("remaining", &self.remaining())
            .finish()
    }
}
