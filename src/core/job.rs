//! Job kinds and the unit of work submitted to the worker pool

use crate::core::countdown::Countdown;
use crate::core::error::Result;
use std::fmt;

/// The closed set of job kinds the harness submits.
///
/// Kinds are a compile-time enumeration rather than free-form strings, so the
/// pool's per-kind counters cover every kind from construction and unknown
/// kinds cannot slip past the snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Tags an existing image under a new synthetic name
    ImageTag,
    /// Builds an image from a synthesized context archive
    ImageBuild,
    /// Removes an image. Reserved extension point; the default
    /// configuration never submits jobs of this kind.
    ImageRemove,
}

impl JobKind {
    /// All kinds in the fixed order used by pool snapshots.
    pub const ALL: [JobKind; 3] = [JobKind::ImageTag, JobKind::ImageBuild, JobKind::ImageRemove];

    /// Stable name used in the log stream.
    pub fn name(self) -> &'static str {
        match self {
            JobKind::ImageTag => "ImageTags",
            JobKind::ImageBuild => "ImageBuilds",
            JobKind::ImageRemove => "ImageRemoves",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Boxed job action, executed exactly once by exactly one worker.
pub type JobAction = Box<dyn FnOnce() -> Result<()> + Send>;

/// A unit of work: a kind tag plus a fallible action.
///
/// A job may carry a [`Countdown`] handle; the handle is released when the
/// job finishes, or when the job is dropped unexecuted (pool abort, rejected
/// submission). Phase waiters are therefore never leaked.
pub struct Job {
    kind: JobKind,
    action: Option<JobAction>,
    completion: Option<Countdown>,
}

impl Job {
    /// Create a job with no completion tracking.
    pub fn new<F>(kind: JobKind, action: F) -> Self
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        Self {
            kind,
            action: Some(Box::new(action)),
            completion: None,
        }
    }

    /// Create a job tracked by `countdown`.
    ///
    /// Registers the job with the countdown immediately; the countdown is
    /// decremented when this job finishes or is discarded.
    pub fn tracked<F>(kind: JobKind, countdown: &Countdown, action: F) -> Self
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        countdown.add(1);
        Self {
            kind,
            action: Some(Box::new(action)),
            completion: Some(countdown.clone()),
        }
    }

    /// The kind tag of this job.
    pub fn kind(&self) -> JobKind {
        self.kind
    }

    /// Run the job's action.
    ///
    /// The completion handle is released when the job is dropped, not here;
    /// the worker drops the job only after in-flight counters and any
    /// failure record have settled.
    pub(crate) fn execute(&mut self) -> Result<()> {
        match self.action.take() {
            Some(action) => action(),
            // The action is only taken here, so this is unreachable in
            // practice; fail loudly rather than silently succeed.
            None => Err(crate::core::StressError::other(
                "job action already executed",
            )),
        }
    }
}

impl Drop for Job {
    fn drop(&mut self) {
        if let Some(countdown) = self.completion.take() {
            countdown.done();
        }
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("kind", &self.kind)
            .field("tracked", &self.completion.is_some())
            .finish()
    }
}
