//! Error types for the stress harness

use crate::core::job::JobKind;

/// Result type for stress harness operations
pub type Result<T> = std::result::Result<T, StressError>;

/// Errors that can occur while driving the daemon or the worker pool
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StressError {
    /// A daemon client operation failed
    #[error("client operation '{operation}' failed: {message}")]
    Client {
        /// Name of the client operation (pull, tag, build, list)
        operation: String,
        /// Error message reported by the client
        message: String,
    },

    /// Pulling the reference image failed
    #[error("failed to pull {reference:?}: {message}")]
    Pull {
        /// Image reference that was being pulled
        reference: String,
        /// Underlying error message
        message: String,
    },

    /// Tagging an image failed
    // The field is deliberately not named `source`; thiserror would treat
    // it as the error's #[source], which requires an Error impl.
    #[error("failed to tag {source_image} as {target}: {message}")]
    Tag {
        /// Source image reference
        source_image: String,
        /// Target tag
        target: String,
        /// Underlying error message
        message: String,
    },

    /// Building an image failed
    #[error("failed to build image {reference}: {message}")]
    Build {
        /// Tag the build was meant to produce
        reference: String,
        /// Underlying error message
        message: String,
    },

    /// Failed to spawn a worker or producer thread
    #[error("failed to spawn thread #{thread_id}: {source}")]
    Spawn {
        /// ID of the thread that failed to spawn
        thread_id: usize,
        /// Source IO error
        #[source]
        source: std::io::Error,
    },

    /// Failed to join a worker thread
    #[error("failed to join worker thread #{thread_id}: {message}")]
    Join {
        /// ID of the thread that failed to join
        thread_id: usize,
        /// Error message
        message: String,
    },

    /// A job action failed; recorded by the pool supervisor as the run's
    /// first failure
    #[error("[worker {worker_id}] {kind} job failed: {message}")]
    JobFailed {
        /// ID of the worker that ran the job
        worker_id: usize,
        /// Kind of the failed job
        kind: JobKind,
        /// Error message from the job action
        message: String,
    },

    /// Job submitted after the pool was cancelled
    #[error("worker pool is shut down")]
    PoolShutDown,

    /// A stress sampling round failed
    #[error("failed sampling round {round}: {message}")]
    Sampling {
        /// Zero-based index of the failed round
        round: usize,
        /// Underlying error message
        message: String,
    },

    /// IO error during build context preparation
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// General error
    #[error("{0}")]
    Other(String),
}

impl StressError {
    /// Create a client operation error
    pub fn client(operation: impl Into<String>, message: impl Into<String>) -> Self {
        StressError::Client {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a pull error
    pub fn pull(reference: impl Into<String>, message: impl Into<String>) -> Self {
        StressError::Pull {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create a tag error
    pub fn tag(
        source_image: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        StressError::Tag {
            source_image: source_image.into(),
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a build error
    pub fn build(reference: impl Into<String>, message: impl Into<String>) -> Self {
        StressError::Build {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create a spawn error
    pub fn spawn(thread_id: usize, source: std::io::Error) -> Self {
        StressError::Spawn { thread_id, source }
    }

    /// Create a join error
    pub fn join(thread_id: usize, message: impl Into<String>) -> Self {
        StressError::Join {
            thread_id,
            message: message.into(),
        }
    }

    /// Create a job failure error
    pub fn job_failed(worker_id: usize, kind: JobKind, message: impl Into<String>) -> Self {
        StressError::JobFailed {
            worker_id,
            kind,
            message: message.into(),
        }
    }

    /// Create a sampling round error
    pub fn sampling(round: usize, message: impl Into<String>) -> Self {
        StressError::Sampling {
            round,
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        StressError::Other(msg.into())
    }
}
