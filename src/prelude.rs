//! Convenient imports for common usage

pub use crate::bench::{bootstrap, measure, stress, BootstrapConfig, StressConfig};
pub use crate::client::{BuildOptions, DaemonClient, ImageSummary};
pub use crate::core::{Countdown, Job, JobKind, Result, StressError};
pub use crate::pool::{PoolSnapshot, WorkerPool};
