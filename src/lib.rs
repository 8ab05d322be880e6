//! # Daemon Stress
//!
//! A micro-benchmarking harness that drives a container-runtime daemon
//! through its control-plane API to detect performance regressions across
//! daemon versions.
//!
//! ## Features
//!
//! - **Worker Pool**: Fixed-size pool consuming a bounded FIFO job queue,
//!   with per-kind in-flight counters and point-in-time snapshots
//! - **Fail-Fast Supervision**: The first failed job cancels the pool and
//!   surfaces the error to the orchestrator instead of killing the process
//! - **Bootstrap Phase**: Pulls one reference image and fans out thousands
//!   of tag jobs, timing submission through completion
//! - **Stress Phase**: Concurrent tag and build load with periodic, timed
//!   samples of daemon-reported image inventory
//! - **Pluggable Client**: The daemon is reached only through the
//!   [`DaemonClient`] trait, so tests run against an in-memory double
//!
//! ## Quick Start
//!
//! ```rust
//! use daemon_stress::prelude::*;
//! use std::io::Read;
//! use std::sync::Arc;
//!
//! // A no-op client; real deployments wrap the daemon's API transport.
//! struct NullClient;
//!
//! impl DaemonClient for NullClient {
//!     fn pull_image(&self, _reference: &str) -> Result<Box<dyn Read + Send>> {
//!         Ok(Box::new(std::io::empty()))
//!     }
//!     fn tag_image(&self, _source: &str, _target: &str) -> Result<()> {
//!         Ok(())
//!     }
//!     fn build_image(&self, _context: Vec<u8>, _options: &BuildOptions) -> Result<()> {
//!         Ok(())
//!     }
//!     fn list_images(&self) -> Result<Vec<ImageSummary>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let client: Arc<dyn DaemonClient> = Arc::new(NullClient);
//!
//! bootstrap(Arc::clone(&client), &BootstrapConfig::new().with_num_images(5))?;
//! stress(
//!     client,
//!     &StressConfig::new()
//!         .with_num_tags(3)
//!         .with_num_builds(2)
//!         .with_num_benchmarks(1),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the Pool Directly
//!
//! ```rust
//! use daemon_stress::core::{Countdown, Job, JobKind};
//! use daemon_stress::pool::WorkerPool;
//!
//! # fn main() -> daemon_stress::core::Result<()> {
//! let pool = WorkerPool::new(8, 64)?;
//! let countdown = Countdown::new();
//!
//! for _ in 0..64 {
//!     pool.submit(Job::tracked(JobKind::ImageTag, &countdown, || Ok(())))?;
//! }
//!
//! pool.wait_phase(&countdown);
//! println!("{}", pool.snapshot());
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bench;
pub mod client;
pub mod core;
pub mod pool;
pub mod prelude;

pub use crate::bench::{bootstrap, stress, BootstrapConfig, StressConfig};
pub use crate::client::{BuildOptions, DaemonClient, ImageSummary};
pub use crate::core::{Countdown, Job, JobKind, Result, StressError};
pub use crate::pool::{PoolSnapshot, WorkerPool};
