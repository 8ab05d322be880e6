//! Worker pool for concurrent job execution

mod worker;
mod worker_pool;

pub use worker_pool::{PoolSnapshot, WorkerPool};
