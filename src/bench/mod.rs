//! Benchmark orchestration: phases, timing, sampling, build contexts

pub mod bootstrap;
pub mod config;
pub mod context;
pub mod sampler;
pub mod stress;
pub mod timer;

pub use bootstrap::bootstrap;
pub use config::{BootstrapConfig, StressConfig, POOL_WORKERS, SAMPLE_INTERVAL};
pub use sampler::distinct_tag_count;
pub use stress::stress;
pub use timer::measure;
