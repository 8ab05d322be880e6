//! Capability-typed interface to the daemon's control-plane API
//!
//! The harness never talks to a daemon directly; everything goes through
//! [`DaemonClient`]. Implementations wrap a real control-plane transport,
//! while tests substitute an in-memory recording client.

use crate::core::Result;
use std::io::Read;

/// Options for a daemon-side image build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Suppress the daemon's verbose build output.
    pub suppress_output: bool,
    /// Path of the build script inside the context archive.
    pub dockerfile: String,
    /// Tags to apply to the built image.
    pub tags: Vec<String>,
}

/// One image as reported by the daemon's inventory listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageSummary {
    /// Repository tags pointing at this image.
    pub repo_tags: Vec<String>,
}

/// The four control-plane operations the harness needs from a daemon.
///
/// Implementations are shared as `Arc<dyn DaemonClient>` across all workers
/// and producers; every method must be safe to call concurrently. Calls are
/// stateless from the harness's point of view, so no locking is required
/// beyond whatever the underlying transport needs.
pub trait DaemonClient: Send + Sync {
    /// Pull `reference` from a registry, returning the daemon's progress
    /// stream. The caller drains the stream to completion.
    fn pull_image(&self, reference: &str) -> Result<Box<dyn Read + Send>>;

    /// Tag the image named `source` under the additional name `target`.
    fn tag_image(&self, source: &str, target: &str) -> Result<()>;

    /// Build an image from a tar-format `context` archive.
    fn build_image(&self, context: Vec<u8>, options: &BuildOptions) -> Result<()>;

    /// List all images the daemon currently knows about.
    fn list_images(&self) -> Result<Vec<ImageSummary>>;
}
