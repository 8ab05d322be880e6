//! In-memory daemon client double shared by the integration tests.
#![allow(dead_code)]

use daemon_stress::client::{BuildOptions, DaemonClient, ImageSummary};
use daemon_stress::core::{Result, StressError};
use parking_lot::Mutex;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Records every control-plane call so tests can assert on what the
/// harness actually asked the daemon to do.
#[derive(Default)]
pub struct RecordingClient {
    pulls: Mutex<Vec<String>>,
    tags: Mutex<Vec<(String, String)>>,
    builds: Mutex<Vec<BuildOptions>>,
    list_calls: AtomicUsize,
    tag_delay: Option<Duration>,
    fail_tags: bool,
    fail_builds: bool,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every tag call take at least `delay`.
    pub fn with_tag_delay(mut self, delay: Duration) -> Self {
        self.tag_delay = Some(delay);
        self
    }

    /// Make every tag call fail.
    pub fn failing_tags(mut self) -> Self {
        self.fail_tags = true;
        self
    }

    /// Make every build call fail.
    pub fn failing_builds(mut self) -> Self {
        self.fail_builds = true;
        self
    }

    pub fn pull_count(&self) -> usize {
        self.pulls.lock().len()
    }

    /// Recorded `(source, target)` tag pairs.
    pub fn tags(&self) -> Vec<(String, String)> {
        self.tags.lock().clone()
    }

    /// Recorded tag targets, sorted.
    pub fn tag_targets(&self) -> Vec<String> {
        let mut targets: Vec<String> = self.tags.lock().iter().map(|(_, t)| t.clone()).collect();
        targets.sort();
        targets
    }

    /// Tags requested by recorded build calls, sorted.
    pub fn build_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .builds
            .lock()
            .iter()
            .flat_map(|opts| opts.tags.clone())
            .collect();
        tags.sort();
        tags
    }

    /// Recorded build options.
    pub fn builds(&self) -> Vec<BuildOptions> {
        self.builds.lock().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
    }
}

impl DaemonClient for RecordingClient {
    fn pull_image(&self, reference: &str) -> Result<Box<dyn Read + Send>> {
        self.pulls.lock().push(reference.to_string());
        Ok(Box::new(std::io::Cursor::new(
            b"pull progress".to_vec(),
        )))
    }

    fn tag_image(&self, source: &str, target: &str) -> Result<()> {
        if let Some(delay) = self.tag_delay {
            std::thread::sleep(delay);
        }
        if self.fail_tags {
            return Err(StressError::client("tag", "injected tag failure"));
        }
        self.tags
            .lock()
            .push((source.to_string(), target.to_string()));
        Ok(())
    }

    fn build_image(&self, _context: Vec<u8>, options: &BuildOptions) -> Result<()> {
        if self.fail_builds {
            return Err(StressError::client("build", "injected build failure"));
        }
        self.builds.lock().push(options.clone());
        Ok(())
    }

    fn list_images(&self) -> Result<Vec<ImageSummary>> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);

        let mut images: Vec<ImageSummary> = self
            .pulls
            .lock()
            .iter()
            .map(|reference| ImageSummary {
                repo_tags: vec![reference.clone()],
            })
            .collect();
        images.extend(self.tags.lock().iter().map(|(_, target)| ImageSummary {
            repo_tags: vec![target.clone()],
        }));
        Ok(images)
    }
}

/// Initialize test logging once per binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
