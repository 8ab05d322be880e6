//! Phase configuration with documented defaults

use std::time::Duration;

/// Number of workers in each phase's pool.
pub const POOL_WORKERS: usize = 100;

/// Fixed sleep between stress sampling rounds.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for the bootstrap phase.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    /// Image to pull and use as the tag source.
    pub reference: String,
    /// Number of synthetic `image-<i>` tags to create.
    pub num_images: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            reference: "busybox".to_string(),
            num_images: 1000,
        }
    }
}

impl BootstrapConfig {
    /// Configuration with the documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference image.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_reference<S: Into<String>>(mut self, reference: S) -> Self {
        self.reference = reference.into();
        self
    }

    /// Set the number of tags to create.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_num_images(mut self, num_images: usize) -> Self {
        self.num_images = num_images;
        self
    }
}

/// Configuration for the stress phase.
#[derive(Clone, Debug)]
pub struct StressConfig {
    /// Image used as the tag source.
    pub reference: String,
    /// Number of sampling rounds.
    pub num_benchmarks: usize,
    /// Number of `stress-tag-<i>` tag jobs to submit.
    pub num_tags: usize,
    /// Number of `stress-build-<i>` build jobs to submit.
    pub num_builds: usize,
    /// Number of image-remove jobs. Reserved extension point; the queue is
    /// provisioned for these but no producer submits them yet.
    pub num_image_removes: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            reference: "busybox".to_string(),
            num_benchmarks: 10,
            num_tags: 1000,
            num_builds: 100,
            num_image_removes: 0,
        }
    }
}

impl StressConfig {
    /// Configuration with the documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference image.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_reference<S: Into<String>>(mut self, reference: S) -> Self {
        self.reference = reference.into();
        self
    }

    /// Set the number of sampling rounds.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_num_benchmarks(mut self, num_benchmarks: usize) -> Self {
        self.num_benchmarks = num_benchmarks;
        self
    }

    /// Set the number of tag jobs.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_num_tags(mut self, num_tags: usize) -> Self {
        self.num_tags = num_tags;
        self
    }

    /// Set the number of build jobs.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_num_builds(mut self, num_builds: usize) -> Self {
        self.num_builds = num_builds;
        self
    }

    /// Total queue capacity the phase must provision.
    pub fn total_jobs(&self) -> usize {
        self.num_tags + self.num_builds + self.num_image_removes
    }
}
