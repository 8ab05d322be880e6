//! Bootstrap phase: seed daemon state before stressing it

use crate::bench::config::{BootstrapConfig, POOL_WORKERS};
use crate::bench::timer::measure;
use crate::client::DaemonClient;
use crate::core::{Countdown, Job, JobKind, Result, StressError};
use crate::pool::WorkerPool;
use std::io;
use std::sync::Arc;

/// Pull the reference image and tag it `num_images` times through the pool.
///
/// Each tag job tags the same source reference under a distinct synthetic
/// `image-<i>` name. The call returns once every tag job has completed; the
/// timed region covers submission and completion but not the pull.
pub fn bootstrap(client: Arc<dyn DaemonClient>, config: &BootstrapConfig) -> Result<()> {
    log::info!("start bootstrapping");

    let mut progress = client
        .pull_image(&config.reference)
        .map_err(|e| StressError::pull(&config.reference, e.to_string()))?;
    let drained = io::copy(&mut progress, &mut io::sink())?;
    log::info!(
        "pulled {} ({} bytes of progress output)",
        config.reference,
        drained
    );

    let pool = WorkerPool::new(POOL_WORKERS, config.num_images.max(1))?;
    let countdown = Countdown::new();

    let tagged = measure("bootstrap tagging", || {
        log::info!("tagging {} images", config.num_images);
        for i in 0..config.num_images {
            let client = Arc::clone(&client);
            let source = config.reference.clone();
            let target = format!("image-{}", i);
            pool.submit(Job::tracked(JobKind::ImageTag, &countdown, move || {
                client
                    .tag_image(&source, &target)
                    .map_err(|e| StressError::tag(&source, &target, e.to_string()))
            }))?;
        }

        pool.wait_phase(&countdown);
        Ok(())
    });

    // A job failure can abort the pool while submissions are still in
    // flight; the recorded failure names the real cause, so it takes
    // precedence over the submission error it provoked.
    if let Some(err) = pool.take_failure() {
        return Err(err);
    }
    tagged?;

    pool.shutdown()?;
    log::info!("finished bootstrapping");
    Ok(())
}
