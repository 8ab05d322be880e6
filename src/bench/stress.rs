//! Stress phase: concurrent mutating load with periodic state sampling

use crate::bench::config::{StressConfig, POOL_WORKERS, SAMPLE_INTERVAL};
use crate::bench::context;
use crate::bench::sampler::distinct_tag_count;
use crate::bench::timer::measure;
use crate::client::DaemonClient;
use crate::core::{Job, JobKind, Result, StressError};
use crate::pool::WorkerPool;
use std::sync::Arc;
use std::thread;

/// Flood the pool with tag and build jobs while sampling daemon state.
///
/// Tag and build submissions run on two independent producer threads; the
/// main flow does not wait for them (or for the jobs themselves) before
/// starting its `num_benchmarks` sampling rounds, so sampling measures the
/// daemon under live load. Each round sleeps [`SAMPLE_INTERVAL`], then logs
/// a pool snapshot and the daemon's distinct tag count inside its own timed
/// region.
pub fn stress(client: Arc<dyn DaemonClient>, config: &StressConfig) -> Result<()> {
    log::info!("start stress testing");

    // Capacity covers every job the phase intends to submit, including the
    // reserved (currently unused) image-remove budget, so producers never
    // block on a full queue.
    let pool = Arc::new(WorkerPool::new(POOL_WORKERS, config.total_jobs().max(1))?);

    let tag_producer = spawn_tag_producer(Arc::clone(&pool), Arc::clone(&client), config)?;
    let build_producer = spawn_build_producer(Arc::clone(&pool), Arc::clone(&client), config)?;

    for round in 0..config.num_benchmarks {
        thread::sleep(SAMPLE_INTERVAL);

        if let Some(err) = pool.take_failure() {
            return Err(err);
        }

        measure("sampling round", || {
            log::info!("--- jobs summary ---");
            log::info!("{}", pool.snapshot());
            log::info!("--- end ---");

            let tags = distinct_tag_count(client.as_ref())
                .map_err(|e| StressError::sampling(round, e.to_string()))?;
            log::info!("found {} image tags", tags);
            Ok(())
        })?;
    }

    join_producer(tag_producer, "tag producer")?;
    join_producer(build_producer, "build producer")?;

    if let Some(err) = pool.take_failure() {
        return Err(err);
    }

    pool.shutdown()?;
    log::info!("finished stress testing");
    Ok(())
}

/// Submit `num_tags` tag jobs from a dedicated producer thread.
fn spawn_tag_producer(
    pool: Arc<WorkerPool>,
    client: Arc<dyn DaemonClient>,
    config: &StressConfig,
) -> Result<thread::JoinHandle<()>> {
    let num_tags = config.num_tags;
    let reference = config.reference.clone();

    thread::Builder::new()
        .name("stress-tag-producer".to_string())
        .spawn(move || {
            for i in 0..num_tags {
                let client = Arc::clone(&client);
                let source = reference.clone();
                let target = format!("stress-tag-{}", i);
                let job = Job::new(JobKind::ImageTag, move || {
                    client
                        .tag_image(&source, &target)
                        .map_err(|e| StressError::tag(&source, &target, e.to_string()))
                });

                if let Err(err) = pool.submit(job) {
                    log::warn!("tag producer stopped after {} submissions: {}", i, err);
                    return;
                }
            }
        })
        .map_err(|e| StressError::other(format!("failed to spawn tag producer: {}", e)))
}

/// Submit `num_builds` build jobs from a dedicated producer thread.
fn spawn_build_producer(
    pool: Arc<WorkerPool>,
    client: Arc<dyn DaemonClient>,
    config: &StressConfig,
) -> Result<thread::JoinHandle<()>> {
    let num_builds = config.num_builds;

    thread::Builder::new()
        .name("stress-build-producer".to_string())
        .spawn(move || {
            for i in 0..num_builds {
                let client = Arc::clone(&client);
                let job = Job::new(JobKind::ImageBuild, move || {
                    context::build_image(client.as_ref(), i)
                });

                if let Err(err) = pool.submit(job) {
                    log::warn!("build producer stopped after {} submissions: {}", i, err);
                    return;
                }
            }
        })
        .map_err(|e| StressError::other(format!("failed to spawn build producer: {}", e)))
}

fn join_producer(handle: thread::JoinHandle<()>, name: &str) -> Result<()> {
    handle
        .join()
        .map_err(|_| StressError::other(format!("{} thread panicked", name)))
}
