use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use daemon_stress::core::{Countdown, Job, JobKind};
use daemon_stress::pool::WorkerPool;
use std::sync::Arc;
use std::time::Duration;

fn benchmark_pool_creation(c: &mut Criterion) {
    c.bench_function("pool_creation", |b| {
        b.iter(|| {
            let pool = WorkerPool::new(4, 64).expect("Failed to create pool");
            pool.shutdown().expect("Failed to shutdown pool");
        });
    });
}

fn benchmark_job_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("job_dispatch");

    // Lightweight jobs
    group.bench_function("lightweight_jobs_100", |b| {
        b.iter_batched(
            || WorkerPool::new(4, 100).expect("Failed to create pool"),
            |pool| {
                let countdown = Countdown::new();
                for _ in 0..100 {
                    pool.submit(Job::tracked(JobKind::ImageTag, &countdown, || {
                        black_box(1 + 1);
                        Ok(())
                    }))
                    .expect("Failed to submit job");
                }
                pool.wait_phase(&countdown);
                pool.shutdown().expect("Failed to shutdown pool");
            },
            BatchSize::SmallInput,
        );
    });

    // Medium workload
    group.bench_function("medium_jobs_100", |b| {
        b.iter_batched(
            || WorkerPool::new(4, 100).expect("Failed to create pool"),
            |pool| {
                let countdown = Countdown::new();
                for _ in 0..100 {
                    pool.submit(Job::tracked(JobKind::ImageBuild, &countdown, || {
                        let mut sum = 0u64;
                        for i in 0..1000 {
                            sum = sum.wrapping_add(i);
                        }
                        black_box(sum);
                        Ok(())
                    }))
                    .expect("Failed to submit job");
                }
                pool.wait_phase(&countdown);
                pool.shutdown().expect("Failed to shutdown pool");
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn benchmark_concurrent_producers(c: &mut Criterion) {
    c.bench_function("concurrent_producers_4_threads", |b| {
        b.iter_batched(
            || Arc::new(WorkerPool::new(4, 100).expect("Failed to create pool")),
            |pool| {
                let countdown = Countdown::new();
                let handles: Vec<_> = (0..4)
                    .map(|_| {
                        let pool = Arc::clone(&pool);
                        let countdown = countdown.clone();
                        std::thread::spawn(move || {
                            for _ in 0..25 {
                                pool.submit(Job::tracked(JobKind::ImageTag, &countdown, || {
                                    Ok(())
                                }))
                                .expect("Failed to submit job");
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.join().expect("Thread panicked");
                }

                pool.wait_phase(&countdown);
                pool.shutdown().expect("Failed to shutdown pool");
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_bounded_queue(c: &mut Criterion) {
    c.bench_function("bounded_queue_pressure", |b| {
        b.iter_batched(
            || WorkerPool::new(4, 100).expect("Failed to create pool"),
            |pool| {
                // Submissions past capacity block until a worker drains the
                // queue, so this measures dispatch under backpressure.
                let countdown = Countdown::new();
                for _ in 0..150 {
                    pool.submit(Job::tracked(JobKind::ImageTag, &countdown, || {
                        std::thread::sleep(Duration::from_micros(100));
                        Ok(())
                    }))
                    .expect("Failed to submit job");
                }
                pool.wait_phase(&countdown);
                pool.shutdown().expect("Failed to shutdown pool");
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    benchmark_pool_creation,
    benchmark_job_dispatch,
    benchmark_concurrent_producers,
    benchmark_bounded_queue
);
criterion_main!(benches);
