use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use polycache_core::{new, Cache, Strategy};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const EXPIRATION: Duration = Duration::from_secs(300);

fn build(strategy: Strategy, capacity: usize) -> Box<dyn Cache<i32>> {
    new(strategy, capacity, EXPIRATION).expect("valid benchmark configuration")
}

fn bench_insert_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_sequential");

    for size in [10, 100, 1000].iter() {
        for strategy in Strategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), size),
                size,
                |b, &size| {
                    b.iter(|| {
                        let cache = build(strategy, size);
                        for i in 0..size {
                            cache.set(&format!("key{}", i), black_box(i as i32));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_get_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_sequential");

    for size in [10, 100, 1000].iter() {
        for strategy in Strategy::ALL {
            // Pre-populate cache
            let cache = build(strategy, *size);
            for i in 0..*size {
                cache.set(&format!("key{}", i), i as i32);
            }

            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), size),
                size,
                |b, &size| {
                    b.iter(|| {
                        for i in 0..size {
                            black_box(cache.get(&format!("key{}", i)));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("eviction");

    for strategy in Strategy::ALL {
        group.bench_function(format!("{}_eviction", strategy), |b| {
            b.iter(|| {
                let cache = build(strategy, 50);
                // Insert 100 items in a cache with capacity 50
                for i in 0..100 {
                    cache.set(&format!("key{}", i), black_box(i));
                }
            });
        });
    }

    group.finish();
}

fn bench_concurrent_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_mixed");

    for num_threads in [2, 4, 8].iter() {
        for strategy in Strategy::ALL {
            let cache: Arc<dyn Cache<i32>> = Arc::from(build(strategy, 100));

            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), num_threads),
                num_threads,
                |b, &num_threads| {
                    b.iter(|| {
                        let handles: Vec<_> = (0..num_threads)
                            .map(|thread_id| {
                                let cache = Arc::clone(&cache);
                                thread::spawn(move || {
                                    for i in 0..50 {
                                        let key = format!("key{}-{}", thread_id, i);
                                        if i % 2 == 0 {
                                            cache.set(&key, black_box(i));
                                        } else {
                                            black_box(cache.get(&key));
                                        }
                                    }
                                })
                            })
                            .collect();

                        for handle in handles {
                            handle.join().unwrap();
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_sequential,
    bench_get_sequential,
    bench_eviction,
    bench_concurrent_mixed
);
criterion_main!(benches);
