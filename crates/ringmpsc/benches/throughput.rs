//! Throughput micro-benchmarks for `MpscRing`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ringmpsc::MpscRing;
use std::sync::Arc;
use std::thread;

fn bench_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_thread");
    group.bench_function("push_pop", |b| {
        let ring = MpscRing::<u64>::with_capacity(1024).unwrap();
        b.iter(|| {
            ring.push(1);
            ring.pop();
        });
    });
    group.finish();
}

fn bench_multi_producer(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_producer");
    for &producers in &[1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(producers),
            &producers,
            |b, &producers| {
                b.iter_custom(|iters| {
                    let ring = Arc::new(MpscRing::<u64>::with_capacity(65536).unwrap());
                    let per_producer = iters / producers as u64 + 1;

                    let handles: Vec<_> = (0..producers)
                        .map(|_| {
                            let ring = Arc::clone(&ring);
                            thread::spawn(move || {
                                for i in 0..per_producer {
                                    while ring.push(i) == ringmpsc::PushOutcome::Full {
                                        std::hint::spin_loop();
                                    }
                                }
                            })
                        })
                        .collect();

                    let start = std::time::Instant::now();
                    let total = per_producer * producers as u64;
                    let mut popped = 0u64;
                    while popped < total {
                        if ring.pop().is_some() {
                            popped += 1;
                        }
                    }
                    let elapsed = start.elapsed();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                    elapsed
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_single_thread, bench_multi_producer);
criterion_main!(benches);
