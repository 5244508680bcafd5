//! Micro-operation benchmarks for slot arrays.
//!
//! Run with: `cargo bench --bench slot_array_ops`
//!
//! Measures per-operation latency for add/delete churn, reads, and listing,
//! on both the unsynchronized core and the locked array, plus contended
//! throughput across threads.

use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use uarray::ds::{ConcurrentSlotArray, SlotArray};

const CAPACITY: usize = 4_096;
const OPS: u64 = 100_000;

// ============================================================================
// Add/Delete churn (ns/op)
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_delete_churn_ns");
    group.throughput(Throughput::Elements(OPS));

    // Half full, deleting a spread of low indices so first-fit has to reuse
    // holes below the high-water mark.
    group.bench_function("slot_array", |b| {
        b.iter_custom(|iters| {
            let mut array = SlotArray::new(CAPACITY);
            for i in 0..CAPACITY / 2 {
                array.add(i as u64).unwrap();
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let victim = (i as usize * 31) % (CAPACITY / 2);
                    array.delete(victim);
                    black_box(array.add(i).ok());
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("concurrent_slot_array", |b| {
        b.iter_custom(|iters| {
            let array = ConcurrentSlotArray::new(CAPACITY);
            for i in 0..CAPACITY / 2 {
                array.add(i as u64).unwrap();
            }
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let victim = (i as usize * 31) % (CAPACITY / 2);
                    array.delete(victim);
                    black_box(array.add(i).ok());
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Read latency (ns/op)
// ============================================================================

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_ns");
    group.throughput(Throughput::Elements(OPS));

    let array = ConcurrentSlotArray::new(CAPACITY);
    for i in 0..CAPACITY {
        array.add(Arc::new(i as u64)).unwrap();
    }

    group.bench_function("read_clone_arc", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(array.read(i as usize % CAPACITY).ok());
            }
        })
    });

    group.bench_function("read_with", |b| {
        b.iter(|| {
            for i in 0..OPS {
                black_box(array.read_with(i as usize % CAPACITY, |v| **v).ok());
            }
        })
    });

    group.finish();
}

// ============================================================================
// Listing
// ============================================================================

fn bench_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing");

    for fill in [0.1, 0.5, 1.0] {
        let array = ConcurrentSlotArray::new(CAPACITY);
        let used = (CAPACITY as f64 * fill) as usize;
        for i in 0..used {
            array.add(i).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("used_indices", fill), &array, |b, a| {
            b.iter(|| black_box(a.used_indices()))
        });
        group.bench_with_input(BenchmarkId::new("used_index_string", fill), &array, |b, a| {
            b.iter(|| black_box(a.used_index_string()))
        });
    }

    group.finish();
}

// ============================================================================
// Contended throughput
// ============================================================================

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    group.sample_size(20);

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements(OPS * threads as u64));
        group.bench_with_input(BenchmarkId::new("mixed", threads), &threads, |b, &threads| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    total += run_mixed(threads);
                }
                total
            })
        });
    }

    group.finish();
}

/// Each thread: add, read, delete per op; every tenth op also reads the count.
fn run_mixed(threads: usize) -> Duration {
    let array = Arc::new(ConcurrentSlotArray::new(CAPACITY));
    let barrier = Arc::new(Barrier::new(threads + 1));

    let handles: Vec<_> = (0..threads)
        .map(|tid| {
            let array = Arc::clone(&array);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..OPS {
                    if let Ok(index) = array.add(((tid as u64) << 32) | i) {
                        black_box(array.read(index).ok());
                        if i % 10 == 0 {
                            black_box(array.used_count());
                        }
                        array.delete(index);
                    }
                }
            })
        })
        .collect();

    barrier.wait();
    let start = Instant::now();
    for handle in handles {
        let _ = handle.join();
    }
    start.elapsed()
}

criterion_group!(
    benches,
    bench_churn,
    bench_read,
    bench_listing,
    bench_contended
);
criterion_main!(benches);
