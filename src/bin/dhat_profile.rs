//! DHAT heap profiler for uarray.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>
//!
//! Besides writing the profile, each phase checks that the heap returns to
//! its starting block count once the array is destroyed.

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::process::ExitCode;
use std::sync::Arc;
use std::thread;

use uarray::ds::ConcurrentSlotArray;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

fn live_blocks() -> u64 {
    dhat::HeapStats::get().curr_blocks as u64
}

/// Random add/edit/delete churn with heap-owning items, then destroy.
fn profile_churn() -> u64 {
    println!("=== Profiling add/edit/delete churn ===");
    let capacity = 4096;
    let operations = 200_000;

    let array = ConcurrentSlotArray::new(capacity);
    let mut rng = XorShift64::new(42);

    for i in 0..operations {
        let index = (rng.next_u64() as usize) % capacity;
        match rng.next_u64() % 3 {
            0 => {
                let _ = array.add(format!("item-{i}"));
            }
            1 => {
                let _ = array.edit(index, format!("edit-{i}"));
            }
            _ => {
                array.delete(index);
            }
        }
    }

    let used = array.used_count();
    println!("  Used before destroy: {used}");
    if let Err(err) = array.destroy() {
        println!("  destroy failed: {err}");
    }
    used as u64
}

/// Fill and clear repeatedly, then destroy a full array.
fn profile_clear_cycles() -> u64 {
    println!("=== Profiling fill/clear cycles ===");
    let capacity = 1024;

    let array = ConcurrentSlotArray::new(capacity);
    for cycle in 0..50 {
        for i in 0..capacity {
            let _ = array.add(vec![cycle as u8; i % 64 + 1]);
        }
        array.clear_all();
    }
    for i in 0..capacity {
        let _ = array.add(vec![0u8; i % 64 + 1]);
    }

    println!("  Used before destroy: {}", array.used_count());
    if let Err(err) = array.destroy() {
        println!("  destroy failed: {err}");
    }
    capacity as u64
}

/// Shared across threads, torn down through the last `Arc`.
fn profile_shared() -> u64 {
    println!("=== Profiling shared teardown ===");
    let capacity = 512;
    let array = Arc::new(ConcurrentSlotArray::new(capacity));

    let handles: Vec<_> = (0..4)
        .map(|tid| {
            let array = Arc::clone(&array);
            thread::spawn(move || {
                for i in 0..capacity {
                    if let Ok(index) = array.add(Box::new((tid, i))) {
                        if i % 2 == 0 {
                            array.delete(index);
                        }
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }

    let used = array.used_count();
    println!("  Used before destroy: {used}");
    if let Err(err) = ConcurrentSlotArray::destroy_shared(array) {
        println!("  destroy failed: {err}");
    }
    used as u64
}

fn main() -> ExitCode {
    let _profiler = dhat::Profiler::new_heap();

    println!("uarray DHAT Heap Profiling");
    println!("==========================\n");

    let phases: [(&str, fn() -> u64); 3] = [
        ("churn", profile_churn),
        ("clear_cycles", profile_clear_cycles),
        ("shared", profile_shared),
    ];

    let mut leaked = false;
    for (name, phase) in phases {
        let before = live_blocks();
        let released = phase();
        let after = live_blocks();
        println!("  {name}: {released} items released at destroy, live blocks {before} -> {after}\n");
        if after > before {
            leaked = true;
            println!("  LEAK in {name}: {} blocks still live", after - before);
        }
    }

    println!("==========================");
    println!("Profile written to dhat-heap.json");

    if leaked {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
