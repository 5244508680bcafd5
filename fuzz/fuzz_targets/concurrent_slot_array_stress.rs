#![no_main]

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use libfuzzer_sys::fuzz_target;
use uarray::ds::ConcurrentSlotArray;

// Stress ConcurrentSlotArray with fuzzer-chosen per-thread op streams
//
// Each thread only deletes indices it added itself, so every thread can
// check that its slots were never handed to someone else.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let threads = usize::from(data[1] % 4) + 2;
    let ops = Arc::new(data[2..].to_vec());
    let array: Arc<ConcurrentSlotArray<(usize, u8)>> = Arc::new(ConcurrentSlotArray::new(capacity));
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|tid| {
            let array = Arc::clone(&array);
            let barrier = Arc::clone(&barrier);
            let ops = Arc::clone(&ops);
            thread::spawn(move || {
                let mut owned: Vec<usize> = Vec::new();
                barrier.wait();
                for &op in ops.iter().skip(tid).step_by(threads) {
                    if op % 2 == 0 {
                        if let Ok(index) = array.add((tid, op)) {
                            owned.push(index);
                        }
                    } else if let Some(index) = owned.pop() {
                        assert_eq!(array.read(index).map(|(owner, _)| owner), Ok(tid));
                        assert_eq!(array.delete(index), 1);
                    }
                }
                owned
            })
        })
        .collect();

    let mut remaining = HashSet::new();
    for handle in handles {
        for index in handle.join().unwrap() {
            assert!(remaining.insert(index), "index {index} owned twice");
        }
    }

    assert_eq!(array.used_count(), remaining.len());
    let listed: HashSet<usize> = array.used_indices().into_iter().collect();
    assert_eq!(listed, remaining);
    array.debug_validate_invariants();
});
