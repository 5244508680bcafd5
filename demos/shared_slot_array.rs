use std::sync::Arc;
use std::thread;

use uarray::builder::SlotArrayBuilder;
use uarray::ds::ConcurrentSlotArray;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let array: Arc<ConcurrentSlotArray<Arc<str>>> = Arc::new(
        SlotArrayBuilder::new(4)
            .max_capacity_limit(64)
            .label("workers")
            .build(),
    );

    let handles: Vec<_> = (0..6)
        .map(|worker| {
            let array = Arc::clone(&array);
            thread::spawn(move || {
                let name: Arc<str> = Arc::from(format!("worker-{worker}"));
                array.add(name).ok()
            })
        })
        .collect();

    let mut claimed: Vec<usize> = handles
        .into_iter()
        .filter_map(|h| h.join().ok().flatten())
        .collect();
    claimed.sort_unstable();

    println!("claimed slots: {:?}", claimed);
    println!("used: {}/{}", array.used_count(), array.max_capacity());

    // `read` clones the Arc: the handle survives a concurrent delete.
    let held = array.read(0).unwrap();
    array.delete(0);
    println!("still holding {held} after delete");

    ConcurrentSlotArray::destroy_shared(array).unwrap();
}

// Expected output (which workers win varies):
// claimed slots: [0, 1, 2, 3]
// used: 4/4
// still holding worker-N after delete
