use uarray::ds::ConcurrentSlotArray;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let array: ConcurrentSlotArray<String> = ConcurrentSlotArray::new(2);

    let first = array.add("item1".to_string()).unwrap();
    let second = array.add("item2".to_string()).unwrap();
    println!("added at {first} and {second}");

    if let Err(rejected) = array.add("item3".to_string()) {
        println!("rejected {}: {}", rejected.item(), rejected.error());
    }

    println!("current indexes: {}", array.used_index_string());

    println!("deleted: {}", array.delete(1));
    println!("deleted again: {}", array.delete(1));

    array.edit(0, "item0".to_string()).unwrap();
    println!("slot 0: {}", array.read(0).unwrap());
    println!("current indexes: {}", array.used_index_string());

    array.destroy().unwrap();
}

// Expected output:
// added at 0 and 1
// rejected item3: all 2 slots are occupied
// current indexes: 0,1
// deleted: 1
// deleted again: 0
// slot 0: item0
// current indexes: 0
//
// Run with RUST_LOG=uarray=trace to see slot-level events.
