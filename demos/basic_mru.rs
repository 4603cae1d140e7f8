use boundcache::{Cache, EvictionKind};

fn main() {
    let cache: Cache<u32, String> = Cache::new(2, EvictionKind::Mru).unwrap();

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {value}");
    }

    cache.put(3, "gamma".to_string());

    println!("contains 1? {}", cache.contains(&1));
    println!("contains 2? {}", cache.contains(&2));
}

// Expected output:
// hit 1: alpha
// contains 1? false
// contains 2? true
//
// Explanation: MRU evicts the entry touched last. get(&1) made key 1 the
// most recently used, so inserting key 3 evicts it.
