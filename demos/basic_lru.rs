use boundcache::{Cache, EvictionKind};

fn main() {
    let cache: Cache<u32, String> = Cache::new(2, EvictionKind::Lru).unwrap();

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {value}");
    }

    cache.put(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));
}

// Expected output:
// hit 1: alpha
// contains 2? false
//
// Explanation: capacity=2; after get(&1), key 1 is most recently used and
// key 2 least recently used. Inserting key 3 evicts key 2.
