use boundcache::{Cache, EvictionKind};

fn main() {
    let cache: Cache<&str, u32> = Cache::new(3, EvictionKind::Fifo).unwrap();

    cache.put("first", 1);
    cache.put("second", 2);
    cache.put("third", 3);

    // Reads do not protect an entry under FIFO.
    for _ in 0..10 {
        cache.get("first");
    }

    cache.put("fourth", 4);

    println!("keys: {:?}", cache.keys());
    println!("{}", cache.stats());
}

// Expected output:
// keys: ["second", "third", "fourth"]
// hits=10 misses=0 evictions=1 expired=0 total_requests=10 hit_rate=1.000 current_size=3
