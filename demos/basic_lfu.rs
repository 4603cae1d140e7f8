use boundcache::{Cache, EvictionKind};

fn main() {
    let cache: Cache<&str, u32> = Cache::new(3, EvictionKind::Lfu).unwrap();

    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    for _ in 0..3 {
        cache.get("a");
    }
    cache.get("b");

    cache.put("d", 4);

    for key in ["a", "b", "c", "d"] {
        let frequency = cache.entry_info(key).and_then(|info| info.frequency);
        println!("{key}: present={} frequency={frequency:?}", cache.contains(key));
    }
}

// Expected output:
// a: present=true frequency=Some(4)
// b: present=true frequency=Some(2)
// c: present=false frequency=None
// d: present=true frequency=Some(1)
//
// Explanation: "c" was never read, so it had the lowest frequency when
// "d" needed room.
