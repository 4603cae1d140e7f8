use std::time::Duration;

use boundcache::builder::CacheBuilder;
use boundcache::EvictionKind;

fn main() {
    let cache = CacheBuilder::new(100)
        .eviction_strategy(EvictionKind::Lru)
        .build::<String, String>()
        .unwrap();

    cache.put("config".to_string(), "v1".to_string());
    cache.put_with_ttl("token".to_string(), "abc".to_string(), Duration::from_secs(30));

    println!("config = {:?}", cache.get("config"));
    if let Some(info) = cache.entry_info("token") {
        println!("token expires in ~{}s", info.expires_in.map_or(0, |d| d.as_secs() + 1));
    }

    match CacheBuilder::new(10).strategy_name("random") {
        Ok(_) => println!("unexpected"),
        Err(err) => println!("rejected: {err}"),
    }

    let mut core = CacheBuilder::new(2)
        .strategy_name("fifo")
        .and_then(|builder| builder.build_core::<u32, u32>())
        .unwrap();
    let now = std::time::Instant::now();
    core.put_at(1, 10, None, now);
    core.put_at(2, 20, None, now);
    core.put_at(3, 30, None, now);
    println!("core keys = {:?}", core.keys_at(now));
}

// Expected output:
// config = Some("v1")
// token expires in ~30s
// rejected: invalid argument: unknown eviction_strategy "random" (expected one of lru, mru, lfu, fifo)
// core keys = [2, 3]
