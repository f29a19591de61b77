use chainkit::policy::evicting::EvictingCache;

fn main() {
    let mut cache: EvictingCache<u32, String> = EvictingCache::new(2);

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    cache.put(3, "gamma".to_string());
    println!("has 2? {}", cache.has(&2));

    let value = cache.get_or_put(4, || "delta".to_string());
    println!("produced 4: {}", value);
    println!("has 1? {}", cache.has(&1));

    let order: Vec<_> = cache.keys().copied().collect();
    println!("mru -> lru: {:?}", order);
}

// Expected output:
// hit 1: alpha
// has 2? false
// produced 4: delta
// has 1? false
// mru -> lru: [4, 3]
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU, so
// putting key 3 evicts key 2. Key 1 is then LRU and is evicted when the
// producer creates key 4.
