use chainkit::builder::EvictingCacheBuilder;

fn main() {
    let mut cache = EvictingCacheBuilder::new(3)
        .prealloc(true)
        .build::<&str, u32>();

    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    cache.touch(&"a");
    cache.put("d", 4);

    println!("size: {} / {}", cache.size(), cache.capacity());
    println!("lru: {:?}", cache.peek_lru());

    match EvictingCacheBuilder::new(0).try_build::<&str, u32>() {
        Ok(_) => println!("zero capacity accepted"),
        Err(err) => println!("error: {}", err),
    }
}

// Expected output:
// size: 3 / 3
// lru: Some(("c", 3))
// error: capacity must be greater than zero
//
// Explanation: touching "a" leaves "b" as the LRU entry, so inserting "d"
// evicts "b" and "c" becomes the new LRU entry.
