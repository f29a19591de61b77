#![no_main]

use chainkit::policy::evicting::EvictingCache;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on EvictingCache
//
// The first byte picks the capacity; each following pair is (op, key).
fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(first % 16) + 1;
    let mut cache: EvictingCache<u8, u32> = EvictingCache::new(capacity);

    let mut idx = 0;
    while idx + 1 < rest.len() {
        let op = rest[idx] % 9;
        let key = rest[idx + 1];

        match op {
            0 => {
                // put
                let existed = cache.has(&key);
                let old_len = cache.len();
                cache.put(key, u32::from(key));

                assert!(cache.peek_lru().is_some());
                assert_eq!(cache.recency_rank(&key), Some(0));
                if existed {
                    assert_eq!(cache.len(), old_len);
                } else {
                    assert_eq!(cache.len(), (old_len + 1).min(capacity));
                }
            },
            1 => {
                // get
                let existed = cache.has(&key);
                assert_eq!(cache.get(&key).is_some(), existed);
                if existed {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            2 => {
                // get_or_put
                let value = *cache.get_or_put(key, || u32::from(key));
                assert_eq!(value, u32::from(key));
                assert_eq!(cache.recency_rank(&key), Some(0));
            },
            3 => {
                // try_get_or_put with a failing producer
                let before: Vec<u8> = cache.keys().copied().collect();
                let existed = cache.has(&key);
                let result = cache.try_get_or_put(key, || Err::<u32, ()>(()));
                assert_eq!(result.is_ok(), existed);
                if !existed {
                    assert_eq!(cache.keys().copied().collect::<Vec<_>>(), before);
                }
            },
            4 => {
                // evict
                let old_len = cache.len();
                assert_eq!(cache.evict(), old_len > 0);
                assert_eq!(cache.len(), old_len.saturating_sub(1));
            },
            5 => {
                // remove
                let existed = cache.has(&key);
                assert_eq!(cache.remove(&key).is_some(), existed);
                assert!(!cache.has(&key));
            },
            6 => {
                // pop_lru
                let expected = cache.peek_lru().map(|(k, _)| *k);
                assert_eq!(cache.pop_lru().map(|(k, _)| k), expected);
            },
            7 => {
                // touch
                let existed = cache.has(&key);
                assert_eq!(cache.touch(&key), existed);
            },
            8 => {
                // clear
                if key % 8 == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        assert_eq!(cache.iter().count(), cache.len());
        assert!(cache.check_invariants().is_ok());

        idx += 2;
    }
});
