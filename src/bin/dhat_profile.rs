//! DHAT heap profiler for chainkit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use chainkit::builder::EvictingCacheBuilder;
use chainkit::ds::{DoublyLinkedList, LinkedMap};
use chainkit::policy::evicting::EvictingCache;

const CAPACITY: usize = 4096;
const OPERATIONS: usize = 100_000;
const UNIVERSE: u64 = 16_384;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload(cache: &mut EvictingCache<u64, u64>, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (UNIVERSE as f64 * 0.1) as u64;

    for _ in 0..OPERATIONS {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (UNIVERSE - hot_size))
        };
        cache.get_or_put(key, || key);
    }
}

/// Scan workload: sequential keys, wider than the cache.
fn scan_workload(cache: &mut EvictingCache<u64, u64>) {
    for i in 0..OPERATIONS / 2 {
        let key = (i as u64) % UNIVERSE;
        if cache.get(&key).is_none() {
            cache.put(key, key);
        }
    }
}

/// Eviction churn: every put is a new key.
fn eviction_churn(cache: &mut EvictingCache<u64, u64>) {
    for i in 0..OPERATIONS / 4 {
        cache.put(UNIVERSE + i as u64, i as u64);
    }
}

fn profile_evicting(prealloc: bool) {
    println!("=== Profiling EvictingCache (prealloc: {prealloc}) ===");
    let mut cache = EvictingCacheBuilder::new(CAPACITY)
        .prealloc(prealloc)
        .build::<u64, u64>();

    for i in 0..CAPACITY as u64 {
        cache.put(i, i);
    }

    hotset_workload(&mut cache, 42);
    scan_workload(&mut cache);
    eviction_churn(&mut cache);

    println!("  Final size: {}", cache.len());
}

fn profile_linked() {
    println!("=== Profiling linked containers ===");
    let mut list = DoublyLinkedList::new();
    for i in 0..OPERATIONS as u64 {
        list.push_front(i);
        if list.len() > CAPACITY {
            list.pop_back();
        }
    }
    println!("  List size: {}, approx bytes: {}", list.len(), list.approx_bytes());

    let mut map = LinkedMap::new();
    for i in 0..OPERATIONS as u64 {
        map.insert(i % UNIVERSE, i);
        if map.len() > CAPACITY {
            map.pop_front();
        }
    }
    println!("  Map size: {}", map.len());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("chainkit DHAT Heap Profiling");
    println!("============================\n");

    profile_evicting(false);
    profile_evicting(true);
    profile_linked();

    println!("\n============================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
