use chainkit::ds::{LinkedMap, MultiMap};

fn main() {
    let mut sessions = LinkedMap::new();
    sessions.insert("alice", 3);
    sessions.insert("bob", 5);
    sessions.insert("carol", 1);

    sessions.move_to_back(&"alice");
    let keys: Vec<_> = sessions.keys().copied().collect();
    println!("order: {:?}", keys);

    if let Some((name, count)) = sessions.pop_front() {
        println!("oldest: {} ({})", name, count);
    }

    let mut tags = MultiMap::new();
    tags.insert("rust", "systems");
    tags.insert("rust", "cli");
    if let Some(values) = tags.get(&"rust") {
        println!("rust tags: {}", values.join(", "));
    }
}

// Expected output:
// order: ["bob", "carol", "alice"]
// oldest: bob (5)
// rust tags: systems, cli
