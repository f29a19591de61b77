#![no_main]

use chainkit::ds::LinkedMap;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LinkedMap against a Vec of pairs
//
// The Vec holds entries front to back, so order and membership are both
// checked after every step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut map: LinkedMap<u8, u32> = LinkedMap::new();
    let mut model: Vec<(u8, u32)> = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1] % 32;
        let value = (u32::from(data[idx]) << 8) | u32::from(key);

        match op {
            0 => {
                // push_back (insert)
                let position = model.iter().position(|(k, _)| *k == key);
                let previous = position.map(|p| model.remove(p).1);
                assert_eq!(map.insert(key, value), previous);
                model.push((key, value));
            },
            1 => {
                // push_front
                let position = model.iter().position(|(k, _)| *k == key);
                let previous = position.map(|p| model.remove(p).1);
                assert_eq!(map.push_front(key, value), previous);
                model.insert(0, (key, value));
            },
            2 => {
                let expected = (!model.is_empty()).then(|| model.remove(0));
                assert_eq!(map.pop_front(), expected);
            },
            3 => assert_eq!(map.pop_back(), model.pop()),
            4 => {
                // remove
                let position = model.iter().position(|(k, _)| *k == key);
                let expected = position.map(|p| model.remove(p).1);
                assert_eq!(map.remove(&key), expected);
            },
            5 => {
                // move_to_front
                let position = model.iter().position(|(k, _)| *k == key);
                assert_eq!(map.move_to_front(&key), position.is_some());
                if let Some(p) = position {
                    let entry = model.remove(p);
                    model.insert(0, entry);
                }
            },
            6 => {
                // move_to_back
                let position = model.iter().position(|(k, _)| *k == key);
                assert_eq!(map.move_to_back(&key), position.is_some());
                if let Some(p) = position {
                    let entry = model.remove(p);
                    model.push(entry);
                }
            },
            7 => {
                // get
                let expected = model.iter().find(|(k, _)| *k == key).map(|(_, v)| v);
                assert_eq!(map.get(&key), expected);
            },
            _ => unreachable!(),
        }

        assert_eq!(map.len(), model.len());
        assert!(
            map.iter()
                .map(|(k, v)| (*k, *v))
                .eq(model.iter().copied())
        );

        idx += 2;
    }
});
