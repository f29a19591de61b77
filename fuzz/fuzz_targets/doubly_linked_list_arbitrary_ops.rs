#![no_main]

use std::collections::VecDeque;

use chainkit::ds::DoublyLinkedList;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on DoublyLinkedList against a VecDeque
//
// Covers push/pop at both ends, positional insert/set/get, value removal,
// move_to_front via node handles, reverse, and clear.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: DoublyLinkedList<u32> = DoublyLinkedList::new();
    let mut model: VecDeque<u32> = VecDeque::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 10;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                list.push_front(value);
                model.push_front(value);
            },
            1 => {
                list.push_back(value);
                model.push_back(value);
            },
            2 => assert_eq!(list.pop_front(), model.pop_front()),
            3 => assert_eq!(list.pop_back(), model.pop_back()),
            4 => {
                // insert at a position derived from the value
                let index = value as usize % (model.len() + 2);
                let result = list.insert(index, value);
                if index <= model.len() {
                    assert!(result.is_ok());
                    model.insert(index, value);
                } else {
                    assert!(result.is_err());
                }
            },
            5 => {
                // set
                let index = value as usize % (model.len() + 1);
                let result = list.set(index, value);
                match model.get_mut(index) {
                    Some(slot) => {
                        assert_eq!(result.ok(), Some(*slot));
                        *slot = value;
                    },
                    None => assert!(result.is_err()),
                }
            },
            6 => {
                // get
                let index = value as usize % (model.len() + 1);
                assert_eq!(list.get(index), model.get(index));
            },
            7 => {
                // remove first occurrence
                let position = model.iter().position(|v| *v == value);
                assert_eq!(list.index_of(&value), position);
                assert_eq!(list.remove(&value).is_some(), position.is_some());
                if let Some(position) = position {
                    model.remove(position);
                }
            },
            8 => {
                // move the node at a position to the front
                let index = value as usize % (model.len() + 1);
                match list.node_id_at(index) {
                    Some(id) => {
                        assert!(list.move_to_front(id));
                        if let Some(moved) = model.remove(index) {
                            model.push_front(moved);
                        }
                    },
                    None => assert!(index >= model.len()),
                }
            },
            9 => {
                if value % 16 == 0 {
                    list.clear();
                    model.clear();
                } else {
                    list.reverse();
                    model.make_contiguous().reverse();
                }
            },
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        assert_eq!(list.front(), model.front());
        assert_eq!(list.back(), model.back());
        assert!(list.check_invariants().is_ok());

        idx += 2;
    }

    assert!(list.iter().eq(model.iter()));
    assert!(list.iter().rev().eq(model.iter().rev()));
});
