// ==============================================
// LINKED CONTAINER TESTS (integration)
// ==============================================
//
// Cross-checks the list and map containers against std collections under
// seeded operation sequences.

use std::collections::VecDeque;

use chainkit::ds::{
    DoublyLinkedList, LinkKind, LinkedList, LinkedMap, List, MultiMap, SetMultiMap, Stack,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ==============================================
// DoublyLinkedList
// ==============================================

mod doubly_linked_list {
    use super::*;

    #[test]
    fn indexed_get_matches_iteration_both_halves() {
        let list: DoublyLinkedList<u32> = (0..10).collect();
        let expected: Vec<_> = list.iter().copied().collect();

        for (i, value) in expected.iter().enumerate() {
            assert_eq!(list.get(i), Some(value), "index {i}");
        }
        assert_eq!(list.get(10), None);
    }

    #[test]
    fn reverse_matches_vec_reverse() {
        for len in 0..8u32 {
            let mut list: DoublyLinkedList<u32> = (0..len).collect();
            let mut expected: Vec<_> = (0..len).collect();

            list.reverse();
            expected.reverse();

            assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
            assert_eq!(
                list.iter().rev().copied().collect::<Vec<_>>(),
                (0..len).collect::<Vec<_>>()
            );
            assert!(list.check_invariants().is_ok());
        }
    }

    #[test]
    fn seeded_ops_match_vecdeque() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut list = DoublyLinkedList::new();
        let mut model = VecDeque::new();

        for step in 0..5_000u32 {
            match rng.random_range(0..8u8) {
                0 => {
                    list.push_front(step);
                    model.push_front(step);
                },
                1 => {
                    list.push_back(step);
                    model.push_back(step);
                },
                2 => assert_eq!(list.pop_front(), model.pop_front()),
                3 => assert_eq!(list.pop_back(), model.pop_back()),
                4 => {
                    let index = rng.random_range(0..=model.len());
                    assert!(list.insert(index, step).is_ok());
                    model.insert(index, step);
                },
                5 if !model.is_empty() => {
                    let index = rng.random_range(0..model.len());
                    assert_eq!(list.set(index, step).ok(), Some(model[index]));
                    model[index] = step;
                },
                6 if !model.is_empty() => {
                    let target = model[rng.random_range(0..model.len())];
                    let position = model.iter().position(|v| *v == target);
                    assert_eq!(list.index_of(&target), position);
                    assert_eq!(list.remove(&target), Some(target));
                    if let Some(position) = position {
                        model.remove(position);
                    }
                },
                _ => {
                    list.reverse();
                    model.make_contiguous().reverse();
                },
            }

            assert_eq!(list.len(), model.len());
            assert_eq!(list.front(), model.front());
            assert_eq!(list.back(), model.back());
        }

        assert!(list.iter().eq(model.iter()));
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn out_of_range_positions_are_errors() {
        let mut list: DoublyLinkedList<u8> = (0..3).collect();
        let err = list.insert(4, 9).unwrap_err();
        assert_eq!((err.index(), err.len()), (4, 3));
        assert!(list.set(3, 9).is_err());
        assert_eq!(list.len(), 3);
    }
}

// ==============================================
// LinkedList (both link kinds)
// ==============================================

mod linked_list {
    use super::*;

    fn exercise(kind: LinkKind, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut list = LinkedList::new(kind);
        let mut model: VecDeque<u16> = VecDeque::new();

        for step in 0..2_000u16 {
            match rng.random_range(0..7u8) {
                0 => {
                    list.push_front(step);
                    model.push_front(step);
                },
                1 => {
                    list.push_back(step);
                    model.push_back(step);
                },
                2 => assert_eq!(list.pop_front(), model.pop_front()),
                3 => assert_eq!(list.pop_back(), model.pop_back()),
                4 => {
                    let index = rng.random_range(0..=model.len());
                    assert!(list.insert(index, step).is_ok());
                    model.insert(index, step);
                },
                5 if !model.is_empty() => {
                    let index = rng.random_range(0..model.len());
                    assert_eq!(list.get(index), model.get(index));
                },
                _ => {
                    list.reverse();
                    model.make_contiguous().reverse();
                },
            }
            assert_eq!(list.len(), model.len());
        }

        assert_eq!(list.to_vec(), model.iter().copied().collect::<Vec<_>>());
        assert_eq!(list.kind(), kind);
    }

    #[test]
    fn singly_matches_vecdeque() {
        exercise(LinkKind::Singly, 3);
    }

    #[test]
    fn doubly_matches_vecdeque() {
        exercise(LinkKind::Doubly, 3);
    }

    #[test]
    fn for_each_passes_positions() {
        let mut list = LinkedList::singly();
        list.extend(["a", "b", "c"]);

        let mut seen = Vec::new();
        list.for_each(|value, index| seen.push((index, *value)));
        assert_eq!(seen, vec![(0, "a"), (1, "b"), (2, "c")]);
    }
}

// ==============================================
// LinkedMap
// ==============================================

#[test]
fn linked_map_tracks_insertion_and_moves() {
    let mut map = LinkedMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);

    assert!(map.move_to_front(&"c"));
    assert!(!map.move_to_front(&"missing"));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);

    assert_eq!(map.insert("a", 10), Some(1));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["c", "b", "a"]);

    assert_eq!(map.pop_front(), Some(("c", 3)));
    assert_eq!(map.pop_back(), Some(("a", 10)));
    assert_eq!(map.remove(&"b"), Some(2));
    assert!(map.is_empty());
    assert_eq!(map.front(), None);
}

// ==============================================
// List / Stack
// ==============================================

#[test]
fn list_and_stack_basics() {
    let mut list: List<i32> = (1..=5).collect();
    assert_eq!(list.remove_at(0).ok(), Some(1));
    assert!(list.remove_at(10).is_err());
    assert_eq!(list.join(", "), "2, 3, 4, 5");
    assert_eq!(list.filter(|v| v % 2 == 0).to_vec(), vec![2, 4]);

    let mut stack = Stack::new();
    stack.extend(list.iter().copied());
    assert_eq!(stack.peek(), Some(&5));
    assert_eq!(stack.pop(), Some(5));
    assert_eq!(stack.len(), 3);
}

// ==============================================
// Multimaps
// ==============================================

mod multimaps {
    use super::*;

    #[test]
    fn multi_map_keeps_duplicates_in_order() {
        let mut map = MultiMap::new();
        map.insert("k", 1);
        map.insert("k", 2);
        map.insert("k", 1);

        assert_eq!(map.get(&"k").map(|values| values.to_vec()), Some(vec![1, 2, 1]));
        assert!(map.remove_value(&"k", &1));
        assert_eq!(map.get(&"k").map(|values| values.to_vec()), Some(vec![2, 1]));
        assert!(map.remove_value(&"k", &2));
        assert!(map.remove_value(&"k", &1));
        assert!(!map.contains_key(&"k"));
    }

    #[test]
    fn set_multi_map_deduplicates() {
        let mut map = SetMultiMap::new();
        assert!(map.insert("k", 1));
        assert!(!map.insert("k", 1));
        assert!(map.insert("k", 2));

        assert!(map.has_value(&"k", &2));
        assert_eq!(map.find(&"k", |v| *v > 1), Some(&2));
        assert!(map.remove_value(&"k", Some(&1)));
        assert!(map.remove_value(&"k", None));
        assert!(map.is_empty());
    }
}
