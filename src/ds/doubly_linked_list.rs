//! Doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and are linked by [`SlotId`], so every
//! node has a stable handle. Handles give O(1) removal and O(1) moves to
//! either end, which is what the recency list of
//! [`EvictingCache`](crate::policy::evicting::EvictingCache) needs.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None,       next: id_2 }   │
//!   │ id_2   │ { value: B, prev: id_1,       next: id_3 }   │
//!   │ id_3   │ { value: C, prev: id_2,       next: None }   │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Operations
//!
//! | Method                        | Complexity | Notes                              |
//! |-------------------------------|------------|------------------------------------|
//! | `push_front` / `push_back`    | O(1)       | Returns the new node's `SlotId`    |
//! | `pop_front` / `pop_back`      | O(1)       | `None` on an empty list            |
//! | `remove_node(id)`             | O(1)       | Unlink + free slot                 |
//! | `move_to_front(id)`           | O(1)       | Unlink + relink at head            |
//! | `get` / `set` / `insert`      | O(n/2)     | Walks from the nearer end          |
//! | `remove(&v)` / `index_of(&v)` | O(n)       | Forward scan                       |
//! | `reverse`                     | O(n)       | Swaps links in place               |
//!
//! ## Handles
//!
//! A `SlotId` is valid until its node is removed or the list is cleared.
//! Slots are reused without a generation tag, so a handle kept past that
//! point may name whichever node later takes the slot. Drop handles when
//! their node leaves the list.
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use std::fmt;
use std::iter::FusedIterator;

use crate::ds::node::{Endpoints, Linked, Node};
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{IndexError, InvariantError};

/// Doubly linked list whose nodes are addressed by [`SlotId`].
pub struct DoublyLinkedList<T> {
    arena: SlotArena<Node<T>>,
    ends: Endpoints,
}

impl<T> DoublyLinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            ends: Endpoints::default(),
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            ends: Endpoints::default(),
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is a live node of this list.
    pub fn contains_node(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the node behind `id`, including its links.
    ///
    /// Only meaningful while the node `id` was issued for is still linked.
    pub fn node(&self, id: SlotId) -> Option<&Node<T>> {
        self.arena.get(id)
    }

    /// Returns the value stored at `id`.
    pub fn node_value(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(Node::value)
    }

    /// Returns a mutable reference to the value stored at `id`.
    pub fn node_value_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(Node::value_mut)
    }

    /// Returns the head value.
    pub fn front(&self) -> Option<&T> {
        self.ends.head.and_then(|id| self.node_value(id))
    }

    /// Returns the tail value.
    pub fn back(&self) -> Option<&T> {
        self.ends.tail.and_then(|id| self.node_value(id))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.ends.head
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.ends.tail
    }

    /// Inserts `value` as the new head and returns its handle.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node::new(value));
        self.ends.link_front(&mut self.arena, id);
        id
    }

    /// Inserts `value` as the new tail and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node::new(value));
        self.ends.link_back(&mut self.arena, id);
        id
    }

    /// Detaches and returns the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.ends.head?;
        self.remove_node(id)
    }

    /// Detaches and returns the tail value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.ends.tail?;
        self.remove_node(id)
    }

    /// Removes the node `id` and returns its value.
    ///
    /// `id` must not outlive its node; see the module docs on handles.
    pub fn remove_node(&mut self, id: SlotId) -> Option<T> {
        if !self.ends.unlink(&mut self.arena, id) {
            return None;
        }
        self.arena.remove(id).map(Node::into_value)
    }

    /// Moves a live node to the head; returns `false` if `id` is not present.
    ///
    /// A stale handle whose slot has been reused moves the new occupant.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.ends.head == Some(id) {
            return true;
        }
        self.ends.unlink(&mut self.arena, id);
        self.ends.link_front(&mut self.arena, id)
    }

    /// Moves a live node to the tail; returns `false` if `id` is not present.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.ends.tail == Some(id) {
            return true;
        }
        self.ends.unlink(&mut self.arena, id);
        self.ends.link_back(&mut self.arena, id)
    }

    /// Returns the handle of the node at `index`, walking from the nearer end.
    pub fn node_id_at(&self, index: usize) -> Option<SlotId> {
        let len = self.len();
        if index >= len {
            return None;
        }
        if index < len / 2 {
            let mut cursor = self.ends.head?;
            for _ in 0..index {
                cursor = self.arena.get(cursor)?.next()?;
            }
            Some(cursor)
        } else {
            let mut cursor = self.ends.tail?;
            for _ in index + 1..len {
                cursor = self.arena.get(cursor)?.previous()?;
            }
            Some(cursor)
        }
    }

    /// Returns the value at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.node_id_at(index).and_then(|id| self.node_value(id))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let id = self.node_id_at(index)?;
        self.node_value_mut(id)
    }

    /// Replaces the value at `index`, returning the previous value.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, IndexError> {
        let len = self.len();
        let node = self
            .node_id_at(index)
            .and_then(|id| self.arena.get_mut(id))
            .ok_or(IndexError::new(index, len))?;
        Ok(node.set_value(value))
    }

    /// Inserts `value` so that it ends up at position `index`.
    ///
    /// `index == 0` and `index == len()` behave as [`push_front`](Self::push_front)
    /// and [`push_back`](Self::push_back).
    pub fn insert(&mut self, index: usize, value: T) -> Result<SlotId, IndexError> {
        let len = self.len();
        if index > len {
            return Err(IndexError::new(index, len));
        }
        if index == 0 {
            return Ok(self.push_front(value));
        }
        if index == len {
            return Ok(self.push_back(value));
        }
        let anchor = self
            .node_id_at(index)
            .ok_or(IndexError::new(index, len))?;
        let id = self.arena.insert(Node::new(value));
        self.ends.link_before(&mut self.arena, anchor, id);
        Ok(id)
    }

    /// Reverses the list in place without allocating.
    pub fn reverse(&mut self) {
        let mut cursor = self.ends.head;
        while let Some(id) = cursor {
            let Some(node) = self.arena.get_mut(id) else {
                break;
            };
            let links = node.links_mut();
            std::mem::swap(&mut links.prev, &mut links.next);
            cursor = links.prev;
        }
        std::mem::swap(&mut self.ends.head, &mut self.ends.tail);
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.ends.reset();
    }

    /// Returns an iterator from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.ends.head,
            back: self.ends.tail,
            remaining: self.len(),
        }
    }

    /// Returns an iterator from tail to head.
    pub fn iter_rev(&self) -> std::iter::Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    /// Returns an iterator of `(SlotId, &T)` from head to tail.
    pub fn iter_entries(&self) -> impl Iterator<Item = (SlotId, &T)> + '_ {
        let mut cursor = self.ends.head;
        std::iter::from_fn(move || {
            let id = cursor?;
            let node = self.arena.get(id)?;
            cursor = node.next();
            Some((id, node.value()))
        })
    }

    /// Approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.arena.approx_bytes()
    }

    /// Verifies the structural invariants of the chain.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let (head, tail) = (self.ends.head, self.ends.tail);
        if head.is_none() || tail.is_none() {
            if head.is_some() || tail.is_some() || !self.is_empty() {
                return Err(InvariantError::new(
                    "empty list must have neither head nor tail",
                ));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut cursor = head;
        while let Some(id) = cursor {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling link to slot {}", id.index())))?;
            if node.previous() != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has a prev link that does not point back",
                    id.index()
                )));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in list"));
            }
            prev = Some(id);
            cursor = node.next();
        }

        if prev != tail {
            return Err(InvariantError::new("forward walk does not end at tail"));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes but len is {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("doubly linked list invariant violated: {err}");
        }
    }
}

impl<T: PartialEq> DoublyLinkedList<T> {
    /// Returns `true` if some node holds `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Returns the position of the first node holding `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// Returns the handle of the first node holding `value`.
    pub fn find_node(&self, value: &T) -> Option<SlotId> {
        self.iter_entries()
            .find_map(|(id, v)| (v == value).then_some(id))
    }

    /// Removes the first node holding `value` and returns the stored value.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let id = self.find_node(value)?;
        self.remove_node(id)
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DoublyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DoublyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DoublyLinkedList<T> {}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for DoublyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// Borrowing iterator over a [`DoublyLinkedList`], double-ended.
pub struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    front: Option<SlotId>,
    back: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.front?)?;
        self.front = node.next();
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.back?)?;
        self.back = node.previous();
        self.remaining -= 1;
        Some(node.value())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a [`DoublyLinkedList`].
pub struct IntoIter<T> {
    list: DoublyLinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
