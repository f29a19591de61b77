//! Linked list with a construction-time choice of singly or doubly linked nodes.
//!
//! [`LinkKind::Singly`] keeps only `next` links: removing the tail or an
//! interior node finds the predecessor with a forward scan, and index access
//! always walks from the head. [`LinkKind::Doubly`] maintains `prev` links as
//! well, so positional access walks from whichever end is nearer.
//!
//! Use [`DoublyLinkedList`](crate::ds::DoublyLinkedList) instead when you need
//! stable node handles.
use std::fmt;

use crate::ds::node::{Linked, Node};
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::IndexError;

/// How nodes of a [`LinkedList`] are linked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Forward links only.
    #[default]
    Singly,
    /// Forward and backward links.
    Doubly,
}

/// Singly or doubly linked list, chosen at construction.
pub struct LinkedList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    kind: LinkKind,
}

impl<T> LinkedList<T> {
    pub fn new(kind: LinkKind) -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
            kind,
        }
    }

    pub fn singly() -> Self {
        Self::new(LinkKind::Singly)
    }

    pub fn doubly() -> Self {
        Self::new(LinkKind::Doubly)
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    fn is_doubly(&self) -> bool {
        self.kind == LinkKind::Doubly
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn push_front(&mut self, value: T) {
        let old_head = self.head;
        let mut node = Node::new(value);
        node.links_mut().next = old_head;
        let id = self.arena.insert(node);

        if self.is_doubly()
            && let Some(head_node) = old_head.and_then(|h| self.arena.get_mut(h))
        {
            head_node.links_mut().prev = Some(id);
        }
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
    }

    pub fn push_back(&mut self, value: T) {
        let old_tail = self.tail;
        let mut node = Node::new(value);
        if self.is_doubly() {
            node.links_mut().prev = old_tail;
        }
        let id = self.arena.insert(node);

        if let Some(tail_node) = old_tail.and_then(|t| self.arena.get_mut(t)) {
            tail_node.links_mut().next = Some(id);
        }
        self.tail = Some(id);
        if self.head.is_none() {
            self.head = Some(id);
        }
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.arena.get(id)).map(Node::value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.arena.get(id)).map(Node::value)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove_linked(id, None)
    }

    /// Removes the tail. O(n) for singly linked lists.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        let pred = self.predecessor(id);
        self.remove_linked(id, pred)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.node_at(index)
            .and_then(|id| self.arena.get(id))
            .map(Node::value)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let id = self.node_at(index)?;
        self.arena.get_mut(id).map(Node::value_mut)
    }

    /// Replaces the value at `index`.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), IndexError> {
        let len = self.len();
        let node = self
            .node_at(index)
            .and_then(|id| self.arena.get_mut(id))
            .ok_or(IndexError::new(index, len))?;
        node.set_value(value);
        Ok(())
    }

    /// Inserts `value` at `index`, shifting later elements one position right.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexError> {
        let len = self.len();
        if index > len {
            return Err(IndexError::new(index, len));
        }
        if index == 0 {
            self.push_front(value);
            return Ok(());
        }
        if index == len {
            self.push_back(value);
            return Ok(());
        }

        let prev_id = self.node_at(index - 1).ok_or(IndexError::new(index, len))?;
        let next_id = self.arena.get(prev_id).and_then(Node::next);
        let mut node = Node::new(value);
        {
            let links = node.links_mut();
            links.next = next_id;
            if self.is_doubly() {
                links.prev = Some(prev_id);
            }
        }
        let id = self.arena.insert(node);

        if let Some(prev_node) = self.arena.get_mut(prev_id) {
            prev_node.links_mut().next = Some(id);
        }
        if self.is_doubly()
            && let Some(next_node) = next_id.and_then(|n| self.arena.get_mut(n))
        {
            next_node.links_mut().prev = Some(id);
        }
        Ok(())
    }

    /// Reverses the list in place.
    pub fn reverse(&mut self) {
        let doubly = self.is_doubly();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(node) = self.arena.get_mut(id) else {
                break;
            };
            let links = node.links_mut();
            let next = links.next;
            links.next = prev;
            if doubly {
                links.prev = next;
            }
            prev = Some(id);
            cursor = next;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.arena.get(cursor?)?;
            cursor = node.next();
            Some(node.value())
        })
    }

    /// Calls `f` with each value and its position, head first.
    pub fn for_each(&self, mut f: impl FnMut(&T, usize)) {
        for (index, value) in self.iter().enumerate() {
            f(value, index);
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn node_at(&self, index: usize) -> Option<SlotId> {
        let len = self.len();
        if index >= len {
            return None;
        }
        if self.is_doubly() && index >= len / 2 {
            let mut cursor = self.tail?;
            for _ in index + 1..len {
                cursor = self.arena.get(cursor)?.previous()?;
            }
            Some(cursor)
        } else {
            let mut cursor = self.head?;
            for _ in 0..index {
                cursor = self.arena.get(cursor)?.next()?;
            }
            Some(cursor)
        }
    }

    fn predecessor(&self, id: SlotId) -> Option<SlotId> {
        if self.is_doubly() {
            return self.arena.get(id)?.previous();
        }
        let mut cursor = self.head?;
        loop {
            let next = self.arena.get(cursor)?.next()?;
            if next == id {
                return Some(cursor);
            }
            cursor = next;
        }
    }

    fn remove_linked(&mut self, id: SlotId, pred: Option<SlotId>) -> Option<T> {
        let next = self.arena.get(id)?.next();

        match pred.and_then(|p| self.arena.get_mut(p)) {
            Some(pred_node) => pred_node.links_mut().next = next,
            None => self.head = next,
        }
        if self.is_doubly()
            && let Some(next_node) = next.and_then(|n| self.arena.get_mut(n))
        {
            next_node.links_mut().prev = pred;
        }
        if self.tail == Some(id) {
            self.tail = pred;
        }
        self.arena.remove(id).map(Node::into_value)
    }
}

impl<T: PartialEq> LinkedList<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value)
    }

    /// Removes the first occurrence of `value`.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let mut pred = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.arena.get(id)?;
            if node.value() == value {
                return self.remove_linked(id, pred);
            }
            pred = Some(id);
            cursor = node.next();
        }
        None
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new(LinkKind::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedList")
            .field("kind", &self.kind)
            .field("values", &DebugValues(self))
            .finish()
    }
}

struct DebugValues<'a, T>(&'a LinkedList<T>);

impl<T: fmt::Debug> fmt::Debug for DebugValues<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}
