//! Linkable cells shared by the arena-backed containers.
//!
//! A node never owns its neighbours. `prev`/`next` are [`SlotId`] handles into
//! the arena of the container that owns the node, so dropping the container
//! drops every node exactly once and no reference cycles exist.
//!
//! ## Architecture
//!
//! ```text
//!   Endpoints { head, tail }
//!        │                           │
//!        ▼                           ▼
//!   ┌─────────┐ next ┌─────────┐ next ┌─────────┐
//!   │ Node a  │ ───► │ Node b  │ ───► │ Node c  │
//!   │         │ ◄─── │         │ ◄─── │         │
//!   └─────────┘ prev └─────────┘ prev └─────────┘
//! ```
//!
//! [`Endpoints`] carries the relinking primitives (`link_front`, `link_back`,
//! `link_before`, `unlink`) used by [`DoublyLinkedList`](crate::ds::DoublyLinkedList)
//! and [`LinkedMap`](crate::ds::LinkedMap). For every adjacent pair
//! `a.next == Some(b)` implies `b.prev == Some(a)` once a primitive returns.

use crate::ds::slot_arena::{SlotArena, SlotId};

/// Adjacent-node handles of a linked cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Links {
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
}

impl Links {
    /// Handle of the previous node, if any.
    pub fn previous(&self) -> Option<SlotId> {
        self.prev
    }

    /// Handle of the next node, if any.
    pub fn next(&self) -> Option<SlotId> {
        self.next
    }

    /// `true` when neither link is set.
    pub fn is_detached(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

/// Cells that carry [`Links`].
pub trait Linked {
    fn links(&self) -> &Links;
    fn links_mut(&mut self) -> &mut Links;
}

/// A value cell in a linked container.
#[derive(Debug, Clone)]
pub struct Node<T> {
    value: T,
    links: Links,
}

impl<T> Node<T> {
    /// Creates a detached node.
    pub fn new(value: T) -> Self {
        Self {
            value,
            links: Links::default(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Replaces the value, returning the old one.
    pub fn set_value(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn previous(&self) -> Option<SlotId> {
        self.links.prev
    }

    pub fn next(&self) -> Option<SlotId> {
        self.links.next
    }

    pub fn is_detached(&self) -> bool {
        self.links.is_detached()
    }
}

impl<T> Linked for Node<T> {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

/// A node that also carries the key it was stored under.
///
/// The key lets an ordered container rebuild its index entry when the node
/// leaves the chain (e.g. popping the front of a [`LinkedMap`](crate::ds::LinkedMap)).
#[derive(Debug, Clone)]
pub struct KeyedNode<K, V> {
    key: K,
    value: V,
    links: Links,
}

impl<K, V> KeyedNode<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            links: Links::default(),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the value, returning the old one.
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    pub fn previous(&self) -> Option<SlotId> {
        self.links.prev
    }

    pub fn next(&self) -> Option<SlotId> {
        self.links.next
    }

    pub fn is_detached(&self) -> bool {
        self.links.is_detached()
    }
}

impl<K, V> Linked for KeyedNode<K, V> {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

/// Head and tail handles of a doubly linked chain, plus the relinking primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Endpoints {
    pub(crate) head: Option<SlotId>,
    pub(crate) tail: Option<SlotId>,
}

impl Endpoints {
    pub(crate) fn reset(&mut self) {
        self.head = None;
        self.tail = None;
    }

    /// Links the detached node `id` in as the new head.
    pub(crate) fn link_front<N: Linked>(&mut self, arena: &mut SlotArena<N>, id: SlotId) -> bool {
        let old_head = self.head;
        match arena.get_mut(id) {
            Some(node) => {
                let links = node.links_mut();
                links.prev = None;
                links.next = old_head;
            },
            None => return false,
        }
        match old_head.and_then(|h| arena.get_mut(h)) {
            Some(head_node) => head_node.links_mut().prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        true
    }

    /// Links the detached node `id` in as the new tail.
    pub(crate) fn link_back<N: Linked>(&mut self, arena: &mut SlotArena<N>, id: SlotId) -> bool {
        let old_tail = self.tail;
        match arena.get_mut(id) {
            Some(node) => {
                let links = node.links_mut();
                links.prev = old_tail;
                links.next = None;
            },
            None => return false,
        }
        match old_tail.and_then(|t| arena.get_mut(t)) {
            Some(tail_node) => tail_node.links_mut().next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        true
    }

    /// Links the detached node `id` immediately before the linked node `anchor`.
    pub(crate) fn link_before<N: Linked>(
        &mut self,
        arena: &mut SlotArena<N>,
        anchor: SlotId,
        id: SlotId,
    ) -> bool {
        let before = match arena.get(anchor) {
            Some(node) => node.links().prev,
            None => return false,
        };
        let Some(before) = before else {
            return self.link_front(arena, id);
        };
        match arena.get_mut(id) {
            Some(node) => {
                let links = node.links_mut();
                links.prev = Some(before);
                links.next = Some(anchor);
            },
            None => return false,
        }
        if let Some(node) = arena.get_mut(before) {
            node.links_mut().next = Some(id);
        }
        if let Some(node) = arena.get_mut(anchor) {
            node.links_mut().prev = Some(id);
        }
        true
    }

    /// Removes `id` from the chain, stitching its neighbours together and
    /// clearing both of its links. Returns `false` if `id` is not live.
    pub(crate) fn unlink<N: Linked>(&mut self, arena: &mut SlotArena<N>, id: SlotId) -> bool {
        let Links { prev, next } = match arena.get(id) {
            Some(node) => *node.links(),
            None => return false,
        };

        match prev.and_then(|p| arena.get_mut(p)) {
            Some(prev_node) => prev_node.links_mut().next = next,
            None => self.head = next,
        }
        match next.and_then(|n| arena.get_mut(n)) {
            Some(next_node) => next_node.links_mut().prev = prev,
            None => self.tail = prev,
        }
        if let Some(node) = arena.get_mut(id) {
            *node.links_mut() = Links::default();
        }
        true
    }
}
