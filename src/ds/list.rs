//! Growable list with positional and search helpers.
//!
//! `List` wraps a `Vec` and adds the value-oriented operations the multi-maps
//! need (`remove` by value, `index_of`, `last_index_of`). Positional writes
//! report out-of-range indices as [`IndexError`] instead of panicking.
use std::cmp::Ordering;
use std::fmt;

use crate::error::IndexError;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct List<E> {
    items: Vec<E>,
}

impl<E> List<E> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends `element`.
    pub fn add(&mut self, element: E) {
        self.items.push(element);
    }

    pub fn add_all(&mut self, elements: impl IntoIterator<Item = E>) {
        self.items.extend(elements);
    }

    /// Inserts at `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, element: E) -> Result<(), IndexError> {
        if index > self.items.len() {
            return Err(IndexError::new(index, self.items.len()));
        }
        self.items.insert(index, element);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.items.get_mut(index)
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, element: E) -> Result<E, IndexError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(IndexError::new(index, len))?;
        Ok(std::mem::replace(slot, element))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<E, IndexError> {
        if index >= self.items.len() {
            return Err(IndexError::new(index, self.items.len()));
        }
        Ok(self.items.remove(index))
    }

    pub fn remove_first(&mut self) -> Option<E> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    pub fn remove_last(&mut self) -> Option<E> {
        self.items.pop()
    }

    pub fn first(&self) -> Option<&E> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&E> {
        self.items.last()
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.items.clone()
    }

    /// Returns a new list with the elements of `self` followed by `other`.
    pub fn concat(&self, other: &List<E>) -> List<E>
    where
        E: Clone,
    {
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        List { items }
    }

    pub fn join(&self, separator: &str) -> String
    where
        E: fmt::Display,
    {
        let mut out = String::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(&item.to_string());
        }
        out
    }

    pub fn filter(&self, mut predicate: impl FnMut(&E) -> bool) -> List<E>
    where
        E: Clone,
    {
        self.items.iter().filter(|e| predicate(e)).cloned().collect()
    }

    pub fn map<U>(&self, f: impl FnMut(&E) -> U) -> List<U> {
        self.items.iter().map(f).collect()
    }

    pub fn find(&self, mut predicate: impl FnMut(&E) -> bool) -> Option<&E> {
        self.items.iter().find(|e| predicate(e))
    }

    pub fn find_index(&self, predicate: impl FnMut(&E) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    pub fn all(&self, predicate: impl FnMut(&E) -> bool) -> bool {
        self.items.iter().all(predicate)
    }

    pub fn any(&self, predicate: impl FnMut(&E) -> bool) -> bool {
        self.items.iter().any(predicate)
    }

    pub fn sort(&mut self)
    where
        E: Ord,
    {
        self.items.sort();
    }

    pub fn sort_by(&mut self, compare: impl FnMut(&E, &E) -> Ordering) {
        self.items.sort_by(compare);
    }
}

impl<E: PartialEq> List<E> {
    pub fn contains(&self, element: &E) -> bool {
        self.items.contains(element)
    }

    pub fn index_of(&self, element: &E) -> Option<usize> {
        self.items.iter().position(|e| e == element)
    }

    pub fn last_index_of(&self, element: &E) -> Option<usize> {
        self.items.iter().rposition(|e| e == element)
    }

    /// Removes the first occurrence of `element`.
    pub fn remove(&mut self, element: &E) -> Option<E> {
        let index = self.index_of(element)?;
        Some(self.items.remove(index))
    }
}

impl<E: fmt::Debug> fmt::Debug for List<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<E> Default for List<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<Vec<E>> for List<E> {
    fn from(items: Vec<E>) -> Self {
        Self { items }
    }
}

impl<E> FromIterator<E> for List<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<E> Extend<E> for List<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<E> IntoIterator for List<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a List<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
