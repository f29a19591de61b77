//! LIFO stack.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack<E> {
    items: Vec<E>,
}

impl<E> Stack<E> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, element: E) {
        self.items.push(element);
    }

    pub fn pop(&mut self) -> Option<E> {
        self.items.pop()
    }

    /// Top element without removing it.
    pub fn peek(&self) -> Option<&E> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<E> Extend<E> for Stack<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
