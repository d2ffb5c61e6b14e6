//! A singly linked LIFO stack. The tree uses it to walk its nodes without recursion, but it
//! is a perfectly usable stack on its own.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, LinkedStack};
//!
//! let mut stack = LinkedStack::new();
//! assert_eq!(stack.pop(), Err(Error::EmptyCollection));
//!
//! stack.push(1);
//! stack.push(2);
//! assert_eq!(stack.peek(), Ok(&2));
//! assert_eq!(stack.pop(), Ok(2));
//! assert_eq!(stack.len(), 1);
//! ```

use std::fmt;

use crate::error::{Error, Result};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    data: T,
    next: Link<T>,
}

/// A link-based stack. Every `push` allocates a node in front of the previous top.
pub struct LinkedStack<T> {
    top: Link<T>,
    size: usize,
}

impl<T> Default for LinkedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> fmt::Debug for LinkedStack<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> LinkedStack<T> {
    /// Generate a new, empty `LinkedStack`.
    pub fn new() -> Self {
        Self { top: None, size: 0 }
    }

    /// The number of items on the stack.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Puts `item` on top of the stack.
    pub fn push(&mut self, item: T) {
        let next = self.top.take();
        self.top = Some(Box::new(Node { data: item, next }));
        self.size += 1;
    }

    /// Removes and returns the top item.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the stack is empty.
    pub fn pop(&mut self) -> Result<T> {
        let node = self.top.take().ok_or(Error::EmptyCollection)?;
        let Node { data, next } = *node;
        self.top = next;
        self.size -= 1;
        Ok(data)
    }

    /// Returns the top item without removing it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] when the stack is empty.
    pub fn peek(&self) -> Result<&T> {
        self.top
            .as_deref()
            .map(|node| &node.data)
            .ok_or(Error::EmptyCollection)
    }

    /// Drops every item. Nodes are unlinked one at a time so a tall stack can't overflow the
    /// call stack while dropping.
    pub fn clear(&mut self) {
        let mut link = self.top.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.size = 0;
    }

    /// Iterates from the bottom of the stack to the top, i.e. in the order items were pushed.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut from_top = Vec::with_capacity(self.size);
        let mut link = self.top.as_deref();
        while let Some(node) = link {
            from_top.push(&node.data);
            link = node.next.as_deref();
        }
        from_top.into_iter().rev()
    }
}

impl<T> Extend<T> for LinkedStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}
