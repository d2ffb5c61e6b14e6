//! A link-based BST. Each `Node` exclusively owns its children through `Box`es and the
//! `Tree` owns the root, so relinking during deletion is always a move from one slot to
//! another. Nothing rebalances the tree implicitly - call [`Tree::rebalance`] when it
//! matters.
//!
//! Equal items are accepted and routed to the right, so the tree behaves like an ordered
//! multiset. `find`, `replace` and `remove` act on the first equal item met on the way down.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//!
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(tree.height(), 2);
//!
//! // Neighbours don't have to be in the tree themselves.
//! assert_eq!(tree.successor(&6), Some(&7));
//! assert_eq!(tree.predecessor(&1), None);
//!
//! assert_eq!(tree.remove(&5), Ok(5));
//! assert_eq!(tree.remove(&5), Err(Error::ItemNotFound));
//! assert_eq!(tree.len(), 6);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::stack::LinkedStack;

type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug)]
struct Node<T> {
    data: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(data: T) -> Box<Self> {
        Box::new(Node {
            data,
            left: None,
            right: None,
        })
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Moves the largest item of the left subtree into `self` and returns the item `self` held
    /// before. The node that held the largest item is unlinked and its left child takes its
    /// place. Returns `None` (leaving everything untouched) if there is no left subtree.
    fn lift_max_in_left_subtree(&mut self) -> Option<T> {
        let mut slot = &mut self.left;
        while slot.as_ref().map_or(false, |node| node.right.is_some()) {
            slot = &mut slot.as_mut()?.right;
        }

        let max = slot.take()?;
        let Node { data, left, .. } = *max;
        *slot = left;
        Some(mem::replace(&mut self.data, data))
    }

    /// Writes this subtree rotated 90 degrees counterclockwise: right subtree first, one
    /// `"| "` per level of depth.
    fn fmt_rotated(&self, level: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: fmt::Display,
    {
        if let Some(right) = self.right() {
            right.fmt_rotated(level + 1, f)?;
        }
        writeln!(f, "{}{}", "| ".repeat(level), self.data)?;
        if let Some(left) = self.left() {
            left.fmt_rotated(level + 1, f)?;
        }
        Ok(())
    }
}

/// A Binary Search Tree storing single items. This can be used for adding, finding,
/// replacing and removing items as well as ordered queries over them.
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    /// Copies the tree node by node, links included, so the copy has exactly the same shape
    /// even where re-adding the items would route an equal item the other way.
    fn clone(&self) -> Self {
        let mut root = None;
        {
            let mut pending = LinkedStack::new();
            if let Some(node) = self.root() {
                pending.push((node, &mut root));
            }
            while let Ok((source, slot)) = pending.pop() {
                let Node { left, right, .. } =
                    &mut **slot.insert(Node::new_boxed(source.data.clone()));
                if let Some(source_left) = source.left() {
                    pending.push((source_left, left));
                }
                if let Some(source_right) = source.right() {
                    pending.push((source_right, right));
                }
            }
        }
        Self {
            root,
            size: self.size,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("root", &self.root)
            .finish()
    }
}

/// Renders the tree rotated 90 degrees counterclockwise. Meant for eyeballing a tree while
/// debugging, not for parsing.
///
/// ```
/// use linked_bst::Tree;
///
/// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
/// assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => root.fmt_rotated(0, f),
            None => Ok(()),
        }
    }
}

/// Two trees are equal when they hold equal items in the same shape. Trees holding the same
/// items in a different shape are not equal; compare [`Tree::inorder`] for that.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size {
            return false;
        }

        let mut pending = LinkedStack::new();
        pending.push((self.root(), other.root()));
        while let Ok(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(mine), Some(theirs)) => {
                    if mine.data != theirs.data {
                        return false;
                    }
                    pending.push((mine.right(), theirs.right()));
                    pending.push((mine.left(), theirs.left()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of items in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Potentially finds an item equal to `item` in this tree. If no item compares equal,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut cursor = self.root();
        while let Some(node) = cursor {
            cursor = match item.cmp(&node.data) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(&node.data),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Whether an item equal to `item` is in the tree.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Adds `item` as a new leaf. Items equal to one already stored go to its right, so
    /// duplicates are kept rather than overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    /// tree.add(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&1, &1]);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if item < node.data {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Removes an item equal to `item` from the tree and returns the stored item.
    ///
    /// # Errors
    ///
    /// [`Error::ItemNotFound`] if nothing in the tree compares equal to `item`. The tree is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(Error::ItemNotFound));
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&1, &3]);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: Ord,
    {
        // `slot` is the parent's link to the node being looked at (or the root link), so
        // whatever replaces the removed node is written straight into it. Each step is
        // decided before borrowing mutably, so the `ok_or`s below never fire.
        let mut slot = &mut self.root;
        loop {
            slot = match slot.as_ref().map(|node| item.cmp(&node.data)) {
                Some(Ordering::Less) => &mut slot.as_mut().ok_or(Error::ItemNotFound)?.left,
                Some(Ordering::Greater) => &mut slot.as_mut().ok_or(Error::ItemNotFound)?.right,
                Some(Ordering::Equal) | None => break,
            };
        }

        let mut target = slot.take().ok_or(Error::ItemNotFound)?;
        self.size -= 1;

        if target.right.is_some() {
            if let Some(removed) = target.lift_max_in_left_subtree() {
                trace!("removed a node with two children");
                *slot = Some(target);
                return Ok(removed);
            }
        }

        let Node { data, left, right } = *target;
        trace!(
            "removed a node with {} children",
            usize::from(left.is_some()) + usize::from(right.is_some())
        );
        *slot = left.or(right);
        Ok(data)
    }

    /// Overwrites the first item equal to `item` with `new_item` and returns the old item, or
    /// returns `None` if there is no such item.
    ///
    /// The node keeps its position, so `new_item` must order the same way relative to the
    /// rest of the tree as `item` did. This is not checked: breaking it leaves later lookups
    /// unreliable.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [(2, 'b'), (1, 'a')].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&(2, 'b'), (2, 'c')), Some((2, 'b')));
    /// assert_eq!(tree.replace(&(3, 'c'), (3, 'd')), None);
    /// assert!(tree.contains(&(2, 'c')));
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            cursor = match item.cmp(&node.data) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Some(mem::replace(&mut node.data, new_item)),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        debug!("clearing a tree of {} items", self.size);
        self.teardown();
    }

    /// A lazy, ascending view of the items.
    pub fn inorder(&self) -> InOrder<'_, T> {
        InOrder::new(self.root())
    }

    /// A lazy pre-order view of the items: every item comes before the items of its left
    /// subtree, which come before those of its right subtree. This is also what iterating
    /// over `&Tree` yields.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root())
    }

    /// The number of edges on the longest path from the root down to a leaf. A single item
    /// has height `0` and an empty tree has height `-1`.
    pub fn height(&self) -> isize {
        let mut levels: usize = 0;
        let mut pending = LinkedStack::new();
        if let Some(root) = self.root() {
            pending.push((root, 1));
        }
        while let Ok((node, depth)) = pending.pop() {
            levels = levels.max(depth);
            for child in [node.left(), node.right()].into_iter().flatten() {
                pending.push((child, depth + 1));
            }
        }
        levels as isize - 1
    }

    /// Counts the nodes by walking the tree rather than trusting the cached size.
    pub fn num_vert(&self) -> usize {
        self.iter().count()
    }

    /// Whether the height stays under `2 * ln(n + 1) - 1` for `n` nodes. This is a loose,
    /// logarithmic bound rather than a per-node check, so trees that are lopsided but not
    /// degenerate still count as balanced.
    ///
    /// Note that an empty tree has height `-1`, which is not below `2 * ln(1) - 1`, so it is
    /// reported as unbalanced.
    pub fn is_balanced(&self) -> bool {
        let bound = 2.0 * ((self.num_vert() + 1) as f64).ln() - 1.0;
        (self.height() as f64) < bound
    }

    /// Every item `x` with `low <= x <= high`, ascending. This filters a full in-order walk
    /// so it always costs `O(n)`.
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        self.inorder()
            .filter(|item| low <= *item && *item <= high)
            .collect()
    }

    /// The smallest item strictly greater than `item`. `item` itself doesn't need to be in
    /// the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [10, 5, 15].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Some(&10));
    /// assert_eq!(tree.successor(&11), Some(&15));
    /// assert_eq!(tree.successor(&15), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut candidate = None;
        let mut cursor = self.root();
        while let Some(node) = cursor {
            if node.data <= *item {
                cursor = node.right();
            } else {
                candidate = Some(&node.data);
                cursor = node.left();
            }
        }
        candidate
    }

    /// The largest item strictly less than `item`. `item` itself doesn't need to be in the
    /// tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [10, 5, 15].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&15), Some(&10));
    /// assert_eq!(tree.predecessor(&9), Some(&5));
    /// assert_eq!(tree.predecessor(&5), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut candidate = None;
        let mut cursor = self.root();
        while let Some(node) = cursor {
            if node.data >= *item {
                cursor = node.left();
            } else {
                candidate = Some(&node.data);
                cursor = node.right();
            }
        }
        candidate
    }

    /// Rebuilds the tree with minimal height: the items are drained in order, then the middle
    /// item is added first and each half is rebuilt the same way. Returns `self` so calls can
    /// be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// assert_eq!(tree.height(), 6);
    /// assert!(!tree.is_balanced());
    ///
    /// assert_eq!(tree.rebalance().height(), 2);
    /// assert!(tree.is_balanced());
    /// ```
    pub fn rebalance(&mut self) -> &mut Self
    where
        T: Ord,
    {
        let mut items: Vec<_> = mem::take(self).into_iter().map(Some).collect();
        self.add_halves(&mut items);
        debug!(
            "rebalanced {} items to height {}",
            self.size,
            self.height()
        );

        if cfg!(debug_assertions) {
            assert_eq!(self.size, items.len());
            assert!(self.inorder().zip(self.inorder().skip(1)).all(|(a, b)| a <= b));
        }
        self
    }

    /// Adds the middle of `items`, then each half. `items` is sorted, so this recurses only
    /// `log(n)` deep.
    fn add_halves(&mut self, items: &mut [Option<T>])
    where
        T: Ord,
    {
        if items.is_empty() {
            return;
        }
        let (lower, rest) = items.split_at_mut(items.len() / 2);
        if let Some(middle) = rest[0].take() {
            self.add(middle);
        }
        self.add_halves(lower);
        self.add_halves(&mut rest[1..]);
    }

    fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Drops every node one at a time. Dropping the root `Box` directly would recurse once per
    /// level, which a degenerate tree can turn into a stack overflow.
    fn teardown(&mut self) {
        let mut pending: Vec<_> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.size = 0;
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consumes the tree, yielding its items in ascending order.
impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let root = self.root.take();
        self.size = 0;
        IntoIter::new(root)
    }
}

/// Pre-order iterator over a [`Tree`]. See [`Tree::iter`].
pub struct Iter<'a, T> {
    pending: LinkedStack<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut pending = LinkedStack::new();
        pending.extend(root);
        Self { pending }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop().ok()?;
        // Right goes in first so the left subtree is visited first.
        self.pending.extend(node.right());
        self.pending.extend(node.left());
        Some(&node.data)
    }
}

/// Ascending iterator over a [`Tree`]. See [`Tree::inorder`].
pub struct InOrder<'a, T> {
    pending: LinkedStack<&'a Node<T>>,
}

impl<'a, T> InOrder<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self {
            pending: LinkedStack::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.pending.push(node);
            link = node.left();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop().ok()?;
        self.push_left_spine(node.right());
        Some(&node.data)
    }
}

/// Consuming ascending iterator over a [`Tree`].
pub struct IntoIter<T> {
    pending: LinkedStack<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    fn new(root: Link<T>) -> Self {
        let mut iter = Self {
            pending: LinkedStack::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.pending.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop().ok()?;
        let Node { data, right, .. } = *node;
        self.push_left_spine(right);
        Some(data)
    }
}

impl<T> Drop for IntoIter<T> {
    // Pending nodes still own their right subtrees, so drain them item by item.
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
