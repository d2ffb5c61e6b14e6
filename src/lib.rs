//! This crate exposes a link-based Binary Search Tree (BST) along with the small linked stack
//! it uses to walk itself.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to add, find, and remove
//! stored items. BSTs are typically defined recursively using the notion of a `Node`. A
//! `Node` stores an item and will sometimes have child `Node`s. The invariants kept by
//! [`Tree`] are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree hold an item less than its own.
//! 2. For every `Node`, all the `Node`s in its right subtree hold an item greater than or
//!    equal to its own. Equal items are kept, not merged.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` where `height` is the longest path from the root `Node` to a
//! leaf `Node`. This tree never balances itself, so adding items in sorted order builds a
//! chain whose height is `N - 1`. [`Tree::is_balanced`] reports when the height has drifted
//! away from `O(lg N)` and [`Tree::rebalance`] rebuilds the tree with minimal height.
//! BSTs also naturally support sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree ([`Tree::inorder`]), which is what range and neighbour
//! queries are built on.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod stack;
pub mod tree;


pub use error::{Error, Result};
pub use stack::LinkedStack;
pub use tree::Tree;
