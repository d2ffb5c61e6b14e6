//! Errors returned by the collections in this crate.

use thiserror::Error;

/// The ways an operation on a [`Tree`][crate::Tree] or a
/// [`LinkedStack`][crate::LinkedStack] can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The item asked to be removed is not stored in the tree.
    #[error("item not in tree")]
    ItemNotFound,
    /// `pop` or `peek` was called on an empty stack.
    #[error("the stack is empty")]
    EmptyCollection,
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
