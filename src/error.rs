//! Errors raised by the tree engine.
//!
//! Negative lookups are not errors: [`find`][crate::linked::Tree::find] and friends return
//! `None`, and [`height`][crate::linked::Tree::height] returns `None` on an empty tree. The only
//! operation that fails is removing something that isn't there.

use thiserror::Error;

/// Failure of a mutating operation on a [`Tree`][crate::linked::Tree].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// [`remove`][crate::linked::Tree::remove] was asked for an item the tree doesn't hold.
    /// The tree is left exactly as it was.
    #[error("item not in tree")]
    ItemAbsent,
}

/// Shorthand for results of tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
