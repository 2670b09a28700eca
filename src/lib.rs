//! This crate exposes a link-based Binary Search Tree that only gets balanced when asked to,
//! along with a small driver that shows what that balance is worth when searching.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an item
//! and will sometimes have child `Node`s. The most important invariants of this BST are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree hold an
//!    item less than its own item.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree hold an
//!    item greater than or equal to its own item.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for items in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Adding items in sorted order makes the tree as
//! tall as it is long, no better than a list. [`Tree::rebalance`][linked::Tree::rebalance]
//! rebuilds it with a height of `O(lg N)` where `N` is the number of nodes in the tree. BSTs
//! also naturally support sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod demo;
pub mod error;
pub mod linked;
pub mod traverse;
