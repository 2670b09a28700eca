//! Walks over the nodes of a [`Tree`][crate::linked::Tree].
//!
//! None of these recurse. Depth-first walks keep an explicit stack that grows with the height of
//! the tree and the level walk keeps two frontier buffers, so a tree that has degenerated into a
//! list (e.g. built from sorted input) can be walked no matter how long it is.

use std::mem;

use crate::linked::{Link, Node};

/// Preorder iterator over borrowed items. Created by [`Tree::iter`][crate::linked::Tree::iter].
///
/// The iterator borrows the tree so it can't be mutated while the walk is in progress.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is popped first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.data)
    }
}

/// Ascending iterator over borrowed items. Created by
/// [`Tree::inorder`][crate::linked::Tree::inorder].
pub struct Inorder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Inorder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut inorder = Self { stack: Vec::new() };
        inorder.push_left_spine(root);
        inorder
    }

    fn push_left_spine(&mut self, mut next: Option<&'a Node<T>>) {
        while let Some(node) = next {
            self.stack.push(node);
            next = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Inorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.data)
    }
}

/// Preorder iterator that takes the nodes apart as it goes, yielding owned items.
///
/// Dropping it part way through still frees the rest of the nodes one at a time.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.stack.extend(node.right.take());
        self.stack.extend(node.left.take());
        Some(node.data)
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

/// Reverse inorder walk (right, node, left) that also reports each node's depth, root being 0.
/// This is the order the tree is printed in when turned on its side.
pub(crate) struct Sideways<'a, T> {
    stack: Vec<(usize, &'a Node<T>)>,
}

impl<'a, T> Sideways<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut sideways = Self { stack: Vec::new() };
        sideways.push_right_spine(root, 0);
        sideways
    }

    fn push_right_spine(&mut self, mut next: Option<&'a Node<T>>, mut depth: usize) {
        while let Some(node) = next {
            self.stack.push((depth, node));
            next = node.right.as_deref();
            depth += 1;
        }
    }
}

impl<'a, T> Iterator for Sideways<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.push_right_spine(node.left.as_deref(), depth + 1);
        Some((depth, &node.data))
    }
}

/// Counts the levels below (and including) `root` one full level at a time. The current frontier
/// is drained into the next one until nothing is left.
pub(crate) fn count_levels<T>(root: Option<&Node<T>>) -> usize {
    let mut frontier: Vec<&Node<T>> = root.into_iter().collect();
    let mut next = Vec::new();
    let mut levels = 0;

    while !frontier.is_empty() {
        levels += 1;
        for node in frontier.drain(..) {
            next.extend(node.left.as_deref());
            next.extend(node.right.as_deref());
        }
        mem::swap(&mut frontier, &mut next);
    }

    levels
}
