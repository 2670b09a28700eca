//! A link-based BST. Every node owns its two children through a `Box` so the node graph is a
//! strict hierarchy rooted at the [`Tree`]. The tree never rebalances itself; insertion order
//! decides its shape until [`Tree::rebalance`] is called.
//!
//! # Examples
//!
//! ```
//! use linkedbst::linked::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//! assert_eq!(tree.height(), None);
//!
//! for x in 1..=7 {
//!     tree.add(x);
//! }
//! assert_eq!(tree.find(&4), Some(&4));
//!
//! // Sorted input gives a list-shaped tree.
//! assert_eq!(tree.height(), Some(6));
//! assert_eq!(tree.is_balanced(), Some(false));
//!
//! tree.rebalance();
//! assert_eq!(tree.height(), Some(2));
//! assert_eq!(tree.is_balanced(), Some(true));
//!
//! // Removing a node returns its item.
//! assert_eq!(tree.remove(&4), Ok(4));
//! assert!(tree.remove(&4).is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{TreeError, TreeResult};
use crate::traverse::{self, Inorder, IntoIter, Iter, Sideways};

/// An owning link to a child (or the root). `None` is an empty subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(data: T) -> Box<Self> {
        Box::new(Self {
            data,
            left: None,
            right: None,
        })
    }
}

/// A Binary Search Tree of ordered items.
///
/// Items smaller than a node's item live in its left subtree, everything else (including equal
/// items) lives in its right subtree.
///
/// The tree is a single-owner structure. It has no internal locking, so callers that share one
/// between threads must synchronize access themselves.
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
        drop(IntoIter::new(self.root.take()));
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of items in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Discards every item. The nodes are freed one at a time so even a list-shaped tree of any
    /// length can be cleared.
    pub fn clear(&mut self) {
        debug!(size = self.size, "clearing tree");
        drop(IntoIter::new(self.root.take()));
        self.size = 0;
    }

    /// Iterates over the items in preorder: a node, then its left subtree, then its right
    /// subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::linked::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    /// let items: Vec<_> = tree.iter().copied().collect();
    ///
    /// assert_eq!(items, vec![5, 3, 1, 4, 8]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root())
    }

    /// Iterates over the items in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::linked::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// let items: Vec<_> = tree.inorder().copied().collect();
    ///
    /// assert_eq!(items, vec![1, 3, 4, 5, 7, 8, 9]);
    /// ```
    pub fn inorder(&self) -> Inorder<'_, T> {
        Inorder::new(self.root())
    }

    /// Number of edges on the longest path from the root to a leaf, or `None` for an empty tree.
    /// A lone root has a height of 0.
    pub fn height(&self) -> Option<usize> {
        traverse::count_levels(self.root()).checked_sub(1)
    }

    /// A rough structural balance check: the tree is considered balanced when its height is below
    /// `2 * log2(n + 1) - 1` for `n` nodes. Returns `None` for an empty tree.
    ///
    /// This isn't a per-node AVL check; a tree can pass with some lopsided subtrees.
    pub fn is_balanced(&self) -> Option<bool> {
        let height = self.height()?;
        let count = self.iter().count();
        let bound = 2.0 * ((count + 1) as f64).log2() - 1.0;
        Some((height as f64) < bound)
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn into_root(mut self) -> Link<T> {
        self.root.take()
    }
}

#[cfg(test)]
impl Tree<usize> {
    /// `0..n` linked straight down the right side, as adding them in order would give, without
    /// the quadratic cost of adding them.
    pub(crate) fn right_list(n: usize) -> Self {
        let mut root = None;
        for data in (0..n).rev() {
            root = Some(Box::new(Node {
                data,
                left: None,
                right: root,
            }));
        }
        Self { root, size: n }
    }
}

impl<T: Ord> Tree<T> {
    /// Potentially finds the stored item equal to `item`. If no node holds an equal item, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T> {
        let mut next = self.root();
        while let Some(node) = next {
            match item.cmp(&node.data) {
                Ordering::Less => next = node.left.as_deref(),
                Ordering::Equal => return Some(&node.data),
                Ordering::Greater => next = node.right.as_deref(),
            }
        }
        None
    }

    /// Whether the tree holds an item equal to `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Adds `item` as a new leaf. Equal items are kept, not overwritten: a duplicate goes into the
    /// right subtree of the item it equals.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(2);
    /// tree.add(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&2, &2]);
    /// ```
    pub fn add(&mut self, item: T) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if item < node.data {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Swaps the stored item equal to `item` for `new_item` and returns the old one, or `None`
    /// if there is no such item. The shape of the tree doesn't change.
    ///
    /// **Caveat:** nothing checks that `new_item` belongs where `item` was. If it doesn't sort
    /// between the items around it, later searches can miss it (and other items). Use
    /// [`remove`][Self::remove] followed by [`add`][Self::add] to move an item.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::linked::Tree;
    ///
    /// let mut tree: Tree<_> = [(2, 'b'), (1, 'a')].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&(2, 'b'), (2, 'c')), Some((2, 'b')));
    /// assert_eq!(tree.find(&(2, 'c')), Some(&(2, 'c')));
    /// assert_eq!(tree.replace(&(3, 'x'), (3, 'y')), None);
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T> {
        let mut next = self.root.as_deref_mut();
        while let Some(node) = next {
            match item.cmp(&node.data) {
                Ordering::Less => next = node.left.as_deref_mut(),
                Ordering::Equal => return Some(mem::replace(&mut node.data, new_item)),
                Ordering::Greater => next = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// Removes the node holding an item equal to `item` and returns that item.
    ///
    /// A node with two children keeps its place in the tree and takes the largest item of its
    /// left subtree; the node that held that item is unlinked instead.
    ///
    /// # Errors
    ///
    /// [`TreeError::ItemAbsent`] if no node holds an equal item. The tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::error::TreeError;
    /// use linkedbst::linked::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(TreeError::ItemAbsent));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> TreeResult<T> {
        // The root link stands in for the child link of a parent above the root, so removing
        // the root is no different from removing any other node.
        let link = find_link(&mut self.root, item).ok_or(TreeError::ItemAbsent)?;
        let mut node = link.take().ok_or(TreeError::ItemAbsent)?;

        let removed = if node.right.is_some() {
            match take_max(&mut node.left) {
                Some(max) => {
                    trace!("removing node with two children");
                    let removed = mem::replace(&mut node.data, max);
                    *link = Some(node);
                    removed
                }
                None => {
                    trace!("removing node with only a right child");
                    *link = node.right.take();
                    node.data
                }
            }
        } else {
            trace!("removing node with at most a left child");
            *link = node.left.take();
            node.data
        };

        self.size -= 1;
        Ok(removed)
    }

    /// Every item `x` with `low <= x <= high`, in ascending order. Subtrees that can't hold such
    /// an item aren't visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::linked::Tree;
    ///
    /// let tree: Tree<_> = [8, 3, 10, 1, 6, 14, 4, 7].into_iter().collect();
    ///
    /// assert_eq!(tree.range_find(&4, &8), vec![&4, &6, &7, &8]);
    /// assert!(tree.range_find(&11, &13).is_empty());
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T> {
        let mut found = Vec::new();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = stack.pop() {
            if node.data > *high {
                stack.extend(node.left.as_deref());
            } else if node.data < *low {
                stack.extend(node.right.as_deref());
            } else {
                stack.extend(node.left.as_deref());
                stack.extend(node.right.as_deref());
                found.push(&node.data);
            }
        }

        // The pruned walk isn't in order.
        found.sort();
        found
    }

    /// The smallest item strictly greater than `item`, or `None` if there isn't one. `item`
    /// needn't be in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::linked::Tree;
    ///
    /// let tree: Tree<_> = [5, 1, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Some(&9));
    /// assert_eq!(tree.successor(&6), Some(&9));
    /// assert_eq!(tree.successor(&9), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T> {
        let mut candidate = None;
        let mut next = self.root();
        while let Some(node) = next {
            if node.data > *item {
                candidate = Some(&node.data);
                next = node.left.as_deref();
            } else {
                next = node.right.as_deref();
            }
        }
        candidate
    }

    /// The largest item strictly less than `item`, or `None` if there isn't one. `item` needn't
    /// be in the tree.
    pub fn predecessor(&self, item: &T) -> Option<&T> {
        let mut candidate = None;
        let mut next = self.root();
        while let Some(node) = next {
            if node.data < *item {
                candidate = Some(&node.data);
                next = node.right.as_deref();
            } else {
                next = node.left.as_deref();
            }
        }
        candidate
    }

    /// Rebuilds the tree with the smallest possible height for its size.
    ///
    /// The items are taken out and sorted, then added back middle first: the middle of the
    /// whole run, then the middles of the two halves either side of it, and so on one level at a
    /// time until every item is back.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkedbst::linked::Tree;
    ///
    /// let mut tree: Tree<_> = (0..15).collect();
    /// assert_eq!(tree.height(), Some(14));
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), Some(3));
    /// assert_eq!(tree.inorder().count(), 15);
    /// ```
    pub fn rebalance(&mut self) {
        debug!(size = self.size, height = ?self.height(), "rebalancing tree");

        let mut sorted: Vec<T> = IntoIter::new(self.root.take()).collect();
        self.size = 0;
        sorted.sort();

        let mut items: Vec<Option<T>> = sorted.into_iter().map(Some).collect();
        let mut ranges = vec![(0, items.len())];
        let mut next_ranges = Vec::new();

        while !ranges.is_empty() {
            for (start, end) in ranges.drain(..) {
                if start >= end {
                    continue;
                }
                let mid = start + (end - start) / 2;
                if let Some(item) = items[mid].take() {
                    self.add(item);
                }
                next_ranges.push((start, mid));
                next_ranges.push((mid + 1, end));
            }
            mem::swap(&mut ranges, &mut next_ranges);
        }

        debug!(size = self.size, height = ?self.height(), "rebalanced tree");
    }
}

/// Finds the link that owns the node holding `item`, following the same path as
/// [`Tree::find`].
fn find_link<'a, T: Ord>(mut link: &'a mut Link<T>, item: &T) -> Option<&'a mut Link<T>> {
    loop {
        let ordering = item.cmp(&link.as_deref()?.data);
        if ordering == Ordering::Equal {
            return Some(link);
        }
        let node = link.as_mut()?;
        link = match ordering {
            Ordering::Less => &mut node.left,
            _ => &mut node.right,
        };
    }
}

/// Unlinks the rightmost node below `link` and returns its item. The unlinked node has no right
/// child so its left subtree takes its place.
fn take_max<T>(mut link: &mut Link<T>) -> Option<T> {
    while link.as_deref()?.right.is_some() {
        let node = link.as_mut()?;
        link = &mut node.right;
    }
    let max = link.take()?;
    let Node { data, left, .. } = *max;
    *link = left;
    Some(data)
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    /// Adds each item in turn, exactly as repeated calls to [`Tree::add`] would.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Takes the tree apart in preorder.
    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take())
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inorder()).finish()
    }
}

/// Draws the tree on its side, rotated 90 degrees counter-clockwise: the root is in the left
/// column, right subtrees are above their parent and left subtrees below.
///
/// ```
/// use linkedbst::linked::Tree;
///
/// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
///
/// assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");
/// ```
impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, item) in Sideways::new(self.root()) {
            writeln!(f, "{}{}", "| ".repeat(depth), item)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a sorted `Vec`.
    /// This way we can ensure that after a random smattering of adds,
    /// removes and rebalances we hold the same items as the model.
    fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, model: &mut Vec<T>)
    where
        T: Ord + Clone + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Add(x) => {
                    tree.add(x.clone());
                    let pos = model.partition_point(|y| y <= x);
                    model.insert(pos, x.clone());
                }
                Op::Remove(x) => match model.binary_search(x) {
                    Ok(pos) => {
                        model.remove(pos);
                        assert_eq!(tree.remove(x).as_ref(), Ok(x));
                    }
                    Err(_) => assert_eq!(tree.remove(x), Err(TreeError::ItemAbsent)),
                },
                Op::Rebalance => tree.rebalance(),
                Op::Iter => {
                    assert!(tree.inorder().eq(model.iter()));
                    assert_eq!(tree.iter().count(), model.len());
                }
            }
            assert_eq!(tree.len(), model.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = Vec::new();

            do_ops(&ops, &mut tree, &mut model);
            tree.inorder().eq(model.iter())
                && model.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn order_holds_for_distinct_items(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            for op in ops {
                match op {
                    Op::Add(x) if !tree.contains(&x) => tree.add(x),
                    Op::Remove(x) if tree.contains(&x) => {
                        let _ = tree.remove(&x);
                    }
                    Op::Rebalance => tree.rebalance(),
                    _ => {}
                }
                super::tests::assert_invariants(&tree);
            }
            true
        }
    }

    quickcheck::quickcheck! {
        fn rebalance_keeps_content(xs: Vec<i16>) -> bool {
            let mut tree: Tree<_> = xs.iter().copied().collect();
            let before: Vec<_> = tree.inorder().copied().collect();
            tree.rebalance();

            tree.inorder().copied().eq(before) && tree.len() == xs.len()
        }
    }

    quickcheck::quickcheck! {
        fn neighbors_match_model(xs: Vec<i8>, probe: i8) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();
            let succ = xs.iter().filter(|&&x| x > probe).min();
            let pred = xs.iter().filter(|&&x| x < probe).max();

            tree.successor(&probe) == succ && tree.predecessor(&probe) == pred
        }
    }

    quickcheck::quickcheck! {
        fn range_matches_model(xs: Vec<i8>, low: i8, high: i8) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();
            let mut expected: Vec<_> = xs.iter().filter(|&&x| low <= x && x <= high).collect();
            expected.sort();

            tree.range_find(&low, &high) == expected
        }
    }
}
