use linkedbst::error::TreeError;
use linkedbst::linked::Tree;

use std::collections::HashSet;

fn build(xs: &[i32]) -> Tree<i32> {
    xs.iter().copied().collect()
}

fn sorted(tree: &Tree<i32>) -> Vec<i32> {
    tree.inorder().copied().collect()
}

#[test]
fn round_trip() {
    let tree = build(&[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(sorted(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.iter().count(), tree.len());
}

#[test]
fn deletion() {
    let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(tree.remove(&5), Ok(5));
    assert_eq!(tree.len(), 6);
    assert!(!tree.contains(&5));
    assert_eq!(sorted(&tree), vec![1, 3, 4, 7, 8, 9]);

    let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(tree.remove(&9), Ok(9));
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 3, 1, 4, 8, 7]);

    let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(tree.remove(&10), Err(TreeError::ItemAbsent));
    assert_eq!(tree.len(), 7);
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![5, 3, 1, 4, 8, 7, 9]
    );
}

#[test]
fn remove_error_message() {
    let mut tree = build(&[1]);
    let err = tree.remove(&2).unwrap_err();
    assert_eq!(err.to_string(), "item not in tree");
}

#[test]
fn range() {
    let tree: Tree<_> = (1..=20).collect();
    assert_eq!(tree.range_find(&5, &10), vec![&5, &6, &7, &8, &9, &10]);
}

#[test]
fn neighbors() {
    let tree = build(&[1, 3, 5, 7, 9]);
    assert_eq!(tree.successor(&5), Some(&7));
    assert_eq!(tree.predecessor(&5), Some(&3));
    assert_eq!(tree.successor(&9), None);
    assert_eq!(tree.predecessor(&1), None);
}

#[test]
fn balance_heuristic() {
    let mut tree: Tree<_> = (0..8).collect();
    assert_eq!(tree.height(), Some(7));
    assert_eq!(tree.is_balanced(), Some(false));

    let before = sorted(&tree);
    tree.rebalance();
    assert_eq!(tree.is_balanced(), Some(true));
    assert_eq!(tree.height(), Some(3));
    assert_eq!(sorted(&tree), before);
}

#[test]
fn empty_signals() {
    let tree: Tree<i32> = Tree::default();
    assert_eq!(tree.height(), None);
    assert_eq!(tree.is_balanced(), None);
}

#[test]
fn strings() {
    let mut tree: Tree<String> = ["pear", "apple", "fig", "kiwi"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(tree.find(&"fig".to_string()).map(String::as_str), Some("fig"));

    tree.rebalance();
    let words: Vec<_> = tree.inorder().map(String::as_str).collect();
    assert_eq!(words, vec!["apple", "fig", "kiwi", "pear"]);
}

#[test]
fn extend_and_into_iter() {
    let mut tree = build(&[2]);
    tree.extend([1, 3]);
    assert_eq!(tree.len(), 3);

    let mut items: Vec<_> = tree.into_iter().collect();
    items.sort();
    assert_eq!(items, vec![1, 2, 3]);
}

/// Rebalanced height is never above `ceil(log2(n + 1))`.
fn height_bound(n: usize) -> usize {
    ((n + 1) as f64).log2().ceil() as usize
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        xs.iter().all(|x| tree.find(x) == Some(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x).is_none())
    }
}

quickcheck::quickcheck! {
    fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let mut still_present = xs;
        for remove in &removes {
            // We may have added the same value multiple times - remove each one.
            while tree.remove(remove).is_ok() {}
            still_present.retain(|x| x != remove);
        }

        removes.iter().all(|x| tree.find(x).is_none())
            && still_present.iter().all(|x| tree.find(x).is_some())
            && tree.len() == still_present.len()
    }
}

quickcheck::quickcheck! {
    fn rebalance_is_minimal(xs: HashSet<i16>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let before: Vec<_> = tree.inorder().copied().collect();
        tree.rebalance();

        let height_ok = tree.height().map_or(xs.is_empty(), |h| h <= height_bound(xs.len()));
        height_ok && tree.inorder().copied().eq(before) && tree.len() == xs.len()
    }
}

quickcheck::quickcheck! {
    fn find_is_read_only(xs: Vec<i8>, probes: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let before: Vec<_> = tree.iter().copied().collect();
        for probe in &probes {
            let _ = tree.find(probe);
        }

        tree.iter().copied().eq(before) && tree.len() == xs.len()
    }
}
