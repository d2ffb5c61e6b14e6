use linked_bst::{Error, Tree};

use std::collections::{BTreeMap, BTreeSet};

use crate::Op;

/// Applies a set of operations to a tree and to a map counting each item.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same multiset of items in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, counts: &mut BTreeMap<T, usize>) -> bool
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                tree.add(x.clone());
                *counts.entry(x.clone()).or_default() += 1;
            }
            Op::Remove(x) => {
                let expected = match counts.get(x).copied() {
                    Some(1) => {
                        counts.remove(x);
                        Ok(x)
                    }
                    Some(count) => {
                        counts.insert(x.clone(), count - 1);
                        Ok(x)
                    }
                    None => Err(Error::ItemNotFound),
                };
                if tree.remove(x).as_ref() != expected.as_ref().map(|x| *x) {
                    return false;
                }
            }
            Op::Rebalance => {
                tree.rebalance();
            }
            Op::Clear => {
                tree.clear();
                counts.clear();
            }
        }
    }

    true
}

fn sorted<T: Ord + Clone>(counts: &BTreeMap<T, usize>) -> Vec<T> {
    counts
        .iter()
        .flat_map(|(x, count)| std::iter::repeat(x.clone()).take(*count))
        .collect()
}

fn tree_of(xs: &[i8]) -> Tree<i8> {
    xs.iter().copied().collect()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts)
        && tree.inorder().copied().collect::<Vec<_>>() == sorted(&counts)
        && tree.len() == tree.num_vert()
        && counts.keys().all(|x| tree.contains(x))
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let mut expected = xs;
    expected.sort_unstable();

    tree.inorder().copied().collect::<Vec<_>>() == expected
}

#[quickcheck]
fn preorder_visits_everything(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let mut visited: Vec<_> = tree.iter().copied().collect();
    visited.sort_unstable();

    visited == tree.inorder().copied().collect::<Vec<_>>() && visited.len() == xs.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none() && !tree.contains(x))
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    // Distinct keys so a single removal takes an item out entirely.
    let distinct: BTreeSet<_> = xs.into_iter().collect();
    let mut tree: Tree<_> = distinct.iter().copied().collect();
    for remove in &removes {
        let _ = tree.remove(remove);
    }

    removes.iter().all(|x| !tree.contains(x))
        && distinct
            .iter()
            .filter(|x| !removes.contains(x))
            .all(|x| tree.contains(x))
}

#[quickcheck]
fn rebalance_keeps_items(xs: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    let before: Vec<_> = tree.inorder().copied().collect();
    tree.rebalance();

    tree.inorder().copied().collect::<Vec<_>>() == before && tree.len() == xs.len()
}

#[quickcheck]
fn rebalance_never_grows_distinct_trees(xs: Vec<i8>) -> bool {
    let distinct: Vec<_> = {
        let mut seen = BTreeSet::new();
        xs.into_iter().filter(|x| seen.insert(*x)).collect()
    };
    let mut tree = tree_of(&distinct);
    let height = tree.height();

    tree.rebalance().height() <= height && (tree.is_empty() || tree.is_balanced())
}

#[quickcheck]
fn range_find_matches_filter(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree = tree_of(&xs);
    let mut expected: Vec<_> = xs.iter().filter(|x| low <= **x && **x <= high).collect();
    expected.sort_unstable();

    tree.range_find(&low, &high) == expected
}

#[quickcheck]
fn adjacent_items_are_neighbours(xs: Vec<i8>) -> bool {
    let distinct: BTreeSet<_> = xs.iter().copied().collect();
    let tree = tree_of(&xs);
    let items: Vec<_> = distinct.iter().collect();

    let adjacent = items
        .windows(2)
        .all(|w| tree.successor(w[0]) == Some(w[1]) && tree.predecessor(w[1]) == Some(w[0]));
    let ends = match (items.first(), items.last()) {
        (Some(min), Some(max)) => {
            tree.predecessor(min).is_none() && tree.successor(max).is_none()
        }
        _ => tree.successor(&0).is_none() && tree.predecessor(&0).is_none(),
    };

    adjacent && ends
}

#[quickcheck]
fn clone_is_equal(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let cloned = tree.clone();

    cloned == tree && cloned.height() == tree.height()
}

#[quickcheck]
fn clone_after_removals_keeps_shape(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();
    if !do_ops(&ops, &mut tree, &mut counts) {
        return false;
    }
    let cloned = tree.clone();

    cloned == tree && cloned.height() == tree.height() && cloned.to_string() == tree.to_string()
}
