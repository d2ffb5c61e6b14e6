#[macro_use(quickcheck)]
extern crate quickcheck_macros;

use quickcheck::{Arbitrary, Gen};

mod tree;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Add the item to the tree
    Add(T),
    /// Remove an item equal to this one from the tree
    Remove(T),
    /// Rebuild the tree with minimal height
    Rebalance,
    /// Empty the tree
    Clear,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Clearing is rare so trees get a
    /// chance to grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 20 {
            0..=9 => Op::Add(T::arbitrary(g)),
            10..=16 => Op::Remove(T::arbitrary(g)),
            17 | 18 => Op::Rebalance,
            _ => Op::Clear,
        }
    }
}
