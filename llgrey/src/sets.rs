#![deny(warnings)]

//! Small helpers over ordered sets, mostly sets of terminal ids.

use crate::grammar::SymbolId;
use std::collections::BTreeSet;

pub type SymbolSet = BTreeSet<SymbolId>;

pub fn union<T: Ord + Clone>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> BTreeSet<T> {
    a.union(b).cloned().collect()
}

/// Add `other` into `target`, returns whether `target` grew.
pub fn union_into<T: Ord + Clone>(target: &mut BTreeSet<T>, other: &BTreeSet<T>) -> bool {
    let before = target.len();
    target.extend(other.iter().cloned());
    target.len() > before
}

pub fn contains<T: Ord>(set: &BTreeSet<T>, item: &T) -> bool {
    set.contains(item)
}

/// Sum of the sizes of all sets, used as a fixed-point progress measure.
pub fn cardinality<'a, T: Ord + 'a>(sets: impl IntoIterator<Item=&'a BTreeSet<T>>) -> usize {
    sets.into_iter().map(|s| s.len()).sum()
}
