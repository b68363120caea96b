//! Shape-independent set of content hashes.
//!
//! A [`Prototype`] records *which* items a filter represents without
//! committing to a bit-vector size. The same prototype can be materialized
//! under any number of [`Shape`]s, and prototypes from different sources can
//! be unioned before materialization without rehashing.
//!
//! # Ordering
//!
//! Hash values are kept in ascending order. Equality is set equality;
//! comparison is lexicographic over the ordered values, so a prototype whose
//! values are a strict prefix of another's sorts first.
//!
//! ```
//! use protobloom::{HashValue, Prototype};
//!
//! let short = Prototype::new([HashValue::new(1, 0)]);
//! let long = Prototype::new([HashValue::new(2, 0), HashValue::new(1, 0)]);
//! assert!(short < long);
//! ```

use crate::core::bitvec::BitVec;
use crate::core::shape::Shape;
use crate::filters::concrete::ConcreteFilter;
use crate::filters::counting::CountingFilter;
use crate::hash::HashValue;
use std::collections::btree_set;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable ordered set of [`HashValue`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Prototype {
    hashes: BTreeSet<HashValue>,
}

impl Prototype {
    /// Create a prototype owning a copy of `hashes`.
    ///
    /// Duplicate values collapse.
    #[must_use]
    pub fn new(hashes: impl IntoIterator<Item = HashValue>) -> Self {
        Self::from_set(hashes.into_iter().collect())
    }

    /// Prototype of a single hash value.
    #[must_use]
    pub fn from_hash(hash: HashValue) -> Self {
        Self::new([hash])
    }

    pub(crate) fn from_set(hashes: BTreeSet<HashValue>) -> Self {
        Self { hashes }
    }

    /// Set union of two prototypes.
    ///
    /// ```
    /// use protobloom::{HashValue, Prototype};
    ///
    /// let a = Prototype::from_hash(HashValue::new(1, 1));
    /// let b = Prototype::from_hash(HashValue::new(2, 2));
    /// assert_eq!(a.merge(&b).len(), 2);
    /// assert_eq!(a.merge(&a), a);
    /// ```
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self::from_set(self.hashes.union(&other.hashes).copied().collect())
    }

    /// Number of distinct hash values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Returns `true` if the prototype holds no hash values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Iterate hash values in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, HashValue> {
        self.hashes.iter()
    }

    /// Returns `true` if `hash` is a member.
    #[must_use]
    pub fn contains(&self, hash: &HashValue) -> bool {
        self.hashes.contains(hash)
    }

    /// Set every hash value's bit positions under `shape` in a fresh
    /// zero-filled vector of `shape.bit_count()` bits.
    ///
    /// ```
    /// use protobloom::prelude::*;
    ///
    /// let shape = Shape::new(5, 5).unwrap();
    /// let filter = Prototype::new([HashValue::new(20, 5)]).materialize(&shape);
    /// assert_eq!(filter.len(), 17);
    /// assert_eq!(filter.bits().iter_ones().collect::<Vec<_>>(), vec![3, 8]);
    /// ```
    #[must_use]
    pub fn materialize(&self, shape: &Shape) -> ConcreteFilter {
        let mut bits = BitVec::zeroed(shape.bit_count());
        for hash in &self.hashes {
            for index in hash.bit_positions(shape) {
                bits.set(index);
            }
        }
        ConcreteFilter::from_bits(bits)
    }

    /// Build a counting filter from this prototype under `shape`.
    ///
    /// Equivalent to [`CountingFilter::create`].
    #[must_use]
    pub fn counting(&self, shape: &Shape) -> CountingFilter {
        CountingFilter::create(self, shape)
    }
}

impl<'a> IntoIterator for &'a Prototype {
    type Item = &'a HashValue;
    type IntoIter = btree_set::Iter<'a, HashValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<HashValue> for Prototype {
    fn from_iter<I: IntoIterator<Item = HashValue>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::BloomFilter;

    fn shape() -> Shape {
        Shape::new(5, 5).unwrap()
    }

    #[test]
    fn test_new_copies_and_dedups() {
        let mut source = vec![HashValue::new(3, 0), HashValue::new(1, 0), HashValue::new(3, 0)];
        let prototype = Prototype::new(source.clone());
        source.clear();

        assert_eq!(prototype.len(), 2);
        let ordered: Vec<_> = prototype.iter().copied().collect();
        assert_eq!(ordered, vec![HashValue::new(1, 0), HashValue::new(3, 0)]);
    }

    #[test]
    fn test_equality_is_order_independent() {
        let a = Prototype::new([HashValue::new(1, 1), HashValue::new(2, 2)]);
        let b = Prototype::new([HashValue::new(2, 2), HashValue::new(1, 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_lexicographic_comparison() {
        let a = Prototype::new([HashValue::new(1, 0), HashValue::new(5, 0)]);
        let b = Prototype::new([HashValue::new(2, 0)]);
        assert!(a < b, "first element decides");

        let prefix = Prototype::new([HashValue::new(1, 0)]);
        assert!(prefix < a, "strict prefix sorts first");

        assert!(Prototype::default() < prefix);
    }

    #[test]
    fn test_merge_is_union() {
        let a = Prototype::new([HashValue::new(1, 0), HashValue::new(2, 0)]);
        let b = Prototype::new([HashValue::new(2, 0), HashValue::new(3, 0)]);
        let merged = a.merge(&b);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged, b.merge(&a));
        assert!(merged.contains(&HashValue::new(3, 0)));
    }

    #[test]
    fn test_materialize_empty_prototype() {
        let filter = Prototype::default().materialize(&shape());
        assert_eq!(filter.len(), 17);
        assert_eq!(filter.hamming_weight(), 0);
    }

    #[test]
    fn test_materialize_sets_positions() {
        let hash = HashValue::new(-20, 5);
        let filter = Prototype::from_hash(hash).materialize(&shape());
        let expected: Vec<usize> = {
            let mut v: Vec<usize> = hash.bit_positions(&shape()).collect();
            v.sort_unstable();
            v.dedup();
            v
        };
        assert_eq!(filter.bits().iter_ones().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_materialize_union_of_members() {
        let a = Prototype::from_hash(HashValue::new(20, 5));
        let b = Prototype::from_hash(HashValue::new(7, 1));
        let merged = a.merge(&b).materialize(&shape());
        let unioned = a.materialize(&shape()).merge(&b.materialize(&shape())).unwrap();
        assert_eq!(merged, unioned);
    }

    #[test]
    fn test_collect() {
        let prototype: Prototype = (0..4).map(|i| HashValue::new(i, i)).collect();
        assert_eq!(prototype.len(), 4);
        assert_eq!((&prototype).into_iter().count(), 4);
    }
}
