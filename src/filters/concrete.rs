//! Immutable materialized Bloom filter.
//!
//! A [`ConcreteFilter`] is a bit vector produced by materializing a
//! [`Prototype`](crate::Prototype) under a [`Shape`]. It never changes after
//! construction: [`merge`](ConcreteFilter::merge) returns a new filter and
//! [`bits`](BloomFilter::bits) hands out a copy. Hamming weight and the log2
//! approximation are computed at most once and cached.
//!
//! # Examples
//!
//! ```
//! use protobloom::prelude::*;
//!
//! let shape = Shape::new(1000, 100).unwrap();
//! let a = PrototypeBuilder::new().update("a").build().materialize(&shape);
//! let b = PrototypeBuilder::new().update("b").build().materialize(&shape);
//!
//! let ab = a.merge(&b).unwrap();
//! assert!(a.matches(&ab).unwrap());
//! assert!(b.matches(&ab).unwrap());
//! assert_eq!(ab.hamming_weight(), a.bits().union(&b.bits()).unwrap().count_ones());
//! ```

use crate::core::bitvec::BitVec;
use crate::core::filter::{approximate_log2, BloomFilter};
use crate::core::shape::Shape;
use crate::error::Result;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// Immutable Bloom filter over a fixed-length bit vector.
///
/// Equality and hashing are structural over the bit vector.
#[derive(Clone)]
pub struct ConcreteFilter {
    bits: BitVec,
    weight: OnceLock<usize>,
    log2: OnceLock<f64>,
}

impl ConcreteFilter {
    /// Wrap a bit vector, for instance one restored from storage.
    #[must_use]
    pub fn from_bits(bits: BitVec) -> Self {
        Self {
            bits,
            weight: OnceLock::new(),
            log2: OnceLock::new(),
        }
    }

    /// A filter with no bits set, sized for `shape`.
    ///
    /// ```
    /// use protobloom::prelude::*;
    ///
    /// let shape = Shape::new(5, 5).unwrap();
    /// let empty = ConcreteFilter::empty(&shape);
    /// assert_eq!(empty.len(), 17);
    /// assert_eq!(empty.hamming_weight(), 0);
    /// ```
    #[must_use]
    pub fn empty(shape: &Shape) -> Self {
        Self::from_bits(BitVec::zeroed(shape.bit_count()))
    }

    /// Bitwise OR of `self` and `other`, as a new filter.
    ///
    /// `other` may be any filter variant; only its bits are read.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`](crate::ProtoBloomError::ShapeMismatch)
    /// if the bit lengths differ.
    pub fn merge(&self, other: &dyn BloomFilter) -> Result<Self> {
        Ok(Self::from_bits(self.bits.union(other.bit_vec())?))
    }
}

impl BloomFilter for ConcreteFilter {
    #[inline]
    fn bit_vec(&self) -> &BitVec {
        &self.bits
    }

    fn hamming_weight(&self) -> usize {
        *self.weight.get_or_init(|| self.bits.count_ones())
    }

    fn approximate_log2(&self) -> f64 {
        *self.log2.get_or_init(|| approximate_log2(&self.bits))
    }
}

impl PartialEq for ConcreteFilter {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for ConcreteFilter {}

impl Hash for ConcreteFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl fmt::Debug for ConcreteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcreteFilter")
            .field("len", &self.bits.len())
            .field("hamming_weight", &self.hamming_weight())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtoBloomError;
    use std::collections::hash_map::DefaultHasher;

    fn filter(len: usize, set: &[usize]) -> ConcreteFilter {
        let mut bits = BitVec::new(len).unwrap();
        for &i in set {
            bits.set(i);
        }
        ConcreteFilter::from_bits(bits)
    }

    fn hash_of(f: &ConcreteFilter) -> u64 {
        let mut h = DefaultHasher::new();
        f.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_match_is_subset() {
        let small = filter(17, &[1, 5]);
        let large = filter(17, &[1, 5, 9]);

        assert!(small.matches(&large).unwrap());
        assert!(!large.matches(&small).unwrap());
        assert!(large.inverse_matches(&small).unwrap());
        assert!(small.matches(&small).unwrap());
    }

    #[test]
    fn test_empty_matches_everything() {
        let shape = Shape::new(5, 5).unwrap();
        let empty = ConcreteFilter::empty(&shape);
        assert!(empty.matches(&filter(17, &[0, 16])).unwrap());
    }

    #[test]
    fn test_distance() {
        let a = filter(17, &[1, 2, 3]);
        let b = filter(17, &[3, 4]);
        assert_eq!(a.distance(&b).unwrap(), 3);
        assert_eq!(b.distance(&a).unwrap(), 3);
        assert_eq!(a.distance(&a).unwrap(), 0);
    }

    #[test]
    fn test_length_mismatch() {
        let a = filter(17, &[1]);
        let b = filter(18, &[1]);

        assert_eq!(
            a.matches(&b).unwrap_err(),
            ProtoBloomError::shape_mismatch(17, 18)
        );
        assert!(a.distance(&b).unwrap_err().is_shape_mismatch());
        assert!(a.merge(&b).unwrap_err().is_shape_mismatch());
    }

    #[test]
    fn test_merge_returns_new_instance() {
        let a = filter(17, &[1]);
        let b = filter(17, &[2]);
        let merged = a.merge(&b).unwrap();

        assert_eq!(merged, filter(17, &[1, 2]));
        assert_eq!(a, filter(17, &[1]), "receiver unchanged");
    }

    #[test]
    fn test_bits_is_a_copy() {
        let a = filter(17, &[1]);
        let mut copy = a.bits();
        copy.set(10);

        assert!(!a.bit_vec().get(10));
        assert_eq!(a.hamming_weight(), 1);
    }

    #[test]
    fn test_cached_values_stable() {
        let a = filter(200, &[0, 100, 150]);
        assert_eq!(a.hamming_weight(), 3);
        assert_eq!(a.hamming_weight(), 3);
        assert_eq!(a.approximate_log2(), 150.0);
        assert_eq!(a.approximate_log2(), approximate_log2(a.bit_vec()));
    }

    #[test]
    fn test_equality_and_hash_ignore_cache() {
        let a = filter(17, &[4]);
        let b = filter(17, &[4]);
        let _ = a.hamming_weight();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, filter(17, &[5]));
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", filter(17, &[1, 2]));
        assert!(debug.contains("len: 17"));
        assert!(debug.contains("hamming_weight: 2"));
    }
}
