//! Counting Bloom filter with a sparse count map.
//!
//! A [`CountingFilter`] keeps, for every bit position that is set, the number
//! of times that position was hit. This allows the contribution of another
//! filter to be subtracted again with [`remove`](CountingFilter::remove).
//!
//! Like [`ConcreteFilter`], a counting filter is an immutable value: `merge`
//! and `remove` return new instances.
//!
//! # Bit-Pattern Operands
//!
//! `merge` and `remove` read only the *bits* of their operand. Each set bit
//! adds or subtracts exactly one occurrence, whether the operand is a
//! concrete filter or another counting filter.
//!
//! ```
//! use protobloom::prelude::*;
//!
//! let shape = Shape::new(1000, 100).unwrap();
//! let hello = PrototypeBuilder::new().update("Hello").build();
//! let world = PrototypeBuilder::new().update("World").build();
//!
//! let counting = hello.counting(&shape);
//! let both = counting.merge(&world.materialize(&shape)).unwrap();
//! let back = both.remove(&world.materialize(&shape)).unwrap();
//!
//! assert_eq!(back, counting);
//! assert_eq!(back.as_concrete(), &hello.materialize(&shape));
//! ```
//!
//! # Saturation
//!
//! Counts are `u32` and saturate at `u32::MAX`. A saturated position can no
//! longer be removed exactly.

use crate::core::bitvec::{self, BitVec};
use crate::core::filter::BloomFilter;
use crate::core::shape::Shape;
use crate::error::{ProtoBloomError, Result};
use crate::filters::concrete::ConcreteFilter;
use crate::filters::prototype::Prototype;
use std::collections::btree_map::{self, BTreeMap};
use std::hash::{Hash, Hasher};

/// Immutable counting filter.
///
/// Equality and hashing are structural over the bit length and count map.
#[derive(Debug, Clone)]
pub struct CountingFilter {
    counts: BTreeMap<usize, u32>,
    filter: ConcreteFilter,
}

impl CountingFilter {
    /// Count every bit position of every hash value in `prototype` under
    /// `shape`.
    ///
    /// Positions hit several times, including repeats within a single hash
    /// value's own positions, accumulate.
    #[must_use]
    pub fn create(prototype: &Prototype, shape: &Shape) -> Self {
        let mut counts = BTreeMap::new();
        for hash in prototype {
            for index in hash.bit_positions(shape) {
                increment(&mut counts, index);
            }
        }
        Self::from_map(shape.bit_count(), counts)
    }

    /// Rebuild a counting filter from persisted `(index, count)` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::InvalidData`] if `len` is 0 or exceeds
    /// [`MAX_BIT_COUNT`](crate::core::params::MAX_BIT_COUNT), if an index is
    /// out of range, if a count is 0, or if an index appears twice.
    ///
    /// ```
    /// use protobloom::prelude::*;
    ///
    /// let filter = CountingFilter::from_counts(17, [(3, 2), (8, 1)]).unwrap();
    /// assert_eq!(filter.count(3), 2);
    /// assert_eq!(filter.hamming_weight(), 2);
    ///
    /// assert!(CountingFilter::from_counts(17, [(17, 1)]).is_err());
    /// ```
    pub fn from_counts(
        len: usize,
        entries: impl IntoIterator<Item = (usize, u32)>,
    ) -> Result<Self> {
        bitvec::check_persisted_len(len)?;

        let mut counts = BTreeMap::new();
        for (index, count) in entries {
            if index >= len {
                return Err(ProtoBloomError::invalid_data(format!(
                    "count index {} out of range for {} bits",
                    index, len
                )));
            }
            if count == 0 {
                return Err(ProtoBloomError::invalid_data(format!(
                    "zero count at index {}",
                    index
                )));
            }
            if counts.insert(index, count).is_some() {
                return Err(ProtoBloomError::invalid_data(format!(
                    "duplicate count index {}",
                    index
                )));
            }
        }

        Ok(Self::from_map(len, counts))
    }

    fn from_map(len: usize, counts: BTreeMap<usize, u32>) -> Self {
        let mut bits = BitVec::zeroed(len);
        for &index in counts.keys() {
            bits.set(index);
        }
        Self {
            counts,
            filter: ConcreteFilter::from_bits(bits),
        }
    }

    /// Add one occurrence at every bit set in `other`.
    ///
    /// A position already at `u32::MAX` stays there, so a later
    /// [`remove`](Self::remove) of the same operand leaves it at
    /// `u32::MAX - 1` rather than restoring the original count.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`] if the bit lengths differ.
    pub fn merge(&self, other: &dyn BloomFilter) -> Result<Self> {
        self.check_len(other)?;

        let mut counts = self.counts.clone();
        for index in other.bit_vec().iter_ones() {
            increment(&mut counts, index);
        }
        Ok(Self::from_map(self.len(), counts))
    }

    /// Remove one occurrence at every bit set in `other`.
    ///
    /// Positions whose count reaches zero are dropped and their bit cleared.
    /// Positions with no recorded count are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`] if the bit lengths differ.
    pub fn remove(&self, other: &dyn BloomFilter) -> Result<Self> {
        self.check_len(other)?;

        let mut counts = self.counts.clone();
        for index in other.bit_vec().iter_ones() {
            match counts.get(&index).copied() {
                Some(count) if count > 1 => {
                    counts.insert(index, count - 1);
                }
                Some(_) => {
                    counts.remove(&index);
                }
                None => {
                    #[cfg(feature = "trace")]
                    tracing::debug!(index, "remove skipped position with no count");
                }
            }
        }
        Ok(Self::from_map(self.len(), counts))
    }

    /// Count recorded at `index`; 0 if the position is unset.
    #[must_use]
    pub fn count(&self, index: usize) -> u32 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Iterate `(index, count)` pairs in ascending index order.
    ///
    /// Every count yielded is positive.
    pub fn counts(&self) -> impl ExactSizeIterator<Item = (usize, u32)> + '_ {
        self.counts.iter().map(|(&index, &count)| (index, count))
    }

    /// Number of positions with a positive count.
    #[must_use]
    pub fn num_counts(&self) -> usize {
        self.counts.len()
    }

    /// The derived bit pattern as a plain filter.
    #[must_use]
    pub fn as_concrete(&self) -> &ConcreteFilter {
        &self.filter
    }

    fn check_len(&self, other: &dyn BloomFilter) -> Result<()> {
        if self.len() != other.len() {
            return Err(ProtoBloomError::shape_mismatch(self.len(), other.len()));
        }
        Ok(())
    }
}

/// Increment the count at `index`, saturating at `u32::MAX`.
fn increment(counts: &mut BTreeMap<usize, u32>, index: usize) {
    match counts.entry(index) {
        btree_map::Entry::Vacant(entry) => {
            entry.insert(1);
        }
        btree_map::Entry::Occupied(mut entry) => {
            let count = entry.get_mut();
            if *count == u32::MAX {
                #[cfg(feature = "trace")]
                tracing::warn!(index, "count saturated");
            } else {
                *count += 1;
            }
        }
    }
}

impl BloomFilter for CountingFilter {
    #[inline]
    fn bit_vec(&self) -> &BitVec {
        self.filter.bit_vec()
    }

    fn hamming_weight(&self) -> usize {
        self.counts.len()
    }

    fn approximate_log2(&self) -> f64 {
        self.filter.approximate_log2()
    }
}

impl From<CountingFilter> for ConcreteFilter {
    fn from(counting: CountingFilter) -> Self {
        counting.filter
    }
}

impl PartialEq for CountingFilter {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.counts == other.counts
    }
}

impl Eq for CountingFilter {}

impl Hash for CountingFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.counts.hash(state);
    }
}
