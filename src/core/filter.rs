//! Capability trait shared by every materialized filter.
//!
//! Both [`ConcreteFilter`](crate::filters::ConcreteFilter) and
//! [`CountingFilter`](crate::filters::CountingFilter) expose a bit vector.
//! Everything that only needs the bits (subset matching, Hamming distance,
//! weight, logarithm) is defined here once, against `&dyn BloomFilter`, so
//! either variant can be passed wherever the other is expected. Counting
//! behavior lives only on `CountingFilter`.
//!
//! # Matching Semantics
//!
//! `a.matches(b)` is the forward "could contain" test: it is `true` when
//! every bit of `a` is also set in `b`. A filter built from a single item
//! therefore matches any filter that item was merged into.
//!
//! ```
//! use protobloom::prelude::*;
//!
//! let shape = Shape::new(5, 5).unwrap();
//! let hello = PrototypeBuilder::new().update("Hello").build().materialize(&shape);
//! let both = PrototypeBuilder::new().update("Hello").update("World").build().materialize(&shape);
//!
//! assert!(hello.matches(&both).unwrap());
//! assert!(both.inverse_matches(&hello).unwrap());
//! ```

use crate::core::bitvec::BitVec;
use crate::error::Result;

/// Number of set bits below the highest one that contribute to
/// [`BloomFilter::approximate_log2`].
pub const LOG_LOOKBACK_DEPTH: usize = 25;

/// Read-only view of a materialized filter's bit vector.
///
/// Implementations are immutable values and therefore `Send + Sync`.
pub trait BloomFilter: Send + Sync {
    /// Borrow the filter's bit vector.
    fn bit_vec(&self) -> &BitVec;

    /// Copy of the filter's bit vector.
    ///
    /// Mutating the returned vector never affects the filter.
    fn bits(&self) -> BitVec {
        self.bit_vec().clone()
    }

    /// Bit-vector length.
    fn len(&self) -> usize {
        self.bit_vec().len()
    }

    /// Always `false`; filters are never zero-length.
    fn is_empty(&self) -> bool {
        self.bit_vec().is_empty()
    }

    /// Number of set bits.
    fn hamming_weight(&self) -> usize {
        self.bit_vec().count_ones()
    }

    /// Returns `true` if every bit of `self` is also set in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`](crate::ProtoBloomError::ShapeMismatch)
    /// if the bit lengths differ.
    fn matches(&self, other: &dyn BloomFilter) -> Result<bool> {
        self.bit_vec().is_subset_of(other.bit_vec())
    }

    /// Returns `true` if every bit of `other` is also set in `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`](crate::ProtoBloomError::ShapeMismatch)
    /// if the bit lengths differ.
    fn inverse_matches(&self, other: &dyn BloomFilter) -> Result<bool> {
        other.bit_vec().is_subset_of(self.bit_vec())
    }

    /// Hamming weight of `self XOR other`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`](crate::ProtoBloomError::ShapeMismatch)
    /// if the bit lengths differ.
    fn distance(&self, other: &dyn BloomFilter) -> Result<usize> {
        self.bit_vec().xor_count(other.bit_vec())
    }

    /// Approximate base-2 logarithm of the bit vector read as an unsigned
    /// integer. See [`approximate_log2`].
    fn approximate_log2(&self) -> f64 {
        approximate_log2(self.bit_vec())
    }
}

/// Approximate `log2` of `bits` read as a little-endian unsigned integer.
///
/// The integer part is the index of the highest set bit `h`. Each lower set
/// bit `b` then adds `2^(b - h)`, walking down from `h` until either
/// [`LOG_LOOKBACK_DEPTH`] lower bits have been summed or the next set bit
/// lies more than `LOG_LOOKBACK_DEPTH` positions below `h`. Returns `0.0`
/// when no bit is set.
///
/// ```
/// use protobloom::core::bitvec::BitVec;
/// use protobloom::core::filter::approximate_log2;
///
/// let mut bits = BitVec::new(64).unwrap();
/// assert_eq!(approximate_log2(&bits), 0.0);
///
/// bits.set(3);
/// bits.set(1);
/// assert_eq!(approximate_log2(&bits), 3.25);
/// ```
#[must_use]
pub fn approximate_log2(bits: &BitVec) -> f64 {
    let Some(highest) = bits.highest_set_bit() else {
        return 0.0;
    };

    let mut result = highest as f64;
    let mut current = highest;

    // terms after the first LOG_LOOKBACK_DEPTH - 1 are below f64 resolution
    for _ in 1..LOG_LOOKBACK_DEPTH {
        match bits.previous_set_bit(current) {
            Some(next) if highest - next <= LOG_LOOKBACK_DEPTH => {
                result += 2.0_f64.powi(-((highest - next) as i32));
                current = next;
            }
            _ => break,
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_bits(len: usize, bits: &[usize]) -> BitVec {
        let mut bv = BitVec::new(len).unwrap();
        for &b in bits {
            bv.set(b);
        }
        bv
    }

    #[test]
    fn test_log_no_bits() {
        assert_eq!(approximate_log2(&BitVec::new(128).unwrap()), 0.0);
    }

    #[test]
    fn test_log_single_bit() {
        assert_eq!(approximate_log2(&with_bits(128, &[0])), 0.0);
        assert_eq!(approximate_log2(&with_bits(128, &[100])), 100.0);
    }

    #[test]
    fn test_log_adds_lower_bits() {
        // 0b1011 -> 3 + 2^-2 + 2^-3
        assert_eq!(approximate_log2(&with_bits(16, &[3, 1, 0])), 3.375);
    }

    #[test]
    fn test_log_truncates_beyond_depth() {
        // gap of exactly the depth is still counted
        let at_depth = approximate_log2(&with_bits(64, &[30, 5]));
        assert_eq!(at_depth, 30.0 + 2.0_f64.powi(-25));

        // one further is dropped
        let beyond = approximate_log2(&with_bits(64, &[30, 4]));
        assert_eq!(beyond, 30.0);
    }

    #[test]
    fn test_log_limits_term_count() {
        // 40 contiguous bits: only the top one plus 24 lower ones contribute
        let bits: Vec<usize> = (0..40).collect();
        let expected = 39.0 + (1..25).map(|d| 2.0_f64.powi(-d)).sum::<f64>();
        assert_eq!(approximate_log2(&with_bits(64, &bits)), expected);
    }

    #[test]
    fn test_log_across_words() {
        let log = approximate_log2(&with_bits(256, &[130, 129, 64]));
        assert_eq!(log, 130.5);
    }
}
