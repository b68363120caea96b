//! 128-bit hash values and the bit positions they select.
//!
//! A [`HashValue`] is the pair of signed 64-bit lanes produced by the content
//! hash. Combined with a [`Shape`] it yields `k` bit indices by double
//! hashing:
//!
//! ```text
//! index_i = | (h1 + i·h2) rem m |      for i in 0..k
//! ```
//!
//! `rem` is the truncating remainder and the absolute value is taken after
//! it, with the sum wrapping on overflow. This must not be replaced by a
//! Euclidean modulus: the two disagree for negative sums and would set
//! different bits than filters built elsewhere.

use crate::core::bitvec::BitVec;
use crate::core::shape::Shape;
use crate::error::{ProtoBloomError, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable 128-bit hash value.
///
/// Ordered by `h1` then `h2`, both compared as signed integers.
///
/// # Examples
///
/// ```
/// use protobloom::{HashValue, Shape};
///
/// let shape = Shape::new(5, 5).unwrap();
/// let value = HashValue::new(-7, 3);
/// let positions: Vec<usize> = value.bit_positions(&shape).collect();
/// // (-7 rem 17) = -7 -> 7, (-4 rem 17) = -4 -> 4
/// assert_eq!(positions, vec![7, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HashValue {
    h1: i64,
    h2: i64,
}

impl HashValue {
    /// Create a hash value from its two lanes.
    #[must_use]
    #[inline]
    pub const fn new(h1: i64, h2: i64) -> Self {
        Self { h1, h2 }
    }

    /// First lane.
    #[must_use]
    #[inline]
    pub const fn h1(&self) -> i64 {
        self.h1
    }

    /// Second lane.
    #[must_use]
    #[inline]
    pub const fn h2(&self) -> i64 {
        self.h2
    }

    /// Iterate the `k` bit indices this value selects under `shape`.
    ///
    /// Every index is in `[0, shape.bit_count())`. Indices may repeat.
    #[must_use]
    pub fn bit_positions(&self, shape: &Shape) -> BitPositions {
        BitPositions {
            h1: self.h1,
            h2: self.h2,
            m: shape.bit_count() as i64,
            i: 0,
            k: shape.hash_function_count(),
        }
    }

    /// Set this value's bit positions under `shape` in `bits`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::CapacityExceeded`] if `bits` is shorter than
    /// `shape.bit_count()`.
    ///
    /// ```
    /// use protobloom::{core::BitVec, HashValue, Shape};
    ///
    /// let shape = Shape::new(5, 5).unwrap();
    /// let mut short = BitVec::new(8).unwrap();
    /// assert!(HashValue::new(1, 2).populate(&shape, &mut short).is_err());
    ///
    /// let mut bits = BitVec::new(shape.bit_count()).unwrap();
    /// HashValue::new(1, 2).populate(&shape, &mut bits).unwrap();
    /// assert!(bits.get(1) && bits.get(3));
    /// ```
    pub fn populate(&self, shape: &Shape, bits: &mut BitVec) -> Result<()> {
        if bits.len() < shape.bit_count() {
            return Err(ProtoBloomError::capacity_exceeded(
                bits.len(),
                shape.bit_count(),
            ));
        }

        for index in self.bit_positions(shape) {
            bits.set(index);
        }
        Ok(())
    }
}

impl From<(u64, u64)> for HashValue {
    /// Reinterpret two unsigned lanes, bit for bit.
    #[allow(clippy::cast_possible_wrap)]
    fn from((h1, h2): (u64, u64)) -> Self {
        Self::new(h1 as i64, h2 as i64)
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.h1, self.h2)
    }
}

/// Iterator over the bit indices of a [`HashValue`] under a [`Shape`].
#[derive(Debug, Clone)]
pub struct BitPositions {
    h1: i64,
    h2: i64,
    m: i64,
    i: usize,
    k: usize,
}

impl Iterator for BitPositions {
    type Item = usize;

    #[inline]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn next(&mut self) -> Option<usize> {
        if self.i >= self.k {
            return None;
        }

        let combined = self.h1.wrapping_add((self.i as i64).wrapping_mul(self.h2));
        self.i += 1;

        Some((combined % self.m).unsigned_abs() as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.k - self.i;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitPositions {}
