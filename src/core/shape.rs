//! Filter shape: the statistical target and the parameters derived from it.
//!
//! A [`Shape`] is built from an expected item count `n` and a false-positive
//! target of "1 in x". Its bit count `m` and hash-function count `k` are
//! derived once at construction and never change. Shapes are small `Copy`
//! values and can be shared freely between filters.
//!
//! # Record Format
//!
//! Only the two inputs are persisted. The derived fields are recomputed on
//! load so that a change to the derivation can never leave a stored shape
//! with inconsistent parameters.
//!
//! ```text
//! [item_count: u32 BE][probability: u32 BE]   (8 bytes)
//! ```

use crate::core::params::{expected_fp_rate, optimal_bit_count, optimal_hash_count};
use crate::error::{ProtoBloomError, Result};
use byteorder::{BigEndian, ByteOrder};

/// Length in bytes of a persisted shape record.
pub const SHAPE_RECORD_LEN: usize = 8;

/// Immutable filter shape.
///
/// # Examples
///
/// ```
/// use protobloom::Shape;
///
/// let shape = Shape::new(5, 5).unwrap();
/// assert_eq!(shape.bit_count(), 17);
/// assert_eq!(shape.hash_function_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    item_count: u32,
    probability: u32,
    bit_count: usize,
    hash_function_count: usize,
}

impl Shape {
    /// Derive a shape for `item_count` items at a false-positive rate of
    /// `1 / probability`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::InvalidArgument`] if either input is zero,
    /// if `probability` is 1, or if the derived bit count exceeds
    /// [`MAX_BIT_COUNT`](crate::core::params::MAX_BIT_COUNT).
    pub fn new(item_count: u32, probability: u32) -> Result<Self> {
        let bit_count = optimal_bit_count(item_count, probability)?;
        let hash_function_count = optimal_hash_count(bit_count, item_count)?;

        #[cfg(feature = "trace")]
        tracing::debug!(
            item_count,
            probability,
            bit_count,
            hash_function_count,
            "derived filter shape"
        );

        Ok(Self {
            item_count,
            probability,
            bit_count,
            hash_function_count,
        })
    }

    /// Expected number of items (`n`).
    #[must_use]
    #[inline]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    /// False-positive target denominator (`x` in "1 in x").
    #[must_use]
    #[inline]
    pub const fn probability(&self) -> u32 {
        self.probability
    }

    /// Bit-vector length (`m`).
    #[must_use]
    #[inline]
    pub const fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Number of bit positions derived per hash value (`k`).
    #[must_use]
    #[inline]
    pub const fn hash_function_count(&self) -> usize {
        self.hash_function_count
    }

    /// Theoretical false-positive rate once `item_count` items are stored.
    ///
    /// This is usually close to, but not exactly, `1 / probability` because
    /// both `m` and `k` are rounded to integers.
    ///
    /// ```
    /// use protobloom::Shape;
    ///
    /// let shape = Shape::new(1000, 100).unwrap();
    /// assert!((shape.false_positive_rate() - 0.01).abs() < 0.001);
    /// ```
    #[must_use]
    pub fn false_positive_rate(&self) -> f64 {
        expected_fp_rate(
            self.bit_count,
            self.item_count as usize,
            self.hash_function_count,
        )
    }

    /// Encode the shape as its 8-byte record.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SHAPE_RECORD_LEN] {
        let mut buf = [0u8; SHAPE_RECORD_LEN];
        BigEndian::write_u32(&mut buf[0..4], self.item_count);
        BigEndian::write_u32(&mut buf[4..8], self.probability);
        buf
    }

    /// Decode a shape from its 8-byte record, re-deriving `m` and `k`.
    ///
    /// # Errors
    ///
    /// - [`ProtoBloomError::InvalidData`] if `bytes` is not exactly 8 bytes
    /// - any error from [`Shape::new`] for the decoded inputs
    ///
    /// ```
    /// use protobloom::Shape;
    ///
    /// let shape = Shape::new(300, 1000).unwrap();
    /// let restored = Shape::from_bytes(&shape.to_bytes()).unwrap();
    /// assert_eq!(shape, restored);
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SHAPE_RECORD_LEN {
            return Err(ProtoBloomError::invalid_data(format!(
                "shape record must be {} bytes, got {}",
                SHAPE_RECORD_LEN,
                bytes.len()
            )));
        }

        let item_count = BigEndian::read_u32(&bytes[0..4]);
        let probability = BigEndian::read_u32(&bytes[4..8]);
        Self::new(item_count, probability)
    }
}
