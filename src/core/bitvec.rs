//! Fixed-length bit vector backing every filter.
//!
//! `BitVec` packs bits into `u64` words in little-endian bit order. Filters
//! in this crate are immutable once returned to a caller, so the vector is
//! only written while a filter is being constructed and needs no atomics.
//!
//! # Memory Layout
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```
//!
//! Bits beyond `len` in the last word are always zero, so derived equality
//! and hashing over the word slice are structural.
//!
//! # Examples
//!
//! ```
//! use protobloom::core::bitvec::BitVec;
//!
//! let mut bv = BitVec::new(100).unwrap();
//! bv.set(42);
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 1);
//! ```

use crate::core::params::MAX_BIT_COUNT;
use crate::error::{ProtoBloomError, Result};

/// Fixed-length bit vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    blocks: Box<[u64]>,
    len: usize,
}

impl BitVec {
    /// Create a zeroed bit vector of `num_bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::InvalidArgument`] if `num_bits` is 0 or
    /// exceeds [`MAX_BIT_COUNT`].
    pub fn new(num_bits: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(ProtoBloomError::invalid_argument(
                "bit vector length must be greater than 0",
            ));
        }
        if num_bits > MAX_BIT_COUNT {
            return Err(ProtoBloomError::invalid_argument(format!(
                "bit vector length {} exceeds the maximum of {}",
                num_bits, MAX_BIT_COUNT
            )));
        }

        Ok(Self::zeroed(num_bits))
    }

    /// Zeroed vector for a length already known to be positive, such as a
    /// shape's bit count.
    pub(crate) fn zeroed(num_bits: usize) -> Self {
        debug_assert!(num_bits > 0);
        Self {
            blocks: vec![0u64; num_blocks_for(num_bits)].into_boxed_slice(),
            len: num_bits,
        }
    }

    /// Rebuild a bit vector from its raw words.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::InvalidData`] if `len` is 0 or exceeds
    /// [`MAX_BIT_COUNT`], if the word count does not match `len`, or if any
    /// bit at or beyond `len` is set.
    ///
    /// ```
    /// use protobloom::core::bitvec::BitVec;
    ///
    /// let bv = BitVec::from_raw(vec![0b101], 3).unwrap();
    /// assert!(bv.get(0) && !bv.get(1) && bv.get(2));
    /// assert!(BitVec::from_raw(vec![0b1000], 3).is_err());
    /// ```
    pub fn from_raw(raw: Vec<u64>, len: usize) -> Result<Self> {
        check_persisted_len(len)?;

        let expected = num_blocks_for(len);
        if raw.len() != expected {
            return Err(ProtoBloomError::invalid_data(format!(
                "{} bits need {} words, got {}",
                len,
                expected,
                raw.len()
            )));
        }

        let tail = len % 64;
        if tail != 0 && raw[expected - 1] >> tail != 0 {
            return Err(ProtoBloomError::invalid_data(format!(
                "bits set beyond length {}",
                len
            )));
        }

        Ok(Self {
            blocks: raw.into_boxed_slice(),
            len,
        })
    }

    /// Borrow the raw words.
    #[must_use]
    #[inline]
    pub fn as_words(&self) -> &[u64] {
        &self.blocks
    }

    /// Number of bits.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a successfully constructed vector.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of 64-bit words.
    #[must_use]
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Set bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );
        self.blocks[index / 64] |= 1u64 << (index % 64);
    }

    /// Read bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );
        self.blocks[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Bitwise OR of two equal-length vectors.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`] if the lengths differ.
    pub fn union(&self, other: &Self) -> Result<Self> {
        self.check_len(other)?;

        let blocks = self
            .blocks
            .iter()
            .zip(other.blocks.iter())
            .map(|(a, b)| a | b)
            .collect();

        Ok(Self {
            blocks,
            len: self.len,
        })
    }

    /// Number of positions at which two equal-length vectors differ.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`] if the lengths differ.
    pub fn xor_count(&self, other: &Self) -> Result<usize> {
        self.check_len(other)?;

        Ok(self
            .blocks
            .iter()
            .zip(other.blocks.iter())
            .map(|(a, b)| (a ^ b).count_ones() as usize)
            .sum())
    }

    /// Returns `true` if every bit set in `self` is also set in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::ShapeMismatch`] if the lengths differ.
    pub fn is_subset_of(&self, other: &Self) -> Result<bool> {
        self.check_len(other)?;

        Ok(self
            .blocks
            .iter()
            .zip(other.blocks.iter())
            .all(|(a, b)| a & b == *a))
    }

    /// Index of the highest set bit, if any.
    #[must_use]
    pub fn highest_set_bit(&self) -> Option<usize> {
        self.highest_set_bit_in(self.blocks.len())
    }

    /// Index of the highest set bit strictly below `index`, if any.
    ///
    /// ```
    /// use protobloom::core::bitvec::BitVec;
    ///
    /// let mut bv = BitVec::new(200).unwrap();
    /// bv.set(3);
    /// bv.set(130);
    /// assert_eq!(bv.previous_set_bit(130), Some(3));
    /// assert_eq!(bv.previous_set_bit(3), None);
    /// ```
    #[must_use]
    pub fn previous_set_bit(&self, index: usize) -> Option<usize> {
        let index = index.min(self.len);
        let word = index / 64;
        let offset = index % 64;

        if offset != 0 {
            let masked = self.blocks[word] & ((1u64 << offset) - 1);
            if masked != 0 {
                return Some(word * 64 + 63 - masked.leading_zeros() as usize);
            }
        }

        self.highest_set_bit_in(word)
    }

    /// Iterate the indices of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .flat_map(|(word_idx, &word)| SetBits { word }.map(move |bit| word_idx * 64 + bit))
    }

    /// Highest set bit among the first `words` words.
    fn highest_set_bit_in(&self, words: usize) -> Option<usize> {
        self.blocks[..words]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &w)| w != 0)
            .map(|(i, &w)| i * 64 + 63 - w.leading_zeros() as usize)
    }

    #[inline]
    fn check_len(&self, other: &Self) -> Result<()> {
        if self.len != other.len {
            return Err(ProtoBloomError::shape_mismatch(self.len, other.len));
        }
        Ok(())
    }
}

/// Validate a bit length read from persisted state.
///
/// Runs before any word count is derived from `len`.
pub(crate) fn check_persisted_len(len: usize) -> Result<()> {
    if len == 0 {
        return Err(ProtoBloomError::invalid_data(
            "bit vector length must be greater than 0",
        ));
    }
    if len > MAX_BIT_COUNT {
        return Err(ProtoBloomError::invalid_data(format!(
            "bit vector length {} exceeds the maximum of {}",
            len, MAX_BIT_COUNT
        )));
    }
    Ok(())
}

#[inline]
fn num_blocks_for(num_bits: usize) -> usize {
    (num_bits + 63) / 64
}

/// Iterator over set bit offsets within a single word.
struct SetBits {
    word: u64,
}

impl Iterator for SetBits {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let bit = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1;
        Some(bit)
    }
}
