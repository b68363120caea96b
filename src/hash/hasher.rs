//! Content hasher trait for building prototypes.
//!
//! A [`ContentHasher`] turns a byte slice into a 128-bit [`HashValue`].
//! Hashers operate on `&[u8]` rather than `T: Hash` so the caller decides how
//! values are serialized; two processes that serialize the same way and use
//! the same hasher produce comparable prototypes.
//!
//! # Examples
//!
//! ```
//! use protobloom::hash::{ContentHasher, Murmur3Hasher};
//!
//! let hasher = Murmur3Hasher::new();
//! let a = hasher.hash_value(b"hello");
//! let b = hasher.hash_value(b"hello");
//! assert_eq!(a, b);
//! ```

#![allow(clippy::module_name_repetitions)]

use super::murmur3::murmur3_x64_128;
use super::value::HashValue;

/// Hash function producing the 128-bit values stored in a prototype.
///
/// # Requirements
///
/// Implementations must be deterministic across processes and platforms:
/// the same bytes must always yield the same [`HashValue`]. They must also be
/// `Send + Sync` so builders can move between threads.
pub trait ContentHasher: Send + Sync {
    /// Hash `bytes` to a 128-bit value.
    fn hash_value(&self, bytes: &[u8]) -> HashValue;

    /// Human-readable name for debugging.
    fn name(&self) -> &'static str;
}

/// MurmurHash3 x64 128-bit hasher.
///
/// The default hasher. With the default seed of `0` its output matches the
/// reference MurmurHash3_x64_128 implementation bit for bit.
///
/// # Examples
///
/// ```
/// use protobloom::hash::{ContentHasher, Murmur3Hasher};
///
/// let unseeded = Murmur3Hasher::new();
/// let seeded = Murmur3Hasher::with_seed(42);
/// assert_ne!(unseeded.hash_value(b"test"), seeded.hash_value(b"test"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Murmur3Hasher {
    seed: u64,
}

impl Murmur3Hasher {
    /// Create a hasher with seed `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self { seed: 0 }
    }

    /// Create a hasher with an explicit seed.
    ///
    /// Prototypes built with different seeds are not comparable.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// The seed this hasher was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl ContentHasher for Murmur3Hasher {
    #[inline]
    fn hash_value(&self, bytes: &[u8]) -> HashValue {
        HashValue::from(murmur3_x64_128(bytes, self.seed))
    }

    #[inline]
    fn name(&self) -> &'static str {
        "Murmur3_x64_128"
    }
}
