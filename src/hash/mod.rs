//! Content hashing for prototypes.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── murmur3.rs  - MurmurHash3 x64 128-bit
//! ├── value.rs    - HashValue and its bit positions under a Shape
//! ├── hasher.rs   - ContentHasher trait and Murmur3Hasher
//! └── mod.rs      - This file (public API)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use protobloom::hash;
//!
//! let value = hash::hash(b"Hello", 0);
//! assert_eq!(value, hash::hash(b"Hello", 0));
//! ```
//!
//! # Bit Positions
//!
//! A [`HashValue`] selects `k` positions in an `m`-bit vector by double
//! hashing, `|(h1 + i·h2) rem m|` for `i` in `0..k`. See [`value`] for the
//! exact arithmetic.

pub mod hasher;
pub mod murmur3;
pub mod value;

pub use hasher::{ContentHasher, Murmur3Hasher};
pub use murmur3::murmur3_x64_128;
pub use value::{BitPositions, HashValue};

/// Hash `bytes` with MurmurHash3 x64 128-bit under `seed`.
///
/// Equivalent to `Murmur3Hasher::with_seed(seed).hash_value(bytes)`.
///
/// # Examples
///
/// ```
/// use protobloom::hash::{hash, HashValue};
///
/// // the empty input still yields a usable value
/// assert_eq!(hash(&[], 0), HashValue::new(0, 0));
/// ```
#[must_use]
#[inline]
pub fn hash(bytes: &[u8], seed: u64) -> HashValue {
    HashValue::from(murmur3_x64_128(bytes, seed))
}
