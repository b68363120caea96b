//! Accumulating builder for prototypes.
//!
//! A [`PrototypeBuilder`] hashes each item as it is added and keeps the
//! resulting [`HashValue`]s in an ordered set. [`PrototypeBuilder::build`]
//! snapshots the set into a [`Prototype`] and leaves the builder empty, so a
//! single builder can produce a sequence of independent prototypes.
//!
//! # Examples
//!
//! ```
//! use protobloom::builder::PrototypeBuilder;
//!
//! let mut builder = PrototypeBuilder::new();
//! let first = builder.update("Hello").build();
//! let second = builder.update("World").build();
//!
//! assert_eq!(first.len(), 1);
//! assert_eq!(second.len(), 1);
//! assert_ne!(first, second);
//! ```
//!
//! ## Folding in a prebuilt prototype
//!
//! ```
//! use protobloom::builder::PrototypeBuilder;
//!
//! let world = PrototypeBuilder::new().update("World").build();
//! let both = PrototypeBuilder::new()
//!     .update("Hello")
//!     .update_prototype(&world)
//!     .build();
//!
//! assert_eq!(both.len(), 2);
//! ```

use crate::filters::prototype::Prototype;
use crate::hash::{ContentHasher, HashValue, Murmur3Hasher};
use std::collections::BTreeSet;

/// Accumulator of content hashes.
///
/// # Type Parameters
///
/// - `H`: content hasher (defaults to [`Murmur3Hasher`] with seed 0)
#[derive(Debug, Clone)]
pub struct PrototypeBuilder<H = Murmur3Hasher> {
    hasher: H,
    hashes: BTreeSet<HashValue>,
}

impl PrototypeBuilder<Murmur3Hasher> {
    /// Create a builder hashing with MurmurHash3 under seed 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(Murmur3Hasher::new())
    }

    /// Create a builder hashing with MurmurHash3 under `seed`.
    ///
    /// Prototypes are only comparable when built with the same seed.
    ///
    /// ```
    /// use protobloom::builder::PrototypeBuilder;
    ///
    /// let a = PrototypeBuilder::with_seed(1).update("x").build();
    /// let b = PrototypeBuilder::with_seed(2).update("x").build();
    /// assert_ne!(a, b);
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_hasher(Murmur3Hasher::with_seed(seed))
    }
}

impl<H: ContentHasher> PrototypeBuilder<H> {
    /// Create a builder using a custom hasher.
    #[must_use]
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            hashes: BTreeSet::new(),
        }
    }

    /// Hash `bytes` and add the result.
    ///
    /// Adding the same bytes twice has no further effect.
    pub fn update(&mut self, bytes: impl AsRef<[u8]>) -> &mut Self {
        let value = self.hasher.hash_value(bytes.as_ref());
        self.hashes.insert(value);
        self
    }

    /// Hash the little-endian encoding of `value` and add the result.
    pub fn update_u64(&mut self, value: u64) -> &mut Self {
        self.update(value.to_le_bytes())
    }

    /// Add every hash value of `prototype` without rehashing.
    pub fn update_prototype(&mut self, prototype: &Prototype) -> &mut Self {
        self.hashes.extend(prototype.iter().copied());
        self
    }

    /// Number of distinct hash values accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Returns `true` if nothing has been accumulated since the last build.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// The hasher this builder uses.
    #[must_use]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Snapshot the accumulated hash values into a [`Prototype`] and reset.
    pub fn build(&mut self) -> Prototype {
        let hashes = std::mem::take(&mut self.hashes);

        #[cfg(feature = "trace")]
        tracing::trace!(
            hashes = hashes.len(),
            hasher = self.hasher.name(),
            "built prototype"
        );

        Prototype::from_set(hashes)
    }
}

impl Default for PrototypeBuilder<Murmur3Hasher> {
    fn default() -> Self {
        Self::new()
    }
}
