//! ProtoBloom: shape-independent Bloom filter prototypes.
//!
//! Items are hashed once into 128-bit [`HashValue`]s and collected into a
//! [`Prototype`]. A prototype says *what* a filter contains without fixing
//! its size; materializing it under a [`Shape`] produces a bit-vector
//! [`ConcreteFilter`] or a [`CountingFilter`] that supports removal.
//!
//! # Quick Start
//!
//! ```
//! use protobloom::prelude::*;
//!
//! // 5 items at a false-positive rate of 1 in 5
//! let shape = Shape::new(5, 5).unwrap();
//! assert_eq!(shape.bit_count(), 17);
//! assert_eq!(shape.hash_function_count(), 2);
//!
//! let hello = PrototypeBuilder::new().update("Hello").build();
//! let world = PrototypeBuilder::new().update("World").build();
//!
//! let filter_a = hello.materialize(&shape);
//! let filter_ab = hello.merge(&world).materialize(&shape);
//!
//! // "could contain": every bit of A is present in AB
//! assert!(filter_a.matches(&filter_ab).unwrap());
//! ```
//!
//! # Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Shape`] | `(n, 1/x)` target and the derived `m` bits / `k` positions |
//! | [`HashValue`] | 128-bit content hash; yields `k` positions under a shape |
//! | [`Prototype`] | ordered set of hash values, independent of any shape |
//! | [`ConcreteFilter`] | immutable bit vector: match, distance, merge |
//! | [`CountingFilter`] | sparse per-position counts: merge and remove |
//!
//! # Immutability
//!
//! Every type is an immutable value once constructed. `merge`, `remove` and
//! `materialize` return new instances, so filters can be shared across
//! threads without synchronization.
//!
//! ```
//! use protobloom::prelude::*;
//! use std::sync::Arc;
//!
//! let shape = Shape::new(100, 100).unwrap();
//! let filter = Arc::new(PrototypeBuilder::new().update("shared").build().materialize(&shape));
//!
//! let query = PrototypeBuilder::new().update("shared").build().materialize(&shape);
//! let filter_clone = Arc::clone(&filter);
//! std::thread::spawn(move || {
//!     assert!(query.matches(&*filter_clone).unwrap());
//! })
//! .join()
//! .unwrap();
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `serde` | yes | serde impls and [`serde_support`] byte/JSON helpers |
//! | `trace` | yes | `tracing` events for shape derivation and counting edge cases |
//!
//! The library never installs a tracing subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::len_without_is_empty)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Shape derivation, bit vectors and the shared filter trait.
pub mod core;

/// Error types.
pub mod error;

/// Prototypes, concrete filters and counting filters.
pub mod filters;

/// Content hashing.
pub mod hash;

/// Builders for shapes and prototypes.
pub mod builder;

/// Serialization support.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod serde_support;

pub use crate::builder::{PrototypeBuilder, ShapeBuilder};
pub use crate::core::filter::BloomFilter;
pub use crate::core::shape::Shape;
pub use crate::error::{ProtoBloomError, Result};
pub use crate::filters::{ConcreteFilter, CountingFilter, Prototype};
pub use crate::hash::{ContentHasher, HashValue, Murmur3Hasher};

/// Convenient imports for common use.
///
/// ```
/// use protobloom::prelude::*;
///
/// let shape = Shape::new(10, 100).unwrap();
/// let filter = PrototypeBuilder::new().update("x").build().materialize(&shape);
/// assert!(filter.hamming_weight() > 0);
/// ```
pub mod prelude {
    pub use crate::builder::{PrototypeBuilder, ShapeBuilder};
    pub use crate::core::filter::BloomFilter;
    pub use crate::core::shape::Shape;
    pub use crate::error::{ProtoBloomError, Result};
    pub use crate::filters::{ConcreteFilter, CountingFilter, Prototype};
    pub use crate::hash::{ContentHasher, HashValue, Murmur3Hasher};

    #[cfg(feature = "serde")]
    pub use crate::serde_support::{ConcreteFilterSerdeSupport, CountingFilterSerdeSupport};
}
