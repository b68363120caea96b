//! Prototypes and the filters materialized from them.
//!
//! # Available Types
//!
//! - [`Prototype`] - shape-independent set of content hashes
//! - [`ConcreteFilter`] - immutable bit-vector filter
//! - [`CountingFilter`] - filter with per-position counts supporting removal
//!
//! # Choosing a Filter
//!
//! | Type | Use Case | Memory | Operations |
//! |------|----------|--------|------------|
//! | [`Prototype`] | Exchange items across shapes | 16 bytes per item | Merge, Materialize |
//! | [`ConcreteFilter`] | Matching, distance | m bits | Match, Distance, Merge |
//! | [`CountingFilter`] | Need removal | m bits + sparse counts | Match, Merge, Remove |
//!
//! Both filter types implement [`BloomFilter`](crate::BloomFilter), so any
//! filter may be matched against any other of the same length.
//!
//! # Examples
//!
//! ```
//! use protobloom::prelude::*;
//!
//! let shape = Shape::new(100, 1000).unwrap();
//! let prototype = PrototypeBuilder::new().update("x").update("y").build();
//!
//! let concrete = prototype.materialize(&shape);
//! let counting = prototype.counting(&shape);
//!
//! assert!(concrete.matches(&counting).unwrap());
//! assert!(counting.matches(&concrete).unwrap());
//! assert_eq!(concrete.distance(&counting).unwrap(), 0);
//! ```

pub mod concrete;
pub mod counting;
pub mod prototype;

pub use concrete::ConcreteFilter;
pub use counting::CountingFilter;
pub use prototype::Prototype;
