//! Serialization support for shapes, prototypes and filters.
//!
//! This module is only available when the `serde` feature is enabled (it is
//! on by default).
//!
//! # Persisted State
//!
//! Each type persists the minimum needed to rebuild it exactly:
//!
//! | Type | Persisted fields | Rebuilt by |
//! |------|------------------|------------|
//! | [`Shape`] | `item_count`, `probability` | [`Shape::new`] |
//! | [`HashValue`](crate::HashValue) | `h1`, `h2` | derive |
//! | [`Prototype`](crate::Prototype) | ordered hash values | derive |
//! | [`ConcreteFilter`](crate::ConcreteFilter) | `len`, raw words | [`BitVec::from_raw`](crate::core::BitVec::from_raw) |
//! | [`CountingFilter`](crate::CountingFilter) | `len`, `(index, count)` pairs | [`CountingFilter::from_counts`](crate::CountingFilter::from_counts) |
//!
//! A shape never stores its derived bit count or hash count. They are
//! recomputed on load, so a stored shape always agrees with the derivation
//! of the library reading it.
//!
//! Filters carry a format version and are validated on load. Malformed data
//! is a deserialization error, never a panic.
//!
//! # Examples
//!
//! ## JSON
//!
//! ```
//! use protobloom::Shape;
//!
//! let shape = Shape::new(1000, 100).unwrap();
//! let json = serde_json::to_string(&shape).unwrap();
//! assert_eq!(json, r#"{"item_count":1000,"probability":100}"#);
//!
//! let restored: Shape = serde_json::from_str(&json).unwrap();
//! assert_eq!(restored.bit_count(), 9586);
//! ```
//!
//! ## Binary (bincode)
//!
//! ```
//! use protobloom::prelude::*;
//! use protobloom::serde_support::ConcreteFilterSerdeSupport;
//!
//! let shape = Shape::new(100, 100).unwrap();
//! let filter = PrototypeBuilder::new().update("hello").build().materialize(&shape);
//!
//! let bytes = ConcreteFilterSerdeSupport::to_bytes(&filter).unwrap();
//! let restored = ConcreteFilterSerdeSupport::from_bytes(&bytes).unwrap();
//! assert_eq!(restored, filter);
//! ```

pub mod concrete;
pub mod counting;

pub use concrete::ConcreteFilterSerdeSupport;
pub use counting::CountingFilterSerdeSupport;

use crate::core::shape::Shape;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialization version for filter formats.
///
/// Increment this when making breaking changes to a filter's format.
pub const SERIALIZATION_VERSION: u16 = 1;

/// Serializable representation of a shape: its two inputs only.
#[derive(Serialize, Deserialize)]
struct ShapeSerde {
    item_count: u32,
    probability: u32,
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ShapeSerde {
            item_count: self.item_count(),
            probability: self.probability(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = ShapeSerde::deserialize(deserializer)?;
        Shape::new(repr.item_count, repr.probability).map_err(de::Error::custom)
    }
}

/// Reject a filter record written by an incompatible format version.
fn check_version<E: de::Error>(version: u16) -> std::result::Result<(), E> {
    if version != SERIALIZATION_VERSION {
        return Err(E::custom(format!(
            "Incompatible serialization version: expected {}, got {}",
            SERIALIZATION_VERSION, version
        )));
    }
    Ok(())
}
