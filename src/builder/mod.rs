//! Builders for shapes and prototypes.
//!
//! # Type-State Shape Builder
//!
//! [`ShapeBuilder`] enforces at compile time that both the item count and
//! the probability are supplied before a [`Shape`](crate::Shape) can be
//! built. Out-of-range values are still runtime errors.
//!
//! ```
//! use protobloom::builder::ShapeBuilder;
//!
//! let shape = ShapeBuilder::new()
//!     .item_count(1_000)
//!     .probability(100)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(shape.bit_count(), 9586);
//! ```
//!
//! # Prototype Builder
//!
//! [`PrototypeBuilder`] accumulates content hashes and snapshots them into a
//! shape-independent [`Prototype`](crate::filters::Prototype).
//!
//! ```
//! use protobloom::builder::PrototypeBuilder;
//!
//! let mut builder = PrototypeBuilder::new();
//! builder.update("alpha").update("beta");
//! let prototype = builder.build();
//!
//! assert_eq!(prototype.len(), 2);
//! assert!(builder.is_empty());
//! ```
//!
//! # Builder Comparison
//!
//! | Builder | Required | Optional |
//! |---------|----------|----------|
//! | Shape | item_count, probability | |
//! | Prototype | | seed or hasher |

#![allow(clippy::module_name_repetitions)]

pub mod prototype;
pub mod shape;

pub use prototype::PrototypeBuilder;
pub use shape::ShapeBuilder;

/// Common validation for builder inputs.
mod validation {
    use crate::error::{ProtoBloomError, Result};

    /// Validate the expected item count.
    ///
    /// # Errors
    ///
    /// Returns error if `item_count == 0`.
    #[inline]
    pub fn validate_item_count(item_count: u32) -> Result<()> {
        if item_count == 0 {
            return Err(ProtoBloomError::invalid_argument(
                "item count must be at least 1",
            ));
        }
        Ok(())
    }

    /// Validate the false-positive denominator.
    ///
    /// # Errors
    ///
    /// Returns error if `probability < 2`. A target of "1 in 1" derives a
    /// zero-length filter.
    #[inline]
    pub fn validate_probability(probability: u32) -> Result<()> {
        if probability < 2 {
            return Err(ProtoBloomError::invalid_argument(format!(
                "probability {} must be at least 2",
                probability
            )));
        }
        Ok(())
    }
}

/// Prelude for convenient builder imports.
pub mod prelude {
    pub use super::{PrototypeBuilder, ShapeBuilder};
}
