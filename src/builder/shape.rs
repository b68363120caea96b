//! Builder for filter shapes.
//!
//! # Type-State Pattern
//!
//! ```text
//! Initial → WithItems → Complete → Shape
//!     ↓          ↓           ↓
//!  .item_count() .probability() .build()
//! ```
//!
//! # Examples
//!
//! ```
//! use protobloom::builder::ShapeBuilder;
//!
//! let shape = ShapeBuilder::new()
//!     .item_count(5)
//!     .probability(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(shape.bit_count(), 17);
//! assert_eq!(shape.hash_function_count(), 2);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use protobloom::builder::ShapeBuilder;
//!
//! let result = ShapeBuilder::new()
//!     .item_count(0)  // Invalid!
//!     .probability(100)
//!     .build();
//!
//! assert!(result.is_err());
//! ```

use super::validation::{validate_item_count, validate_probability};
use crate::core::shape::Shape;
use crate::error::Result;
use std::marker::PhantomData;

/// Type-state marker: no parameters set.
pub struct Initial;

/// Type-state marker: item count is set.
pub struct WithItems;

/// Type-state marker: all required parameters set.
pub struct Complete;

/// Builder for [`Shape`] with type-state guarantees.
pub struct ShapeBuilder<State = Initial> {
    item_count: u32,
    probability: u32,
    _state: PhantomData<State>,
}

impl ShapeBuilder<Initial> {
    /// Create a new shape builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            item_count: 0,
            probability: 0,
            _state: PhantomData,
        }
    }

    /// Set the expected number of items. Transitions to `WithItems`.
    ///
    /// # Arguments
    ///
    /// * `item_count` - Expected number of elements (must be > 0)
    #[must_use]
    pub fn item_count(self, item_count: u32) -> ShapeBuilder<WithItems> {
        ShapeBuilder {
            item_count,
            probability: self.probability,
            _state: PhantomData,
        }
    }
}

impl ShapeBuilder<WithItems> {
    /// Set the false-positive target as "1 in `probability`". Transitions
    /// to `Complete`.
    ///
    /// # Arguments
    ///
    /// * `probability` - Denominator of the target rate (must be >= 2)
    #[must_use]
    pub fn probability(self, probability: u32) -> ShapeBuilder<Complete> {
        ShapeBuilder {
            item_count: self.item_count,
            probability,
            _state: PhantomData,
        }
    }
}

impl ShapeBuilder<Complete> {
    /// Validate the inputs and derive the shape.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::InvalidArgument`](crate::ProtoBloomError::InvalidArgument)
    /// if:
    /// - `item_count == 0`
    /// - `probability < 2`
    /// - the derived bit count exceeds the maximum vector length
    pub fn build(self) -> Result<Shape> {
        validate_item_count(self.item_count)?;
        validate_probability(self.probability)?;

        Shape::new(self.item_count, self.probability)
    }
}

impl Default for ShapeBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}
