//! Error types for protobloom operations.
//!
//! Every failure in this crate is a local precondition violation: a malformed
//! shape request, two filters of different lengths, or a bit vector too short
//! for the shape it is being populated under. None of them are transient, so
//! none of them are worth retrying.
//!
//! # Error Propagation
//!
//! ```
//! use protobloom::{Result, Shape};
//! use protobloom::core::params::{optimal_bit_count, optimal_hash_count};
//!
//! fn derive(n: u32, x: u32) -> Result<(usize, usize)> {
//!     let m = optimal_bit_count(n, x)?;
//!     let k = optimal_hash_count(m, n)?;
//!     Ok((m, k))
//! }
//! # assert_eq!(derive(5, 5).unwrap(), (17, 2));
//! # assert!(Shape::new(0, 5).is_err());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for protobloom operations.
pub type Result<T> = std::result::Result<T, ProtoBloomError>;

/// Errors that can occur while deriving shapes or combining filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtoBloomError {
    /// Malformed input to shape derivation.
    ///
    /// Raised for a zero item count or probability, a probability that
    /// derives an empty bit vector, or a derived bit count beyond the
    /// maximum supported vector length.
    InvalidArgument {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// Two filters with different bit-vector lengths were combined.
    ///
    /// Lengths are never padded or truncated to make an operation succeed.
    ShapeMismatch {
        /// Bit length of the receiver.
        expected: usize,
        /// Bit length of the argument.
        actual: usize,
    },

    /// A bit vector is too short to be populated under a shape.
    CapacityExceeded {
        /// Length of the supplied bit vector.
        capacity: usize,
        /// Bit count the shape requires.
        required: usize,
    },

    /// Persisted filter state is malformed.
    InvalidData {
        /// Description of the malformed record.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[cfg(feature = "serde")]
    SerializationError {
        /// Description of what failed.
        message: String,
    },
}

impl fmt::Display for ProtoBloomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}.", message)
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Shape mismatch: filter has {} bits but the other operand has {} bits.",
                    expected, actual
                )
            }
            Self::CapacityExceeded { capacity, required } => {
                write!(
                    f,
                    "Capacity exceeded: bit vector holds {} bits but the shape requires {}.",
                    capacity, required
                )
            }
            Self::InvalidData { message } => {
                write!(f, "Invalid filter data: {}.", message)
            }
            #[cfg(feature = "serde")]
            Self::SerializationError { message } => {
                write!(f, "Serialization error: {}.", message)
            }
        }
    }
}

impl std::error::Error for ProtoBloomError {}

impl ProtoBloomError {
    /// Create an `InvalidArgument` error.
    ///
    /// # Examples
    /// ```
    /// use protobloom::ProtoBloomError;
    ///
    /// let err = ProtoBloomError::invalid_argument(format!("item count {} must be positive", 0));
    /// assert!(err.to_string().contains("item count 0"));
    /// ```
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a `ShapeMismatch` error.
    #[must_use]
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Create a `CapacityExceeded` error.
    #[must_use]
    pub fn capacity_exceeded(capacity: usize, required: usize) -> Self {
        Self::CapacityExceeded { capacity, required }
    }

    /// Create an `InvalidData` error.
    #[must_use]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a `SerializationError`.
    #[cfg(feature = "serde")]
    #[must_use]
    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Returns `true` if the error reports two operands of different lengths.
    #[must_use]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}
