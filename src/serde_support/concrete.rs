//! Serialization for concrete filters.
//!
//! # Format
//!
//! - Format version
//! - Bit-vector length
//! - Raw bit data as `u64` words, little-endian bit order within each word
//!
//! # Examples
//!
//! ```
//! use protobloom::prelude::*;
//!
//! let shape = Shape::new(5, 5).unwrap();
//! let filter = PrototypeBuilder::new().update("Hello").build().materialize(&shape);
//!
//! let json = serde_json::to_string(&filter).unwrap();
//! let restored: ConcreteFilter = serde_json::from_str(&json).unwrap();
//! assert_eq!(restored, filter);
//! ```

use super::{check_version, SERIALIZATION_VERSION};
use crate::core::bitvec::BitVec;
use crate::core::filter::BloomFilter;
use crate::error::{ProtoBloomError, Result};
use crate::filters::concrete::ConcreteFilter;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializable representation of a concrete filter.
#[derive(Deserialize)]
struct ConcreteFilterSerde {
    /// Format version for compatibility checking
    version: u16,
    /// Bit-vector length
    len: usize,
    /// Raw bit data
    words: Vec<u64>,
}

/// Borrowed counterpart of [`ConcreteFilterSerde`] used when writing.
#[derive(Serialize)]
struct ConcreteFilterSerdeRef<'a> {
    version: u16,
    len: usize,
    words: &'a [u64],
}

impl Serialize for ConcreteFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ConcreteFilterSerdeRef {
            version: SERIALIZATION_VERSION,
            len: self.len(),
            words: self.bit_vec().as_words(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConcreteFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = ConcreteFilterSerde::deserialize(deserializer)?;
        check_version::<D::Error>(repr.version)?;

        let bits = BitVec::from_raw(repr.words, repr.len).map_err(de::Error::custom)?;
        Ok(ConcreteFilter::from_bits(bits))
    }
}

/// Byte and JSON helpers for concrete filters.
pub struct ConcreteFilterSerdeSupport;

impl ConcreteFilterSerdeSupport {
    /// Estimate the bincode-encoded size of a filter of `len` bits.
    ///
    /// ```
    /// use protobloom::prelude::*;
    /// use protobloom::serde_support::ConcreteFilterSerdeSupport;
    ///
    /// let filter = ConcreteFilter::empty(&Shape::new(1000, 100).unwrap());
    /// let bytes = ConcreteFilterSerdeSupport::to_bytes(&filter).unwrap();
    /// assert_eq!(ConcreteFilterSerdeSupport::estimate_size(filter.len()), bytes.len());
    /// ```
    #[must_use]
    pub fn estimate_size(len: usize) -> usize {
        // version (2) + len (8) + word count (8)
        let metadata_size = 18;
        let data_size = (len + 63) / 64 * 8;
        metadata_size + data_size
    }

    /// Serialize a filter with bincode.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::SerializationError`] if encoding fails.
    pub fn to_bytes(filter: &ConcreteFilter) -> Result<Vec<u8>> {
        bincode::serialize(filter).map_err(|e| ProtoBloomError::serialization_error(e.to_string()))
    }

    /// Deserialize a filter from bincode bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::SerializationError`] if the bytes are not
    /// a valid filter record.
    pub fn from_bytes(bytes: &[u8]) -> Result<ConcreteFilter> {
        bincode::deserialize(bytes).map_err(|e| ProtoBloomError::serialization_error(e.to_string()))
    }

    /// Serialize a filter to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::SerializationError`] if encoding fails.
    pub fn to_json(filter: &ConcreteFilter) -> Result<String> {
        serde_json::to_string(filter).map_err(|e| ProtoBloomError::serialization_error(e.to_string()))
    }

    /// Deserialize a filter from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::SerializationError`] if the JSON is not a
    /// valid filter record.
    pub fn from_json(json: &str) -> Result<ConcreteFilter> {
        serde_json::from_str(json).map_err(|e| ProtoBloomError::serialization_error(e.to_string()))
    }
}
