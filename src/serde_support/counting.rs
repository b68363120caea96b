//! Serialization for counting filters.
//!
//! Only the sparse count map and the bit length are stored; the bit vector
//! is rebuilt from the map on load.
//!
//! # Format
//!
//! - Format version
//! - Bit-vector length
//! - `(index, count)` pairs in ascending index order, every count positive
//!
//! # Examples
//!
//! ```
//! use protobloom::prelude::*;
//! use protobloom::serde_support::CountingFilterSerdeSupport;
//!
//! let shape = Shape::new(100, 100).unwrap();
//! let filter = PrototypeBuilder::new().update("a").update("b").build().counting(&shape);
//!
//! let bytes = CountingFilterSerdeSupport::to_bytes(&filter).unwrap();
//! let restored = CountingFilterSerdeSupport::from_bytes(&bytes).unwrap();
//!
//! assert_eq!(restored, filter);
//! assert_eq!(restored.as_concrete(), filter.as_concrete());
//! ```

use super::{check_version, SERIALIZATION_VERSION};
use crate::core::filter::BloomFilter;
use crate::error::{ProtoBloomError, Result};
use crate::filters::counting::CountingFilter;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializable representation of a counting filter.
#[derive(Serialize, Deserialize)]
struct CountingFilterSerde {
    /// Format version
    version: u16,
    /// Bit-vector length
    len: usize,
    /// Sparse (index, count) entries
    counts: Vec<(usize, u32)>,
}

impl Serialize for CountingFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CountingFilterSerde {
            version: SERIALIZATION_VERSION,
            len: self.len(),
            counts: self.counts().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CountingFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = CountingFilterSerde::deserialize(deserializer)?;
        check_version::<D::Error>(repr.version)?;

        CountingFilter::from_counts(repr.len, repr.counts).map_err(de::Error::custom)
    }
}

/// Byte and JSON helpers for counting filters.
pub struct CountingFilterSerdeSupport;

impl CountingFilterSerdeSupport {
    /// Serialize a filter with bincode.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::SerializationError`] if encoding fails.
    pub fn to_bytes(filter: &CountingFilter) -> Result<Vec<u8>> {
        bincode::serialize(filter).map_err(|e| ProtoBloomError::serialization_error(e.to_string()))
    }

    /// Deserialize a filter from bincode bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::SerializationError`] if the bytes are not
    /// a valid filter record.
    pub fn from_bytes(bytes: &[u8]) -> Result<CountingFilter> {
        bincode::deserialize(bytes).map_err(|e| ProtoBloomError::serialization_error(e.to_string()))
    }

    /// Serialize a filter to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::SerializationError`] if encoding fails.
    pub fn to_json(filter: &CountingFilter) -> Result<String> {
        serde_json::to_string(filter).map_err(|e| ProtoBloomError::serialization_error(e.to_string()))
    }

    /// Deserialize a filter from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoBloomError::SerializationError`] if the JSON is not a
    /// valid filter record.
    pub fn from_json(json: &str) -> Result<CountingFilter> {
        serde_json::from_str(json).map_err(|e| ProtoBloomError::serialization_error(e.to_string()))
    }
}
