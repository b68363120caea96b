//! Core types shared by every filter in the crate.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── params.rs    - Bit count / hash count derivation
//! ├── shape.rs     - Immutable filter shape and its 8-byte record
//! ├── bitvec.rs    - Fixed-length bit vector
//! ├── filter.rs    - BloomFilter capability trait, log2 approximation
//! └── mod.rs       - This file (public API)
//! ```
//!
//! # Data Flow
//!
//! ```text
//! bytes ──hash──▶ HashValue ──collect──▶ Prototype ──(+ Shape)──▶ ConcreteFilter
//!                                                       └────────▶ CountingFilter
//! ```
//!
//! Everything in `core` is independent of how hash values are produced.

pub mod bitvec;
pub mod filter;
pub mod params;
pub mod shape;

pub use bitvec::BitVec;
pub use filter::BloomFilter;
pub use params::{expected_fp_rate, optimal_bit_count, optimal_hash_count, MAX_BIT_COUNT};
pub use shape::Shape;
