//! Shared data generators and constants for the benchmarks.
#![allow(dead_code)]

use protobloom::prelude::*;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

// DATA GENERATORS

/// Generate a random alphanumeric string of `len` bytes.
#[inline]
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate `count` independent random strings of `len` bytes.
pub fn generate_strings(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_string(len)).collect()
}

/// Generate `count` random byte buffers of `len` bytes.
pub fn generate_bytes(count: usize, len: usize) -> Vec<Vec<u8>> {
    let mut rng = thread_rng();
    (0..count)
        .map(|_| (0..len).map(|_| rng.gen::<u8>()).collect())
        .collect()
}

/// Prototype of `count` random 32-byte strings.
pub fn random_prototype(count: usize) -> Prototype {
    let mut builder = PrototypeBuilder::new();
    for item in generate_strings(count, 32) {
        builder.update(item);
    }
    builder.build()
}

// CONSTANTS

/// Item counts used to size shapes.
pub const SIZES: &[u32] = &[100, 1_000, 10_000, 100_000];

/// False-positive denominators ("1 in x").
pub const PROBABILITIES: &[u32] = &[10, 100, 1_000, 10_000];

/// Input lengths in bytes for hashing benchmarks.
pub const INPUT_LENGTHS: &[usize] = &[0, 8, 15, 16, 32, 256, 4096];
