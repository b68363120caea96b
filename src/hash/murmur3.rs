//! MurmurHash3 x64 128-bit.
//!
//! The 128-bit variant of Austin Appleby's MurmurHash3 for 64-bit platforms.
//! Input is consumed in 16-byte blocks as two little-endian `u64` lanes, the
//! final 0-15 bytes are folded in as a zero-padded tail, and both lanes go
//! through the `fmix64` avalanche step.
//!
//! The multipliers and rotation amounts below are a compatibility contract:
//! prototypes hashed in another process are only comparable if every byte of
//! this function is reproduced exactly.

use byteorder::{ByteOrder, LE};

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;
const C3: u64 = 0x52dc_e729;
const C4: u64 = 0x3849_5ab5;

const BLOCK_LEN: usize = 16;

/// Hash `bytes` with the given seed, returning the two 64-bit lanes.
///
/// # Examples
///
/// ```
/// use protobloom::hash::murmur3_x64_128;
///
/// let (h1, h2) = murmur3_x64_128(b"The quick brown fox jumps over the lazy dog", 0);
/// assert_eq!(h1, 0xe34bbc7bbc071b6c);
/// assert_eq!(h2, 0x7a433ca9c49a9347);
/// ```
#[must_use]
pub fn murmur3_x64_128(bytes: &[u8], seed: u64) -> (u64, u64) {
    let mut h1 = seed;
    let mut h2 = seed;

    let mut blocks = bytes.chunks_exact(BLOCK_LEN);
    for block in &mut blocks {
        let k1 = LE::read_u64(&block[0..8]);
        let k2 = LE::read_u64(&block[8..16]);

        h1 ^= mix_k1(k1);
        h1 = h1.rotate_left(27);
        h1 = h1.wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(C3);

        h2 ^= mix_k2(k2);
        h2 = h2.rotate_left(31);
        h2 = h2.wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(C4);
    }

    let tail = blocks.remainder();
    if tail.len() > 8 {
        h2 ^= mix_k2(read_partial(&tail[8..]));
    }
    if !tail.is_empty() {
        h1 ^= mix_k1(read_partial(&tail[..tail.len().min(8)]));
    }

    let len = bytes.len() as u64;
    h1 ^= len;
    h2 ^= len;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix64(h1);
    h2 = fmix64(h2);

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    (h1, h2)
}

#[inline]
fn mix_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}

#[inline]
fn mix_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

/// Read up to 8 bytes as a zero-padded little-endian `u64`.
#[inline]
fn read_partial(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    LE::read_u64(&buf)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^ (k >> 33)
}
