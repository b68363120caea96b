//! Shape parameter calculation.
//!
//! Derives the bit-vector length and hash-function count of a filter from an
//! expected item count `n` and a false-positive target expressed as "1 in x".
//!
//! # Mathematical Background
//!
//! ```text
//! m = ceil(n × ln(1/x) / ln(1 / 2^ln2))      (= ceil(n × ln x / (ln 2)²))
//! k = round(ln 2 × m / n)
//! p = (1 - e^(-kn/m))^k
//! ```
//!
//! The derivation is evaluated in exactly this order so that two shapes built
//! from the same inputs carry byte-identical parameters on every platform
//! with IEEE-754 double arithmetic.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{ProtoBloomError, Result};
use std::f64::consts::LN_2;

/// Maximum supported bit-vector length.
///
/// Shapes whose derived bit count exceeds this are rejected rather than
/// truncated.
pub const MAX_BIT_COUNT: usize = i32::MAX as usize;

/// `ln(1 / 2^ln2)`, the denominator of the bit count derivation.
#[inline]
fn bit_count_denominator() -> f64 {
    (1.0 / 2.0_f64.powf(LN_2)).ln()
}

/// Calculate the bit count for `n` items at a false-positive rate of `1/x`.
///
/// # Errors
///
/// - [`ProtoBloomError::InvalidArgument`] if `n == 0` or `x == 0`
/// - [`ProtoBloomError::InvalidArgument`] if the derived count is zero
///   (`x == 1`) or exceeds [`MAX_BIT_COUNT`]
///
/// # Examples
///
/// ```
/// use protobloom::core::params::optimal_bit_count;
///
/// assert_eq!(optimal_bit_count(5, 5).unwrap(), 17);
/// assert_eq!(optimal_bit_count(1000, 100).unwrap(), 9586);
/// ```
pub fn optimal_bit_count(n: u32, x: u32) -> Result<usize> {
    if n == 0 {
        return Err(ProtoBloomError::invalid_argument(
            "item count must be at least 1",
        ));
    }

    if x == 0 {
        return Err(ProtoBloomError::invalid_argument(
            "probability must be at least 1",
        ));
    }

    let dp = 1.0 / f64::from(x);
    let m = ((f64::from(n) * dp.ln()) / bit_count_denominator()).ceil();

    if m > MAX_BIT_COUNT as f64 {
        return Err(ProtoBloomError::invalid_argument(format!(
            "derived bit count {:.0} for {} items at 1/{} exceeds the maximum of {}",
            m, n, x, MAX_BIT_COUNT
        )));
    }

    // ln(1) == 0, so a probability of one leaves nothing to index into
    if m < 1.0 {
        return Err(ProtoBloomError::invalid_argument(format!(
            "probability 1/{} derives an empty bit vector",
            x
        )));
    }

    Ok(m as usize)
}

/// Calculate the hash-function count for `m` bits and `n` items.
///
/// Implements `k = round(ln 2 × m / n)`. Rounding is half away from zero.
///
/// # Errors
///
/// - [`ProtoBloomError::InvalidArgument`] if `m == 0` or `n == 0`
/// - [`ProtoBloomError::InvalidArgument`] if the ratio rounds to zero
///
/// # Examples
///
/// ```
/// use protobloom::core::params::optimal_hash_count;
///
/// assert_eq!(optimal_hash_count(17, 5).unwrap(), 2);
/// assert_eq!(optimal_hash_count(9586, 1000).unwrap(), 7);
/// ```
pub fn optimal_hash_count(m: usize, n: u32) -> Result<usize> {
    if m == 0 {
        return Err(ProtoBloomError::invalid_argument(
            "bit count must be at least 1",
        ));
    }

    if n == 0 {
        return Err(ProtoBloomError::invalid_argument(
            "item count must be at least 1",
        ));
    }

    let k = ((LN_2 * m as f64) / f64::from(n)).round();

    if k < 1.0 {
        return Err(ProtoBloomError::invalid_argument(format!(
            "{} bits for {} items derives no hash functions",
            m, n
        )));
    }

    Ok(k as usize)
}

/// Theoretical false-positive rate of a filter with `m` bits, `k` hash
/// functions and `n` items inserted.
///
/// Implements `p = (1 - e^(-kn/m))^k`, clamped to `[0, 1]`. Returns `0.0`
/// for an empty filter or degenerate parameters.
///
/// # Examples
///
/// ```
/// use protobloom::core::params::expected_fp_rate;
///
/// let p = expected_fp_rate(9586, 1000, 7);
/// assert!((p - 0.01).abs() < 0.001);
/// ```
#[must_use]
pub fn expected_fp_rate(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 || n == 0 || k == 0 {
        return 0.0;
    }

    let k_f64 = k as f64;
    let exponent = -(k_f64 * n as f64) / m as f64;
    let prob_bit_one = 1.0 - exponent.exp();

    prob_bit_one.powf(k_f64).clamp(0.0, 1.0)
}

/// Bits required per item to reach a false-positive rate of `1/x`.
///
/// # Errors
///
/// Returns [`ProtoBloomError::InvalidArgument`] if `x < 2`.
///
/// # Examples
///
/// ```
/// use protobloom::core::params::bits_per_element;
///
/// let bpe = bits_per_element(100).unwrap();
/// assert!((bpe - 9.585).abs() < 0.01);
/// ```
pub fn bits_per_element(x: u32) -> Result<f64> {
    if x < 2 {
        return Err(ProtoBloomError::invalid_argument(format!(
            "probability 1/{} has no bit cost",
            x
        )));
    }

    Ok((1.0 / f64::from(x)).ln() / bit_count_denominator())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denominator_is_negative_ln2_squared() {
        let expected = -(LN_2 * LN_2);
        assert!(
            (bit_count_denominator() - expected).abs() < 1e-12,
            "expected {}, got {}",
            expected,
            bit_count_denominator()
        );
    }

    #[test]
    fn test_optimal_bit_count_small_shape() {
        assert_eq!(optimal_bit_count(5, 5).unwrap(), 17);
    }

    #[test]
    fn test_optimal_bit_count_scales_with_items() {
        let test_cases = vec![
            (1000, 10, 4793),
            (1000, 100, 9586),
            (1000, 1000, 14378),
        ];

        for (n, x, expected_m) in test_cases {
            let m = optimal_bit_count(n, x).unwrap();
            assert!(
                m.abs_diff(expected_m) <= 1,
                "n={}, x={}: expected ~{}, got {}",
                n,
                x,
                expected_m,
                m
            );
        }
    }

    #[test]
    fn test_optimal_bit_count_zero_items() {
        let err = optimal_bit_count(0, 5).unwrap_err();
        assert!(matches!(err, ProtoBloomError::InvalidArgument { .. }));
    }

    #[test]
    fn test_optimal_bit_count_zero_probability() {
        let err = optimal_bit_count(5, 0).unwrap_err();
        assert!(matches!(err, ProtoBloomError::InvalidArgument { .. }));
    }

    #[test]
    fn test_optimal_bit_count_probability_one() {
        let err = optimal_bit_count(5, 1).unwrap_err();
        assert!(err.to_string().contains("empty bit vector"));
    }

    #[test]
    fn test_optimal_bit_count_overflow() {
        let err = optimal_bit_count(u32::MAX, u32::MAX).unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
    }

    #[test]
    fn test_optimal_bit_count_is_deterministic() {
        for n in [1, 7, 100, 12_345] {
            for x in [2, 3, 50, 1_000_000] {
                assert_eq!(optimal_bit_count(n, x), optimal_bit_count(n, x));
            }
        }
    }

    #[test]
    fn test_optimal_hash_count_various_ratios() {
        let test_cases = vec![(17, 5, 2), (9586, 1000, 7), (1000, 100, 7), (500, 100, 3)];

        for (m, n, expected_k) in test_cases {
            assert_eq!(
                optimal_hash_count(m, n).unwrap(),
                expected_k,
                "m={}, n={}",
                m,
                n
            );
        }
    }

    #[test]
    fn test_optimal_hash_count_rounds_to_zero() {
        assert!(optimal_hash_count(1, 100).is_err());
    }

    #[test]
    fn test_optimal_hash_count_zero_inputs() {
        assert!(optimal_hash_count(0, 10).is_err());
        assert!(optimal_hash_count(10, 0).is_err());
    }

    #[test]
    fn test_expected_fp_rate_matches_target() {
        let m = optimal_bit_count(1000, 100).unwrap();
        let k = optimal_hash_count(m, 1000).unwrap();
        let fp = expected_fp_rate(m, 1000, k);

        let error = (fp - 0.01).abs() / 0.01;
        assert!(error < 0.1, "fp rate {} too far from 0.01", fp);
    }

    #[test]
    fn test_expected_fp_rate_degenerate() {
        assert_eq!(expected_fp_rate(1000, 0, 7), 0.0);
        assert_eq!(expected_fp_rate(0, 10, 7), 0.0);
        assert_eq!(expected_fp_rate(1000, 10, 0), 0.0);
    }

    #[test]
    fn test_bits_per_element_consistent_with_bit_count() {
        let bpe = bits_per_element(100).unwrap();
        let m = optimal_bit_count(1000, 100).unwrap();
        assert_eq!((1000.0 * bpe).ceil() as usize, m);
    }

    #[test]
    fn test_bits_per_element_rejects_trivial_probability() {
        assert!(bits_per_element(0).is_err());
        assert!(bits_per_element(1).is_err());
    }
}
