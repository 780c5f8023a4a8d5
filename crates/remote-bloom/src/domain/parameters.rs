//! Optimal Bloom filter parameter derivation
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2))  -- bits in the backing array
//! - k = ceil(-log2(p))               -- number of probe positions
//!
//! Both are derived once from (n, p) and never recomputed.

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Largest bit array the backing store can address (offsets are `u32`).
pub const MAX_BIT_COUNT: u32 = u32::MAX;

/// Derived Bloom filter parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloomFilterParams {
    /// Number of bits in the backing array (m)
    pub bit_count: u32,
    /// Number of probe positions per key (k)
    pub hash_count: u32,
}

/// Derive `(m, k)` for `capacity` expected items at `false_positive_rate`.
///
/// # Errors
/// - `InvalidParameters` if `capacity == 0` or the rate is not in (0, 1)
/// - `CapacityExceeded` if m would not fit in the `u32` offset range
pub fn derive(capacity: u32, false_positive_rate: f64) -> Result<BloomFilterParams, FilterError> {
    validate_inputs(capacity, false_positive_rate)?;

    let required_bits = raw_bit_count(capacity, false_positive_rate);
    if required_bits > f64::from(MAX_BIT_COUNT) {
        return Err(FilterError::CapacityExceeded {
            required_bits,
            max_bits: MAX_BIT_COUNT,
        });
    }

    // Bounded above by MAX_BIT_COUNT, so the cast cannot truncate.
    let bit_count = (required_bits.ceil() as u32).max(1);

    Ok(BloomFilterParams {
        bit_count,
        hash_count: optimal_hash_count(false_positive_rate),
    })
}

/// Unrounded bit count: `-n * ln(p) / ln(2)^2`
pub fn raw_bit_count(capacity: u32, false_positive_rate: f64) -> f64 {
    -(f64::from(capacity) * false_positive_rate.ln()) / (LN_2 * LN_2)
}

/// `ceil(-log2(p))`, never below 1
pub fn optimal_hash_count(false_positive_rate: f64) -> u32 {
    let k = (-false_positive_rate.log2()).ceil();
    if k < 1.0 {
        1
    } else {
        k as u32
    }
}

/// Theoretical false positive rate after `n` insertions
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn expected_fpr(bit_count: u32, hash_count: u32, inserted: u64) -> f64 {
    if bit_count == 0 {
        return 1.0;
    }
    let exponent = -(f64::from(hash_count)) * (inserted as f64) / f64::from(bit_count);
    (1.0 - exponent.exp()).powi(hash_count as i32)
}

fn validate_inputs(capacity: u32, false_positive_rate: f64) -> Result<(), FilterError> {
    if capacity == 0 {
        return Err(FilterError::InvalidParameters(
            "capacity must be at least 1".to_string(),
        ));
    }
    // Also rejects NaN.
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        return Err(FilterError::InvalidParameters(format!(
            "false positive rate must be in (0, 1), got {}",
            false_positive_rate
        )));
    }
    Ok(())
}
