//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal hash functions
//! - FPR = (1 - e^(-kn/m))^k

use std::f64::consts::LN_2;

use crate::error::PreloadError;

/// Upper bound on the number of hash positions per item
pub const MAX_HASH_COUNT: usize = 32;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct StoreParams {
    /// Number of bits in the filter
    pub size_bits: usize,
    /// Number of hash functions
    pub hash_count: usize,
    /// Expected false positive rate once `expected_items` are inserted
    pub expected_fpr: f64,
}

/// Check capacity and rate before any sizing math runs
pub fn validate_parameters(expected_items: usize, target_fpr: f64) -> Result<(), PreloadError> {
    if expected_items == 0 {
        return Err(PreloadError::InvalidCapacity);
    }
    // NaN fails both comparisons, so it is rejected here too
    if !(target_fpr > 0.0 && target_fpr < 1.0) {
        return Err(PreloadError::InvalidFalsePositiveRate { fpr: target_fpr });
    }
    Ok(())
}

/// Calculate optimal Bloom filter parameters for given constraints
///
/// # Arguments
/// * `expected_items` - Expected number of items to insert (n)
/// * `target_fpr` - Target false positive rate, in (0, 1)
///
/// # Errors
/// `InvalidCapacity` for n = 0, `InvalidFalsePositiveRate` for a rate
/// outside the open unit interval.
pub fn calculate_optimal_parameters(
    expected_items: usize,
    target_fpr: f64,
) -> Result<StoreParams, PreloadError> {
    validate_parameters(expected_items, target_fpr)?;

    let n = expected_items as f64;
    let ln2_squared = LN_2 * LN_2;

    // Optimal number of bits: m = -n * ln(fpr) / (ln(2)^2)
    let m = ((-n * target_fpr.ln() / ln2_squared).ceil() as usize).max(1);

    // Optimal number of hash functions: k = (m/n) * ln(2)
    let k = ((m as f64 / n) * LN_2).round() as usize;
    let k = k.clamp(1, MAX_HASH_COUNT);

    Ok(StoreParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, expected_items, k),
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
