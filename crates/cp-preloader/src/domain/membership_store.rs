//! Membership store: the Bloom filter recording which classpath paths exist
//!
//! INVARIANTS:
//! - No false negatives: once `insert(p)` ran, `might_contain(p)` is true
//! - FPR = (1 - e^(-kn/m))^k stays near the configured rate while n <= capacity
//! - Bits are only ever set, never cleared
//!
//! The store is written through `&mut self` during the build pass and then
//! frozen by moving it into an `Arc`. After that only `&self` methods are
//! reachable, so an insert can never race with concurrent readers.

use std::fmt;

use bitvec::prelude::*;
use tracing::warn;

use super::config::PreloaderConfig;
use super::hash_functions::hash_positions;
use super::parameters::{calculate_fpr, calculate_optimal_parameters};
use crate::error::PreloadError;

/// Probabilistic set of path strings with no false negatives
#[derive(Clone)]
pub struct MembershipStore {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Number of hash positions per item (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Number of insert calls (n), duplicates included
    n: usize,
    /// Capacity the store was sized for
    capacity: usize,
}

impl MembershipStore {
    /// Create a store sized for `expected_items` at `false_positive_rate`
    ///
    /// Memory is fixed at construction and does not grow with insertions.
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Result<Self, PreloadError> {
        let params = calculate_optimal_parameters(expected_items, false_positive_rate)?;
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; params.size_bits],
            k: params.hash_count,
            m: params.size_bits,
            n: 0,
            capacity: expected_items,
        })
    }

    /// Create a store from a validated configuration
    pub fn from_config(config: &PreloaderConfig) -> Result<Self, PreloadError> {
        Self::new(config.expected_items, config.false_positive_rate)
    }

    /// Record a path as existing
    ///
    /// Inserting the same path twice leaves the bit pattern unchanged.
    pub fn insert(&mut self, item: &str) {
        for pos in hash_positions(item.as_bytes(), self.k, self.m) {
            self.bits.set(pos, true);
        }
        self.n += 1;
        if self.n == self.capacity + 1 {
            warn!(
                capacity = self.capacity,
                "membership store exceeded its sized capacity, false positive rate will rise"
            );
        }
    }

    /// Test whether a path might exist
    ///
    /// Returns:
    /// - `false` if the path was definitely never inserted
    /// - `true` if it was inserted, or on a false positive
    pub fn might_contain(&self, item: &str) -> bool {
        hash_positions(item.as_bytes(), self.k, self.m).all(|pos| self.bits[pos])
    }

    /// OR another store's bits into this one
    ///
    /// Both stores must have been sized with the same parameters. Used to
    /// combine per-worker stores from a parallel build.
    pub fn merge(&mut self, other: &MembershipStore) -> Result<(), PreloadError> {
        if self.m != other.m || self.k != other.k {
            return Err(PreloadError::ParameterMismatch {
                left_bits: self.m,
                left_hashes: self.k,
                right_bits: other.m,
                right_hashes: other.k,
            });
        }

        let self_raw = self.bits.as_raw_mut_slice();
        let other_raw = other.bits.as_raw_slice();
        for (s, o) in self_raw.iter_mut().zip(other_raw.iter()) {
            *s |= *o;
        }
        self.n += other.n;
        Ok(())
    }

    /// False positive rate implied by the current fill level
    pub fn estimated_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.k)
    }

    /// Number of bits set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Bytes of bit storage held by the filter
    pub fn size_bytes(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    /// Number of hash positions per item
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Number of insert calls so far
    pub fn items_inserted(&self) -> usize {
        self.n
    }

    /// Item count the store was sized for
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Debug for MembershipStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The bit array is megabytes wide; print its dimensions only
        f.debug_struct("MembershipStore")
            .field("size_bits", &self.m)
            .field("hash_count", &self.k)
            .field("items_inserted", &self.n)
            .field("capacity", &self.capacity)
            .finish()
    }
}
