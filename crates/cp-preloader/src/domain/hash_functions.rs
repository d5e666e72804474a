//! Hash functions for the membership store
//!
//! Two unrelated hash families feed a double-hashing scheme:
//! - h1: MurmurHash3 x64/128, lower 64 bits
//! - h2: SipHash-1-3 with fixed keys
//!
//! Position i is `(h1 + i * h2) mod m`, so k positions cost two hashes.

use std::hash::Hasher;
use std::io::Cursor;

use siphasher::sip::SipHasher13;

/// Fixed SipHash keys; positions must be stable for the whole process
const SIP_KEY_0: u64 = 0x0706_0504_0302_0100;
const SIP_KEY_1: u64 = 0x0f0e_0d0c_0b0a_0908;

/// Hash an item with MurmurHash3 and take the lower 64 bits
pub fn murmur_hash(item: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(item);
    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Hash an item with SipHash-1-3
pub fn sip_hash(item: &[u8]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(SIP_KEY_0, SIP_KEY_1);
    hasher.write(item);
    hasher.finish()
}

/// Compute the k bit positions for an item in a filter of m bits
///
/// h2 is forced odd so consecutive probes never collapse onto h1
/// when the second hash happens to be zero.
pub fn hash_positions(item: &[u8], k: usize, m: usize) -> impl Iterator<Item = usize> {
    let h1 = murmur_hash(item, 0);
    let h2 = sip_hash(item) | 1;
    let m = m as u64;

    (0..k as u64).map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % m) as usize)
}
