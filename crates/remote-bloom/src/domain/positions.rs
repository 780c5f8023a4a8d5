//! Bit position generation (enhanced double hashing)
//!
//! g_i(x) = h1(x) + i*h2(x) + i^2  (mod m), for i in 0..k
//!
//! All arithmetic wraps in u32 before the final reduction. The quadratic
//! term breaks the cycles pure `h1 + i*h2` falls into when h2 shares a
//! factor with m.

use super::hash_functions::HashPair;

/// Compute the k positions for a pre-hashed key
///
/// Returns an empty vector when `m == 0`.
pub fn positions_from_hashes(h1: u32, h2: u32, k: u32, m: u32) -> Vec<u32> {
    if m == 0 {
        return Vec::new();
    }

    (0..k)
        .map(|i| {
            let g = h1
                .wrapping_add(i.wrapping_mul(h2))
                .wrapping_add(i.wrapping_mul(i));
            g % m
        })
        .collect()
}

/// Compute the k positions for a key with the given hash pair
pub fn compute_positions(key: &[u8], hashes: &HashPair, k: u32, m: u32) -> Vec<u32> {
    let (h1, h2) = hashes.hash(key);
    positions_from_hashes(h1, h2, k, m)
}
