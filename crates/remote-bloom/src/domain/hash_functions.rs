//! Hash functions for the Bloom filter
//!
//! Double hashing needs two statistically independent 32-bit hashes, so the
//! two families used here come from different constructions:
//!
//! - FNV-1a (byte-at-a-time xor/multiply, no finalizer)
//! - MurmurHash3 x86_32 (4-byte block mixing plus avalanche finalizer)
//!
//! Pairing two variants of the same family (e.g. two FNV flavours) gives
//! correlated outputs and a measurably higher false positive rate, so
//! `HashPair` refuses it.

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

const MURMUR_C1: u32 = 0xcc9e_2d51;
const MURMUR_C2: u32 = 0x1b87_3593;

/// 32-bit FNV-1a
pub fn fnv1a_32(key: &[u8]) -> u32 {
    key.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// MurmurHash3 x86_32
///
/// Blocks are decoded little-endian from bounds-checked 4-byte chunks; the
/// 0..=3 byte tail goes through the partial-block path.
pub fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;

    let mut blocks = key.chunks_exact(4);
    for block in &mut blocks {
        let k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h1 ^= mix_k1(k1);
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let k1 = tail
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &byte)| acc ^ (u32::from(byte) << (8 * i)));
        h1 ^= mix_k1(k1);
    }

    // Length is folded in modulo 2^32, as in the reference algorithm.
    h1 ^= key.len() as u32;
    fmix32(h1)
}

#[inline]
fn mix_k1(k1: u32) -> u32 {
    k1.wrapping_mul(MURMUR_C1)
        .rotate_left(15)
        .wrapping_mul(MURMUR_C2)
}

/// Murmur3 avalanche finalizer
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// A 32-bit hash construction usable as one half of a double-hashing pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashFamily {
    /// FNV-1a, 32-bit
    Fnv1a,
    /// MurmurHash3 x86_32 with seed 0
    Murmur3,
}

impl HashFamily {
    /// Hash `key` with this family
    pub fn hash(&self, key: &[u8]) -> u32 {
        match self {
            HashFamily::Fnv1a => fnv1a_32(key),
            HashFamily::Murmur3 => murmur3_32(key, 0),
        }
    }

    /// Short stable name, used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            HashFamily::Fnv1a => "fnv1a-32",
            HashFamily::Murmur3 => "murmur3-32",
        }
    }
}

/// The two hash functions feeding double hashing, chosen at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashPair {
    primary: HashFamily,
    secondary: HashFamily,
}

impl Default for HashPair {
    fn default() -> Self {
        Self {
            primary: HashFamily::Fnv1a,
            secondary: HashFamily::Murmur3,
        }
    }
}

impl HashPair {
    /// Build a pair, rejecting two hashes from the same construction family
    pub fn new(primary: HashFamily, secondary: HashFamily) -> Result<Self, FilterError> {
        let pair = Self { primary, secondary };
        pair.validate()?;
        Ok(pair)
    }

    /// Check the pair is made of two different families
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.primary == self.secondary {
            return Err(FilterError::InvalidParameters(format!(
                "hash pair must use two independent families, got {} twice",
                self.primary.name()
            )));
        }
        Ok(())
    }

    /// Hash family producing h1
    pub fn primary(&self) -> HashFamily {
        self.primary
    }

    /// Hash family producing h2
    pub fn secondary(&self) -> HashFamily {
        self.secondary
    }

    /// Compute `(h1, h2)` for a key
    pub fn hash(&self, key: &[u8]) -> (u32, u32) {
        (self.primary.hash(key), self.secondary.hash(key))
    }
}
