//! In-memory bit store
//!
//! Behaves like a Redis string used through BITFIELD: arrays are created on
//! first write, grow on demand, and read as zero past their end. One lock
//! acquisition per call, so every batch is applied atomically.

use async_trait::async_trait;
use bitvec::prelude::*;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::ports::BitStore;

/// Redis caps a string at 512 MiB: 2^32 bits, offsets 0 through 2^32 - 1.
pub const DEFAULT_MAX_BITS: u64 = 1 << 32;

/// In-memory `BitStore` for tests and single-process embedding
pub struct InMemoryBitStore {
    arrays: RwLock<HashMap<String, BitVec<u8, Lsb0>>>,
    max_bits: u64,
}

impl Default for InMemoryBitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBitStore {
    pub fn new() -> Self {
        Self::with_max_bits(DEFAULT_MAX_BITS)
    }

    /// Store whose arrays cannot grow past `max_bits`
    pub fn with_max_bits(max_bits: u64) -> Self {
        Self {
            arrays: RwLock::new(HashMap::new()),
            max_bits,
        }
    }

    /// Whether a bit array exists for `identifier`
    pub async fn contains(&self, identifier: &str) -> bool {
        self.arrays.read().await.contains_key(identifier)
    }

    /// Number of set bits in the array, 0 if it does not exist
    pub async fn bits_set(&self, identifier: &str) -> usize {
        self.arrays
            .read()
            .await
            .get(identifier)
            .map(|bits| bits.count_ones())
            .unwrap_or(0)
    }

    /// Number of stored arrays
    pub async fn len(&self) -> usize {
        self.arrays.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.arrays.read().await.is_empty()
    }

    fn check_range(&self, offsets: &[u32]) -> Result<Option<u32>, StoreError> {
        let max = offsets.iter().copied().max();
        if let Some(offset) = max {
            if u64::from(offset) >= self.max_bits {
                return Err(StoreError::OutOfRange {
                    offset: u64::from(offset),
                    len: self.max_bits,
                });
            }
        }
        Ok(max)
    }
}

#[async_trait]
impl BitStore for InMemoryBitStore {
    async fn set_bits(&self, identifier: &str, offsets: &[u32]) -> Result<(), StoreError> {
        // Validate before touching anything so a rejected batch changes no bits.
        let Some(max_offset) = self.check_range(offsets)? else {
            return Ok(());
        };

        let mut arrays = self.arrays.write().await;
        let bits = arrays.entry(identifier.to_string()).or_default();

        let needed = max_offset as usize + 1;
        if bits.len() < needed {
            bits.resize(needed, false);
        }
        for &offset in offsets {
            bits.set(offset as usize, true);
        }
        Ok(())
    }

    async fn get_bits(&self, identifier: &str, offsets: &[u32]) -> Result<Vec<bool>, StoreError> {
        self.check_range(offsets)?;

        let arrays = self.arrays.read().await;
        let values = match arrays.get(identifier) {
            Some(bits) => offsets
                .iter()
                .map(|&offset| bits.get(offset as usize).map(|b| *b).unwrap_or(false))
                .collect(),
            None => vec![false; offsets.len()],
        };
        Ok(values)
    }

    async fn delete(&self, identifier: &str) -> Result<(), StoreError> {
        self.arrays.write().await.remove(identifier);
        Ok(())
    }
}
