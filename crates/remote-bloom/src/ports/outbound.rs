//! Outbound Ports (Driven Ports)
//!
//! The filter keeps no bits itself. Every bit lives in an external store
//! exposing a single contiguous bit array per identifier.
//!
//! Production: `RedisBitStore` (feature `redis`, BITFIELD/DEL)
//! Testing: `InMemoryBitStore`

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::StoreError;

/// Remote bit array store (Driven Port)
///
/// Each call is one logical request covering all offsets; implementations
/// must not split it into per-offset round trips.
#[async_trait]
pub trait BitStore: Send + Sync {
    /// Set every offset to 1.
    ///
    /// Partial application on error is acceptable, but bits outside
    /// `offsets` must never change.
    async fn set_bits(&self, identifier: &str, offsets: &[u32]) -> Result<(), StoreError>;

    /// Read the bit at every offset, in input order.
    ///
    /// An identifier that was never written reads as all zeros.
    async fn get_bits(&self, identifier: &str, offsets: &[u32]) -> Result<Vec<bool>, StoreError>;

    /// Delete the whole bit array. Deleting an unknown identifier is not an error.
    async fn delete(&self, identifier: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: BitStore + ?Sized> BitStore for Arc<S> {
    async fn set_bits(&self, identifier: &str, offsets: &[u32]) -> Result<(), StoreError> {
        (**self).set_bits(identifier, offsets).await
    }

    async fn get_bits(&self, identifier: &str, offsets: &[u32]) -> Result<Vec<bool>, StoreError> {
        (**self).get_bits(identifier, offsets).await
    }

    async fn delete(&self, identifier: &str) -> Result<(), StoreError> {
        (**self).delete(identifier).await
    }
}
