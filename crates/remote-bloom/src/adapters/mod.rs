//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the `BitStore` port.
//!
//! - `InMemoryBitStore` - process-local arrays, used by tests and embedders
//! - `RedisBitStore` - Redis strings via BITFIELD (feature `redis`)

pub mod memory_store;
#[cfg(feature = "redis")]
pub mod redis_store;

pub use memory_store::InMemoryBitStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisBitStore;
