//! # Remote Bloom
//!
//! A Bloom filter whose bit array lives in a remote bit-addressable store
//! (Redis strings via BITFIELD in production). Answers "possibly present" /
//! "definitely absent" for large key sets with a bounded false positive
//! rate and no false negatives.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `derive`: (n, p) -> (m, k)
//!   - `fnv1a_32`, `murmur3_32`, `HashPair`: the two independent hashes
//!   - `compute_positions`: enhanced double hashing, `h1 + i*h2 + i^2 mod m`
//!   - `FilterOptions` / `FilterOptionsBuilder` / `FilterConfig`
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: Driving port (add / exists / release / args)
//!   - `BitStore`: Driven port (batched set-bits / get-bits / delete)
//!
//! - **Service Layer** (`service/`): `RemoteBloomFilter`
//!
//! - **Adapters Layer** (`adapters/`): `InMemoryBitStore`, `RedisBitStore`
//!   (feature `redis`)
//!
//! ## Invariants
//!
//! - m = ceil(-n*ln(p) / ln(2)^2), k = ceil(-log2(p)), fixed for the filter's life
//! - m fits in `u32`; anything larger fails construction with `CapacityExceeded`
//! - No false negatives: after `add(x)` completes, `exists(x)` is `true`
//! - One store call per `add`/`exists`, covering all k positions
//!
//! ## Usage Example
//!
//! ```
//! use remote_bloom::{InMemoryBitStore, MembershipFilter, RemoteBloomFilter};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store = Arc::new(InMemoryBitStore::new());
//! let filter = RemoteBloomFilter::new(store, "bf-users", 10_000, 0.001)?;
//!
//! filter.add(b"alice").await?;
//! assert!(filter.exists(b"alice").await?);
//!
//! println!("{}", filter.args()); // N: 10000, M: 143776, P: 0.001000, K: 10
//! filter.release().await?;
//! # Ok::<(), remote_bloom::FilterError>(())
//! # }).unwrap();
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::InMemoryBitStore;
#[cfg(feature = "redis")]
pub use adapters::RedisBitStore;
pub use domain::{
    derive, FilterArgs, FilterConfig, FilterOptions, FilterOptionsBuilder, HashFamily, HashPair,
};
pub use error::{FilterError, StoreError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{BitStore, MembershipFilter};
pub use service::RemoteBloomFilter;
