//! Service Layer
//!
//! The filter façade: orchestrates domain logic and talks to the bit store
//! through the outbound port.

pub mod remote_bloom_filter;

pub use remote_bloom_filter::RemoteBloomFilter;
