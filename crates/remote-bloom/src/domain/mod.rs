//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Parameter derivation (m, k from n, p)
//! - Hash functions (FNV-1a, Murmur3) and hash pair selection
//! - Position generation (enhanced double hashing)
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod config;
pub mod hash_functions;
pub mod parameters;
pub mod positions;

pub use config::{
    FilterArgs, FilterConfig, FilterOptions, FilterOptionsBuilder, DEFAULT_ADD_TIMEOUT,
    DEFAULT_EXISTS_TIMEOUT, DEFAULT_RELEASE_TIMEOUT,
};
pub use hash_functions::{fnv1a_32, murmur3_32, HashFamily, HashPair};
pub use parameters::{derive, expected_fpr, BloomFilterParams, MAX_BIT_COUNT};
pub use positions::{compute_positions, positions_from_hashes};
