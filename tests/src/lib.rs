//! # Remote Bloom Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── end_to_end.rs   # Reference scenario, lifecycle
//!     └── concurrency.rs  # Concurrent adds and lookups
//! tests/benches/
//! └── filter_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p remote-bloom-tests
//! RUST_LOG=remote_bloom=debug cargo test -p remote-bloom-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p remote-bloom-tests
//! ```

pub mod integration;
