//! # Integration Tests
//!
//! Cross-layer flows: domain + service + in-memory adapter.

pub mod concurrency;
pub mod end_to_end;

/// Route `tracing` output to the test harness when `RUST_LOG` is set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
