//! Inbound Ports (Driving Ports)
//!
//! The API callers use to talk to a filter.

use async_trait::async_trait;

use crate::domain::FilterArgs;
use crate::error::FilterError;

/// Probabilistic set membership over a remote bit array (Driving Port)
///
/// - `exists` never returns `false` for a key whose `add` completed
/// - `exists` may return `true` for a key never added, at roughly the
///   configured false positive rate once `capacity` keys are in
/// - there is no single-key removal
#[async_trait]
pub trait MembershipFilter: Send + Sync {
    /// Insert a key. Adding the same key twice is the same as adding it once.
    async fn add(&self, key: &[u8]) -> Result<(), FilterError>;

    /// Test a key: `false` means definitely absent, `true` means possibly present.
    async fn exists(&self, key: &[u8]) -> Result<bool, FilterError>;

    /// Delete the backing bit array. The filter is unusable once this succeeds;
    /// on failure it stays usable and the release can be retried.
    async fn release(&self) -> Result<(), FilterError>;

    /// Derived `(n, m, p, k)`
    fn args(&self) -> FilterArgs;
}
