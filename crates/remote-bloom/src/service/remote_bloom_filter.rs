//! Remote Bloom Filter Service
//!
//! Holds the immutable `FilterConfig` and a handle to the bit store. Each
//! `add`/`exists` computes the k positions locally and issues exactly one
//! batched store call, bounded by the configured timeout. Nothing is
//! retried here; errors go straight back to the caller.
//!
//! Lifecycle: `Active` from construction, `Releasing` while the delete is in
//! flight, `Released` after it succeeds. A failed delete goes back to
//! `Active`. Released is terminal.

use async_trait::async_trait;
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::domain::{compute_positions, FilterArgs, FilterConfig, FilterOptions};
use crate::error::{FilterError, StoreError};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{BitStore, MembershipFilter};

const ACTIVE: u8 = 0;
const RELEASING: u8 = 1;
const RELEASED: u8 = 2;

/// Bloom filter whose bit array lives in a remote `BitStore`
pub struct RemoteBloomFilter<S: BitStore> {
    store: S,
    config: FilterConfig,
    state: AtomicU8,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: BitStore> RemoteBloomFilter<S> {
    /// Create a filter for `capacity` items at `false_positive_rate`,
    /// backed by the bit array named `identifier`.
    ///
    /// # Errors
    /// `CapacityExceeded` if the derived bit count does not fit in `u32`.
    pub fn new(
        store: S,
        identifier: impl Into<String>,
        capacity: u32,
        false_positive_rate: f64,
    ) -> Result<Self, FilterError> {
        Self::with_options(
            store,
            identifier,
            FilterOptions::new(capacity, false_positive_rate),
        )
    }

    /// Create a filter with explicit options (timeouts, hash pair)
    pub fn with_options(
        store: S,
        identifier: impl Into<String>,
        options: FilterOptions,
    ) -> Result<Self, FilterError> {
        let config = FilterConfig::new(identifier, options)?;

        debug!(
            identifier = %config.identifier(),
            n = config.capacity(),
            m = config.bit_count(),
            p = config.false_positive_rate(),
            k = config.hash_count(),
            "Created remote Bloom filter"
        );

        Ok(Self {
            store,
            config,
            state: AtomicU8::new(ACTIVE),
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Attach a metrics recorder; counts this filter as created on it
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        metrics.record_filter_created(self.config.bit_count(), self.config.hash_count());
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn identifier(&self) -> &str {
        self.config.identifier()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True once a `release()` has deleted the backing array
    pub fn is_released(&self) -> bool {
        self.state.load(Ordering::Acquire) == RELEASED
    }

    /// The k bit offsets `key` maps to, in probe order
    pub fn positions(&self, key: &[u8]) -> Vec<u32> {
        compute_positions(
            key,
            self.config.hashes(),
            self.config.hash_count(),
            self.config.bit_count(),
        )
    }

    /// Add every key in order, stopping at the first failure.
    ///
    /// Returns how many keys were added. Each key is still its own store call.
    pub async fn add_all<I, K>(&self, keys: I) -> Result<usize, FilterError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let mut added = 0;
        for key in keys {
            self.add(key.as_ref()).await?;
            added += 1;
        }
        Ok(added)
    }

    /// A pending release does not block use; only a completed one does.
    fn ensure_active(&self) -> Result<(), FilterError> {
        if self.is_released() {
            return Err(FilterError::UseAfterRelease {
                identifier: self.identifier().to_string(),
            });
        }
        Ok(())
    }

    /// Run one store call under a deadline
    async fn call_store<T, F>(
        &self,
        operation: &'static str,
        limit: Duration,
        request: F,
    ) -> Result<T, FilterError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        let result = match timeout(limit, request).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                operation,
                timeout: limit,
            }),
        };
        result.map_err(|err| {
            self.metrics.record_store_error();
            FilterError::Transport(err)
        })
    }
}

#[async_trait]
impl<S: BitStore> MembershipFilter for RemoteBloomFilter<S> {
    async fn add(&self, key: &[u8]) -> Result<(), FilterError> {
        self.ensure_active()?;

        let start = Instant::now();
        let offsets = self.positions(key);
        trace!(identifier = %self.identifier(), positions = offsets.len(), "add");

        self.call_store(
            "set_bits",
            self.config.options().add_timeout,
            self.store.set_bits(self.identifier(), &offsets),
        )
        .await?;

        self.metrics.record_insert(start.elapsed());
        Ok(())
    }

    async fn exists(&self, key: &[u8]) -> Result<bool, FilterError> {
        self.ensure_active()?;

        let start = Instant::now();
        let offsets = self.positions(key);
        trace!(identifier = %self.identifier(), positions = offsets.len(), "exists");

        let bits = self
            .call_store(
                "get_bits",
                self.config.options().exists_timeout,
                self.store.get_bits(self.identifier(), &offsets),
            )
            .await?;

        if bits.len() != offsets.len() {
            self.metrics.record_store_error();
            return Err(StoreError::UnexpectedReply(format!(
                "asked for {} bits, got {}",
                offsets.len(),
                bits.len()
            ))
            .into());
        }

        // A single zero bit proves absence.
        let found = bits.iter().all(|&bit| bit);
        self.metrics.record_lookup(start.elapsed(), found);
        Ok(found)
    }

    async fn release(&self) -> Result<(), FilterError> {
        if self
            .state
            .compare_exchange(ACTIVE, RELEASING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FilterError::UseAfterRelease {
                identifier: self.identifier().to_string(),
            });
        }

        let result = self
            .call_store(
                "delete",
                self.config.options().release_timeout,
                self.store.delete(self.identifier()),
            )
            .await;

        match result {
            Ok(()) => {
                self.state.store(RELEASED, Ordering::Release);
                debug!(identifier = %self.identifier(), "Released remote Bloom filter");
                self.metrics.record_filter_released();
                Ok(())
            }
            Err(err) => {
                // The array may still exist; leave the filter usable so the
                // caller can retry the release.
                self.state.store(ACTIVE, Ordering::Release);
                Err(err)
            }
        }
    }

    fn args(&self) -> FilterArgs {
        self.config.args()
    }
}
