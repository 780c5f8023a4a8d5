//! Filter configuration and validation
//!
//! `FilterOptions` is what a caller chooses (capacity, error rate, timeouts,
//! hash pair). `FilterConfig` is what a filter runs with: the options plus
//! the derived `(m, k)` and the identifier of the backing bit array. It is
//! built once and never mutated.
//!
//! # Example
//!
//! ```
//! use remote_bloom::domain::FilterOptionsBuilder;
//! use std::time::Duration;
//!
//! let options = FilterOptionsBuilder::new()
//!     .capacity(10_000)
//!     .false_positive_rate(0.001)
//!     .exists_timeout(Duration::from_millis(500))
//!     .build()
//!     .expect("valid options");
//! assert_eq!(options.capacity, 10_000);
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::hash_functions::HashPair;
use super::parameters::{derive, BloomFilterParams};
use crate::error::FilterError;

/// Default timeout for a batched set-bits request
pub const DEFAULT_ADD_TIMEOUT: Duration = Duration::from_secs(2);
/// Default timeout for a batched get-bits request
pub const DEFAULT_EXISTS_TIMEOUT: Duration = Duration::from_secs(1);
/// Default timeout for deleting the backing bit array
pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_secs(1);

/// Caller-chosen filter options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Expected number of unique items (n)
    pub capacity: u32,
    /// Target false positive rate (p), in (0, 1)
    pub false_positive_rate: f64,
    /// Timeout for `add`
    pub add_timeout: Duration,
    /// Timeout for `exists`
    pub exists_timeout: Duration,
    /// Timeout for `release`
    pub release_timeout: Duration,
    /// Hash functions feeding double hashing
    pub hashes: HashPair,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            false_positive_rate: 0.001,
            add_timeout: DEFAULT_ADD_TIMEOUT,
            exists_timeout: DEFAULT_EXISTS_TIMEOUT,
            release_timeout: DEFAULT_RELEASE_TIMEOUT,
            hashes: HashPair::default(),
        }
    }
}

impl FilterOptions {
    /// Options for `capacity` items at `false_positive_rate`, default timeouts
    pub fn new(capacity: u32, false_positive_rate: f64) -> Self {
        Self {
            capacity,
            false_positive_rate,
            ..Default::default()
        }
    }

    /// Validate the options and derive `(m, k)` from them
    pub fn validate(&self) -> Result<BloomFilterParams, FilterError> {
        for (name, timeout) in [
            ("add_timeout", self.add_timeout),
            ("exists_timeout", self.exists_timeout),
            ("release_timeout", self.release_timeout),
        ] {
            if timeout.is_zero() {
                return Err(FilterError::InvalidParameters(format!(
                    "{} cannot be zero",
                    name
                )));
            }
        }
        self.hashes.validate()?;
        derive(self.capacity, self.false_positive_rate)
    }
}

/// Fluent builder for `FilterOptions`
#[derive(Default)]
pub struct FilterOptionsBuilder {
    capacity: Option<u32>,
    false_positive_rate: Option<f64>,
    add_timeout: Option<Duration>,
    exists_timeout: Option<Duration>,
    release_timeout: Option<Duration>,
    hashes: Option<HashPair>,
}

impl FilterOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expected number of unique items
    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Target false positive rate, in (0, 1)
    pub fn false_positive_rate(mut self, p: f64) -> Self {
        self.false_positive_rate = Some(p);
        self
    }

    pub fn add_timeout(mut self, timeout: Duration) -> Self {
        self.add_timeout = Some(timeout);
        self
    }

    pub fn exists_timeout(mut self, timeout: Duration) -> Self {
        self.exists_timeout = Some(timeout);
        self
    }

    pub fn release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = Some(timeout);
        self
    }

    /// Hash pair used for double hashing
    pub fn hashes(mut self, hashes: HashPair) -> Self {
        self.hashes = Some(hashes);
        self
    }

    /// Build the options, validating every field
    pub fn build(self) -> Result<FilterOptions, FilterError> {
        let defaults = FilterOptions::default();

        let options = FilterOptions {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            false_positive_rate: self
                .false_positive_rate
                .unwrap_or(defaults.false_positive_rate),
            add_timeout: self.add_timeout.unwrap_or(defaults.add_timeout),
            exists_timeout: self.exists_timeout.unwrap_or(defaults.exists_timeout),
            release_timeout: self.release_timeout.unwrap_or(defaults.release_timeout),
            hashes: self.hashes.unwrap_or(defaults.hashes),
        };

        options.validate()?;
        Ok(options)
    }
}

/// Immutable configuration of a live filter
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterConfig {
    identifier: String,
    options: FilterOptions,
    params: BloomFilterParams,
}

impl FilterConfig {
    /// Validate `options` and derive the filter's parameters
    ///
    /// # Errors
    /// `CapacityExceeded` when m does not fit the store's offset range,
    /// `InvalidParameters` for any other invalid option.
    pub fn new(identifier: impl Into<String>, options: FilterOptions) -> Result<Self, FilterError> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(FilterError::InvalidParameters(
                "identifier cannot be empty".to_string(),
            ));
        }
        let params = options.validate()?;
        Ok(Self {
            identifier,
            options,
            params,
        })
    }

    /// Name of the backing bit array in the store
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// n
    pub fn capacity(&self) -> u32 {
        self.options.capacity
    }

    /// p
    pub fn false_positive_rate(&self) -> f64 {
        self.options.false_positive_rate
    }

    /// m
    pub fn bit_count(&self) -> u32 {
        self.params.bit_count
    }

    /// k
    pub fn hash_count(&self) -> u32 {
        self.params.hash_count
    }

    pub fn hashes(&self) -> &HashPair {
        &self.options.hashes
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Diagnostic view of `(n, m, p, k)`
    pub fn args(&self) -> FilterArgs {
        FilterArgs {
            n: self.capacity(),
            m: self.bit_count(),
            p: self.false_positive_rate(),
            k: self.hash_count(),
        }
    }
}

/// Derived filter arguments, for logging and debugging
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterArgs {
    pub n: u32,
    pub m: u32,
    pub p: f64,
    pub k: u32,
}

impl fmt::Display for FilterArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N: {}, M: {}, P: {:.6}, K: {}", self.n, self.m, self.p, self.k)
    }
}
