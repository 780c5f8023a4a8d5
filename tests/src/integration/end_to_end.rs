//! # End-to-End Filter Flows
//!
//! Drives `RemoteBloomFilter` against the in-memory bit store the way a
//! service would: construct, bulk insert, probe, release.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    use remote_bloom::{
        FilterError, InMemoryBitStore, MembershipFilter, Metrics, RemoteBloomFilter,
    };

    use crate::integration::init_tracing;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn random_keys(rng: &mut StdRng, count: usize) -> Vec<[u8; 8]> {
        (0..count)
            .map(|_| {
                let mut key = [0u8; 8];
                rng.fill_bytes(&mut key);
                key
            })
            .collect()
    }

    // =============================================================================
    // REFERENCE SCENARIO: n = 10,000, p = 0.001
    // =============================================================================

    #[tokio::test]
    async fn test_reference_scenario_no_false_negatives_bounded_fpr() {
        init_tracing();

        let store = Arc::new(InMemoryBitStore::new());
        let metrics = Arc::new(Metrics::new());
        let filter = RemoteBloomFilter::new(store.clone(), "bf-test", 10_000, 0.001)
            .unwrap()
            .with_metrics(metrics.clone());

        let args = filter.args();
        assert_eq!(args.m, 143_776);
        assert_eq!(args.k, 10);

        let mut rng = StdRng::seed_from_u64(0x5EED);
        let inserted = random_keys(&mut rng, 10_000);
        for key in &inserted {
            filter.add(key).await.unwrap();
        }

        // No false negatives
        for key in &inserted {
            assert!(
                filter.exists(key).await.unwrap(),
                "False negative for {:02x?}",
                key
            );
        }

        // False positives over fresh keys
        let known: HashSet<[u8; 8]> = inserted.iter().copied().collect();
        metrics.reset();
        let mut false_positives = 0;
        let mut probes = 0;
        for key in random_keys(&mut rng, 10_000) {
            if known.contains(&key) {
                continue;
            }
            probes += 1;
            if filter.exists(&key).await.unwrap() {
                false_positives += 1;
            }
        }

        // Expect ~10 at p = 0.001; hundreds would mean broken hashing.
        assert!(
            false_positives <= 40,
            "{} false positives in {} probes",
            false_positives,
            probes
        );
        assert!(metrics.observed_positive_rate() < 0.004);

        filter.release().await.unwrap();
        assert!(!store.contains("bf-test").await);
    }

    #[tokio::test]
    async fn test_fill_ratio_close_to_half_at_capacity() {
        // An optimally sized filter at capacity has about half its bits set.
        let store = Arc::new(InMemoryBitStore::new());
        let filter = RemoteBloomFilter::new(store.clone(), "bf-fill", 5_000, 0.01).unwrap();

        let mut rng = StdRng::seed_from_u64(99);
        for key in random_keys(&mut rng, 5_000) {
            filter.add(&key).await.unwrap();
        }

        let ratio = store.bits_set("bf-fill").await as f64 / f64::from(filter.args().m);
        assert!(ratio > 0.40 && ratio < 0.60, "Fill ratio {}", ratio);
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_instances_with_same_parameters_share_bits() {
        let store = Arc::new(InMemoryBitStore::new());
        let writer = RemoteBloomFilter::new(store.clone(), "shared", 1_000, 0.01).unwrap();
        let reader = RemoteBloomFilter::new(store.clone(), "shared", 1_000, 0.01).unwrap();

        writer.add(b"cross-instance").await.unwrap();

        assert!(reader.exists(b"cross-instance").await.unwrap());
        assert_eq!(writer.positions(b"x"), reader.positions(b"x"));
    }

    #[tokio::test]
    async fn test_identifiers_isolate_filters() {
        let store = Arc::new(InMemoryBitStore::new());
        let a = RemoteBloomFilter::new(store.clone(), "bf-a", 1_000, 0.01).unwrap();
        let b = RemoteBloomFilter::new(store.clone(), "bf-b", 1_000, 0.01).unwrap();

        a.add(b"only-in-a").await.unwrap();
        b.add(b"only-in-b").await.unwrap();
        a.release().await.unwrap();

        assert!(!b.exists(b"only-in-a").await.unwrap());
        assert!(b.exists(b"only-in-b").await.unwrap());
        assert!(store.contains("bf-b").await);
    }

    #[tokio::test]
    async fn test_release_is_irreversible() {
        let store = Arc::new(InMemoryBitStore::new());
        let filter = RemoteBloomFilter::new(store.clone(), "bf-once", 100, 0.01).unwrap();
        filter.add(b"k").await.unwrap();
        filter.release().await.unwrap();

        for result in [filter.add(b"k").await.err(), filter.release().await.err()] {
            assert!(matches!(result, Some(FilterError::UseAfterRelease { .. })));
        }
        assert!(matches!(
            filter.exists(b"k").await,
            Err(FilterError::UseAfterRelease { .. })
        ));

        // A new filter over the same identifier starts empty
        let fresh = RemoteBloomFilter::new(store, "bf-once", 100, 0.01).unwrap();
        assert!(!fresh.exists(b"k").await.unwrap());
    }

    #[tokio::test]
    async fn test_used_through_trait_object() {
        let store = Arc::new(InMemoryBitStore::new());
        let filter: Box<dyn MembershipFilter> =
            Box::new(RemoteBloomFilter::new(store, "bf-dyn", 100, 0.05).unwrap());

        filter.add(b"dyn").await.unwrap();
        assert!(filter.exists(b"dyn").await.unwrap());
        assert_eq!(filter.args().k, 5);
    }
}
