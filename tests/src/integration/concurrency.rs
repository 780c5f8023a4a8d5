//! # Concurrent Access
//!
//! Position computation is pure, and setting a bit to 1 commutes, so
//! concurrent adds and lookups on one filter need no coordination.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use remote_bloom::{InMemoryBitStore, MembershipFilter, RemoteBloomFilter};

    const WRITERS: usize = 8;
    const KEYS_PER_WRITER: usize = 500;

    fn key(writer: usize, i: usize) -> Vec<u8> {
        format!("writer_{}_key_{}", writer, i).into_bytes()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_lose_no_keys() {
        let store = Arc::new(InMemoryBitStore::new());
        let filter = Arc::new(
            RemoteBloomFilter::new(store, "bf-concurrent", (WRITERS * KEYS_PER_WRITER) as u32, 0.01)
                .unwrap(),
        );

        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let filter = filter.clone();
                tokio::spawn(async move {
                    for i in 0..KEYS_PER_WRITER {
                        filter.add(&key(writer, i)).await.unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        for writer in 0..WRITERS {
            for i in 0..KEYS_PER_WRITER {
                assert!(filter.exists(&key(writer, i)).await.unwrap());
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_lookups_during_inserts() {
        let store = Arc::new(InMemoryBitStore::new());
        let filter = Arc::new(RemoteBloomFilter::new(store, "bf-mixed", 2_000, 0.01).unwrap());

        // Keys added before the readers start must always be visible.
        for i in 0..KEYS_PER_WRITER {
            filter.add(&key(0, i)).await.unwrap();
        }

        let writer = {
            let filter = filter.clone();
            tokio::spawn(async move {
                for i in 0..KEYS_PER_WRITER {
                    filter.add(&key(1, i)).await.unwrap();
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let filter = filter.clone();
                tokio::spawn(async move {
                    for i in 0..KEYS_PER_WRITER {
                        assert!(filter.exists(&key(0, i)).await.unwrap());
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
