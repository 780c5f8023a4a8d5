//! Redis-backed bit store
//!
//! One `BITFIELD` command per batch (`SET u1 <offset> 1` / `GET u1 <offset>`
//! repeated for every offset), so a batch is a single round trip and Redis
//! applies it atomically. Release maps to `DEL`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{Client, Cmd, RedisError};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::ports::BitStore;

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
            StoreError::ConnectionError(err.to_string())
        } else {
            StoreError::CommandError(err.to_string())
        }
    }
}

/// `BitStore` over a multiplexed Redis connection
#[derive(Clone)]
pub struct RedisBitStore {
    connection: MultiplexedConnection,
}

impl RedisBitStore {
    /// Connect to `url` (e.g. `redis://localhost:6379`)
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)?;
        let connection = client.get_multiplexed_tokio_connection().await?;
        debug!(url = url, "Connected to Redis bit store");
        Ok(Self { connection })
    }

    /// Wrap an already established connection
    pub fn from_connection(connection: MultiplexedConnection) -> Self {
        Self { connection }
    }
}

pub(crate) fn set_bits_command(identifier: &str, offsets: &[u32]) -> Cmd {
    let mut cmd = redis::cmd("BITFIELD");
    cmd.arg(identifier);
    for &offset in offsets {
        cmd.arg("SET").arg("u1").arg(offset).arg(1);
    }
    cmd
}

pub(crate) fn get_bits_command(identifier: &str, offsets: &[u32]) -> Cmd {
    let mut cmd = redis::cmd("BITFIELD");
    cmd.arg(identifier);
    for &offset in offsets {
        cmd.arg("GET").arg("u1").arg(offset);
    }
    cmd
}

/// Turn a BITFIELD GET reply into bits, checking its shape
pub(crate) fn decode_bits(reply: Vec<i64>, expected: usize) -> Result<Vec<bool>, StoreError> {
    if reply.len() != expected {
        warn!(
            expected = expected,
            received = reply.len(),
            "BITFIELD reply length mismatch"
        );
        return Err(StoreError::UnexpectedReply(format!(
            "expected {} values, got {}",
            expected,
            reply.len()
        )));
    }
    reply
        .into_iter()
        .map(|value| match value {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(StoreError::UnexpectedReply(format!(
                "u1 field holds {}",
                other
            ))),
        })
        .collect()
}

#[async_trait]
impl BitStore for RedisBitStore {
    async fn set_bits(&self, identifier: &str, offsets: &[u32]) -> Result<(), StoreError> {
        if offsets.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection.clone();
        // Reply holds the previous values, which set semantics do not need.
        let _previous: Vec<i64> = set_bits_command(identifier, offsets)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn get_bits(&self, identifier: &str, offsets: &[u32]) -> Result<Vec<bool>, StoreError> {
        if offsets.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection.clone();
        let reply: Vec<i64> = get_bits_command(identifier, offsets)
            .query_async(&mut conn)
            .await?;
        decode_bits(reply, offsets.len())
    }

    async fn delete(&self, identifier: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        let removed: i64 = redis::cmd("DEL")
            .arg(identifier)
            .query_async(&mut conn)
            .await?;
        debug!(identifier = identifier, removed = removed, "Deleted bit array");
        Ok(())
    }
}
