use std::time::Duration;

use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// JSON documents in Redis, each written with an expiry.
#[derive(Clone, Debug)]
pub struct RedisCacheStore {
    pool: Pool,
}

impl RedisCacheStore {
    /// Builds the pool lazily; nothing connects until the first command.
    pub fn from_url(redis_url: &str) -> anyhow::Result<Self> {
        let pool = Config::from_url(redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| anyhow::anyhow!("invalid redis url: {e}"))?;

        Ok(Self { pool })
    }

    async fn connection(&self) -> anyhow::Result<Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| anyhow::anyhow!("redis pool exhausted or unreachable: {e}"))
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.connection().await?;
        let reply = redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!("redis PING failed: {e}"))?;

        anyhow::ensure!(reply == "PONG", "unexpected PING reply `{reply}`");
        Ok(())
    }

    pub async fn fetch_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let mut conn = self.connection().await?;
        let Some(raw) = conn
            .get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| anyhow::anyhow!("reading `{key}` from redis failed: {e}"))?
        else {
            return Ok(None);
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|e| anyhow::anyhow!("cached value under `{key}` is not valid json: {e}"))
    }

    pub async fn store_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("encoding `{key}` for redis failed: {e}"))?;

        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, payload, expiry_seconds(ttl))
            .await
            .map_err(|e| anyhow::anyhow!("writing `{key}` to redis failed: {e}"))
    }

    /// Returns whether a key was actually removed.
    pub async fn remove(&self, key: &str) -> anyhow::Result<bool> {
        let mut conn = self.connection().await?;
        let removed = conn
            .del::<_, u64>(key)
            .await
            .map_err(|e| anyhow::anyhow!("deleting `{key}` from redis failed: {e}"))?;

        Ok(removed > 0)
    }
}

/// SETEX rejects a zero expiry, so sub-second TTLs round up to one second.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}
