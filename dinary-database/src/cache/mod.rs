mod redis_store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use redis_store::RedisCacheStore;

/// How long a profile read stays cached unless configured otherwise.
pub const DEFAULT_PROFILE_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled,
    Redis(RedisCacheStore),
}

#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
    profile_ttl: Duration,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled,
            profile_ttl: DEFAULT_PROFILE_CACHE_TTL,
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
            profile_ttl: DEFAULT_PROFILE_CACHE_TTL,
        })
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    pub fn configure_profile_ttl(&mut self, ttl: Duration) {
        self.profile_ttl = ttl.max(Duration::from_secs(1));
    }

    pub fn profile_ttl(&self) -> Duration {
        self.profile_ttl
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match &self.backend {
            CacheBackend::Disabled => Ok(None),
            CacheBackend::Redis(store) => store.fetch_json(key).await,
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        match &self.backend {
            CacheBackend::Disabled => Ok(()),
            CacheBackend::Redis(store) => store.store_json(key, value, ttl).await,
        }
    }

    /// Returns whether an entry was present.
    pub async fn del(&self, key: &str) -> anyhow::Result<bool> {
        match &self.backend {
            CacheBackend::Disabled => Ok(false),
            CacheBackend::Redis(store) => store.remove(key).await,
        }
    }

    /// Drop a key, logging instead of failing. Used after writes have committed.
    pub async fn invalidate(&self, key: &str) {
        match self.del(key).await {
            Ok(true) => debug!(cache_key = key, "cache entry invalidated"),
            Ok(false) => {}
            Err(e) => warn!(?e, cache_key = key, "cache invalidation failed; entry will expire by ttl"),
        }
    }

    pub async fn get_or_load_json<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(
                ?e,
                cache_key = key,
                "cache get failed; falling back to database"
            ),
        }

        let loaded = loader().await?;

        if let Err(e) = self.set_json(key, &loaded, ttl).await {
            warn!(
                ?e,
                cache_key = key,
                "cache set failed; returning database value"
            );
        }

        Ok(loaded)
    }
}

pub fn profile_cache_key(cache: &CacheService, user_id: Uuid) -> String {
    cache.key(format!("gamification:profile:{user_id}"))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::{CacheService, DEFAULT_PROFILE_CACHE_TTL, profile_cache_key};

    #[test]
    fn keys_carry_prefix() {
        let cache = CacheService::disabled("dinary:test");
        let user_id = Uuid::nil();

        assert_eq!(cache.key("x"), "dinary:test:x");
        assert_eq!(
            profile_cache_key(&cache, user_id),
            "dinary:test:gamification:profile:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn profile_ttl_has_floor() {
        let mut cache = CacheService::disabled("dinary:test");
        assert_eq!(cache.profile_ttl(), DEFAULT_PROFILE_CACHE_TTL);
        assert!(!cache.is_redis_enabled());

        cache.configure_profile_ttl(Duration::ZERO);
        assert_eq!(cache.profile_ttl(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn disabled_cache_always_loads() {
        let cache = CacheService::disabled("dinary:test");
        cache.ping().await.unwrap();

        let first: u64 = cache
            .get_or_load_json("k", Duration::from_secs(5), || async { Ok(1) })
            .await
            .unwrap();
        let second: u64 = cache
            .get_or_load_json("k", Duration::from_secs(5), || async { Ok(2) })
            .await
            .unwrap();

        assert_eq!((first, second), (1, 2));
        assert!(!cache.del("k").await.unwrap());
        cache.invalidate("k").await;
    }

    #[test]
    fn redis_backend_is_lazy() {
        let cache = CacheService::redis("redis://127.0.0.1:6399/0", "dinary:test").unwrap();
        assert!(cache.is_redis_enabled());
        assert!(CacheService::redis("not a redis url", "dinary:test").is_err());
    }

    #[tokio::test]
    async fn loader_errors_propagate() {
        let cache = CacheService::disabled("dinary:test");
        let result: anyhow::Result<u64> = cache
            .get_or_load_json("k", Duration::from_secs(5), || async {
                Err(anyhow::anyhow!("db down"))
            })
            .await;

        assert!(result.is_err());
    }
}
