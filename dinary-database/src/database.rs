use anyhow::Context as _;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::cache::CacheService;

/// Compile-time discovered SQLx migrations for the `dinary-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Pool plus cache, cloned into every caller that queries profiles.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    cache: CacheService,
}

impl Database {
    /// Open a PostgreSQL pool and pair it with `cache`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        cache: CacheService,
    ) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await
            .context("failed to connect to PostgreSQL")?;

        Ok(Self::with_cache(pool, cache))
    }

    pub fn with_cache(pool: PgPool, cache: CacheService) -> Self {
        Self { pool, cache }
    }

    /// Apply any pending embedded migrations.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("failed to apply database migrations")
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }
}
