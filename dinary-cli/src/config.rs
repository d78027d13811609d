use std::env;
use std::time::Duration;

use anyhow::Context as _;
use dinary_database::cache::DEFAULT_PROFILE_CACHE_TTL;
use dinary_progression::{BASE_XP, GROWTH_RATE, XpCurve};

/// Runtime settings read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub redis_enabled: bool,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,
    pub profile_cache_ttl: Duration,
    pub auto_run_migrations: bool,
    pub curve: XpCurve,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let text = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let base_xp = env_u64(text("DINARY_XP_BASE"), BASE_XP);
        let growth_rate = match text("DINARY_XP_GROWTH") {
            Some(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("DINARY_XP_GROWTH is not a number: `{raw}`"))?,
            None => GROWTH_RATE,
        };
        let curve = XpCurve::new(base_xp, growth_rate)?;

        let max_connections = env_u64(text("DATABASE_MAX_CONNECTIONS"), 5).clamp(1, 100);

        Ok(Self {
            database_url: text("DATABASE_URL"),
            database_max_connections: u32::try_from(max_connections)
                .context("DATABASE_MAX_CONNECTIONS out of u32 range")?,
            redis_enabled: env_bool(text("REDIS_ENABLED"), false),
            redis_url: text("REDIS_URL"),
            redis_key_prefix: text("REDIS_KEY_PREFIX").unwrap_or_else(|| "dinary:prod".to_owned()),
            profile_cache_ttl: Duration::from_secs(env_u64(
                text("PROFILE_CACHE_TTL_SECONDS"),
                DEFAULT_PROFILE_CACHE_TTL.as_secs(),
            )),
            auto_run_migrations: env_bool(text("AUTO_RUN_MIGRATIONS"), true),
            curve,
        })
    }

    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set for commands that read or write profiles")
    }
}

fn env_bool(value: Option<String>, default: bool) -> bool {
    match value {
        Some(value) => matches!(
            value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => default,
    }
}

fn env_u64(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}
