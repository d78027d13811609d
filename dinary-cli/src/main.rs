mod cli;
mod config;

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rustls::crypto::ring::default_provider;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use dinary_commands::gamification;
use dinary_commands::utility;
use dinary_core::{Data, Session};
use dinary_database::{CacheService, Database};

use crate::cli::{Cli, Command};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // Load the .env file first so RUST_LOG from it applies.
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match AppConfig::from_env() {
        Ok(config) => run(cli, &config).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(reply) => {
            println!("{reply}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("command failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    // Logs go to stderr so command output on stdout stays clean.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<String> {
    if let Some(reply) = run_offline(&cli.command, config) {
        return Ok(reply);
    }

    let session = cli.session();

    if matches!(cli.command, Command::Migrate) {
        if !session.is_some_and(|session| session.is_admin()) {
            anyhow::bail!("migrations require --role admin");
        }
        let data = connect(config).await?;
        data.db.migrate().await?;
        info!("Database migrations applied.");
        return Ok("Migrations applied.".to_owned());
    }

    let data = connect(config).await?;

    if config.auto_run_migrations {
        data.db.migrate().await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    run_online(cli.command, &data, session).await
}

/// Commands that never touch the database.
fn run_offline(command: &Command, config: &AppConfig) -> Option<String> {
    let reply = match command {
        Command::Help { category } => utility::help::help(category.as_deref()),
        Command::Level { total_xp } => gamification::level::level(&config.curve, *total_xp),
        Command::Rewards { level } => gamification::rewards::rewards(*level),
        Command::Curve { from, count } => {
            gamification::curve::curve(&config.curve, *from, *count)
        }
        _ => return None,
    };

    Some(reply)
}

async fn run_online(
    command: Command,
    data: &Data,
    session: Option<Session>,
) -> anyhow::Result<String> {
    let require_session = || {
        session.ok_or_else(|| {
            anyhow::anyhow!("pass --user <uuid> (or --role admin) to identify the caller")
        })
    };

    match command {
        Command::Leaderboard { limit } => {
            gamification::leaderboard::leaderboard(data, limit).await
        }
        Command::Profile { user_id } => {
            gamification::profile::profile(data, &require_session()?, user_id).await
        }
        Command::Award {
            user_id,
            amount,
            source,
            reference,
        } => {
            gamification::award::award(
                data,
                &require_session()?,
                user_id,
                amount,
                source,
                reference.as_deref(),
            )
            .await
        }
        Command::History { user_id, limit } => {
            let session = require_session()?;
            gamification::history::history(data, &session, user_id, limit, now_unix_secs()).await
        }
        Command::Resync { user_id } => {
            gamification::resync::resync(data, &require_session()?, user_id).await
        }
        Command::Migrate
        | Command::Help { .. }
        | Command::Level { .. }
        | Command::Rewards { .. }
        | Command::Curve { .. } => {
            anyhow::bail!("command does not need a database session")
        }
    }
}

async fn connect(config: &AppConfig) -> anyhow::Result<Data> {
    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    let mut cache = build_cache(config);
    cache.configure_profile_ttl(config.profile_cache_ttl);

    if cache.is_redis_enabled() {
        if let Err(err) = cache.ping().await {
            warn!(
                ?err,
                "Redis cache ping failed; cache operations will continue with fallback behavior."
            );
        } else {
            info!("Redis cache health check passed.");
        }
    }

    let db = Database::connect(
        config.require_database_url()?,
        config.database_max_connections,
        cache,
    )
    .await?;
    info!("PostgreSQL connection established.");

    Ok(Data {
        db,
        curve: config.curve,
    })
}

fn build_cache(config: &AppConfig) -> CacheService {
    let prefix = config.redis_key_prefix.clone();

    if !config.redis_enabled {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        return CacheService::disabled(prefix);
    }

    let Some(redis_url) = config.redis_url.as_deref() else {
        warn!(key_prefix = %prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
        return CacheService::disabled(prefix);
    };

    match CacheService::redis(redis_url, prefix.clone()) {
        Ok(cache) => {
            info!(key_prefix = %prefix, "Redis cache enabled.");
            cache
        }
        Err(err) => {
            warn!(?err, key_prefix = %prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
            CacheService::disabled(prefix)
        }
    }
}

fn now_unix_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
}
