use anyhow::Context as _;
use dinary_progression::{LevelProgress, XpCurve, rewards_unlocked_between};
use sqlx::PgExecutor;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::profile_cache_key;
use crate::database::Database;
use crate::impls::now_unix_secs;
use crate::model::gamification::{GamificationProfile, XpAward, XpSource};

/// Upper bound for leaderboard queries.
pub const MAX_LEADERBOARD_LIMIT: u32 = 50;

async fn insert_profile_if_missing<'e, E>(executor: E, user_id: Uuid, now: i64) -> anyhow::Result<bool>
where
    E: PgExecutor<'e>,
{
    let inserted = sqlx::query(
        "INSERT INTO gamification_profiles (user_id, total_xp, level, xp, created_at, updated_at)
         VALUES ($1, 0, 1, 0, $2, $2)
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(now)
    .execute(executor)
    .await?
    .rows_affected();

    Ok(inserted > 0)
}

async fn fetch_profile<'e, E>(executor: E, user_id: Uuid) -> anyhow::Result<Option<GamificationProfile>>
where
    E: PgExecutor<'e>,
{
    let profile = sqlx::query_as::<_, GamificationProfile>(
        "SELECT user_id, total_xp, level, xp, created_at, updated_at
         FROM gamification_profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(profile)
}

async fn lock_profile<'e, E>(executor: E, user_id: Uuid) -> anyhow::Result<Option<GamificationProfile>>
where
    E: PgExecutor<'e>,
{
    let profile = sqlx::query_as::<_, GamificationProfile>(
        "SELECT user_id, total_xp, level, xp, created_at, updated_at
         FROM gamification_profiles WHERE user_id = $1
         FOR UPDATE",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(profile)
}

async fn write_progress<'e, E>(
    executor: E,
    user_id: Uuid,
    total_xp: i64,
    progress: &LevelProgress,
    now: i64,
) -> anyhow::Result<GamificationProfile>
where
    E: PgExecutor<'e>,
{
    let (level, xp) = derived_columns(progress)?;

    let profile = sqlx::query_as::<_, GamificationProfile>(
        "UPDATE gamification_profiles
         SET total_xp = $2, level = $3, xp = $4, updated_at = $5
         WHERE user_id = $1
         RETURNING user_id, total_xp, level, xp, created_at, updated_at",
    )
    .bind(user_id)
    .bind(total_xp)
    .bind(level)
    .bind(xp)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(profile)
}

/// Convert resolved progress into the `level` / `xp` column values.
fn derived_columns(progress: &LevelProgress) -> anyhow::Result<(i32, i64)> {
    let level = i32::try_from(progress.level).context("level out of i32 range")?;
    let xp = i64::try_from(progress.xp_in_current_level).context("xp out of i64 range")?;
    Ok((level, xp))
}

/// Create a level-1 profile for `user_id`, or return the existing one.
pub async fn create_profile(db: &Database, user_id: Uuid) -> anyhow::Result<GamificationProfile> {
    let now = now_unix_secs()?;

    if insert_profile_if_missing(db.pool(), user_id, now).await? {
        info!(%user_id, "gamification profile created");
        db.cache()
            .invalidate(&profile_cache_key(db.cache(), user_id))
            .await;
    }

    fetch_profile(db.pool(), user_id)
        .await?
        .context("gamification profile missing after insert")
}

/// Read a profile, going through the cache when one is configured.
pub async fn get_profile(
    db: &Database,
    user_id: Uuid,
) -> anyhow::Result<Option<GamificationProfile>> {
    let cache = db.cache();
    let key = profile_cache_key(cache, user_id);

    cache
        .get_or_load_json(&key, cache.profile_ttl(), || fetch_profile(db.pool(), user_id))
        .await
}

pub async fn get_or_create_profile(
    db: &Database,
    user_id: Uuid,
) -> anyhow::Result<GamificationProfile> {
    match get_profile(db, user_id).await? {
        Some(profile) => Ok(profile),
        None => create_profile(db, user_id).await,
    }
}

/// Add `amount` XP to a profile and re-derive its level from the new total.
///
/// The profile row is locked for the duration of the transaction so
/// concurrent awards for the same user apply one after another. Missing
/// profiles are created first.
pub async fn award_xp(
    db: &Database,
    curve: &XpCurve,
    user_id: Uuid,
    amount: i64,
    source: XpSource,
    reference: Option<&str>,
) -> anyhow::Result<XpAward> {
    if amount <= 0 {
        anyhow::bail!("xp award must be positive, got {amount}");
    }

    let now = now_unix_secs()?;
    let mut tx = db.pool().begin().await?;

    insert_profile_if_missing(&mut *tx, user_id, now).await?;
    let current = lock_profile(&mut *tx, user_id)
        .await?
        .context("gamification profile missing after insert")?;

    let previous = curve
        .resolve_level(current.total_xp)
        .context("stored total_xp is invalid")?;
    let total_xp = current
        .total_xp
        .checked_add(amount)
        .context("total_xp overflow")?;
    let progress = curve.resolve_level(total_xp)?;

    let profile = write_progress(&mut *tx, user_id, total_xp, &progress, now).await?;

    sqlx::query(
        "INSERT INTO xp_events (user_id, amount, source, reference, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(amount)
    .bind(source.as_str())
    .bind(reference)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    db.cache()
        .invalidate(&profile_cache_key(db.cache(), user_id))
        .await;

    let award = XpAward {
        profile,
        previous_level: previous.level,
        new_level: progress.level,
        unlocked_rewards: rewards_unlocked_between(previous.level, progress.level),
    };

    if award.leveled_up() {
        info!(
            %user_id,
            previous_level = award.previous_level,
            new_level = award.new_level,
            "profile leveled up"
        );
    } else {
        debug!(%user_id, amount, source = %source, "xp awarded");
    }

    Ok(award)
}

/// Rewrite the cached `level` / `xp` columns from `total_xp`, e.g. after the
/// curve changed. Returns `None` when the profile does not exist.
pub async fn resync_profile(
    db: &Database,
    curve: &XpCurve,
    user_id: Uuid,
) -> anyhow::Result<Option<GamificationProfile>> {
    let mut tx = db.pool().begin().await?;

    let Some(current) = lock_profile(&mut *tx, user_id).await? else {
        return Ok(None);
    };

    let progress = curve
        .resolve_level(current.total_xp)
        .context("stored total_xp is invalid")?;
    let (level, xp) = derived_columns(&progress)?;

    if current.level == level && current.xp == xp {
        return Ok(Some(current));
    }

    let now = now_unix_secs()?;
    let profile = write_progress(&mut *tx, user_id, current.total_xp, &progress, now).await?;
    tx.commit().await?;

    db.cache()
        .invalidate(&profile_cache_key(db.cache(), user_id))
        .await;

    info!(
        %user_id,
        stale_level = current.level,
        level = profile.level,
        "gamification profile resynced"
    );

    Ok(Some(profile))
}

/// Profiles with the most XP, highest first.
pub async fn leaderboard(db: &Database, limit: u32) -> anyhow::Result<Vec<GamificationProfile>> {
    let limit = i64::from(clamp_leaderboard_limit(limit));

    let rows = sqlx::query_as::<_, GamificationProfile>(
        "SELECT user_id, total_xp, level, xp, created_at, updated_at
         FROM gamification_profiles
         ORDER BY total_xp DESC, user_id ASC
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(db.pool())
    .await?;

    Ok(rows)
}

pub fn clamp_leaderboard_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LEADERBOARD_LIMIT)
}
