pub mod profiles;
pub mod xp_events;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;

pub(crate) fn now_unix_secs() -> anyhow::Result<i64> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs());
    i64::try_from(secs).context("current time out of i64 range")
}
