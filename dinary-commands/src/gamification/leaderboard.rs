use dinary_core::{Data, Error};
use dinary_database::impls::profiles::{clamp_leaderboard_limit, leaderboard as top_profiles};

use crate::CommandMeta;
use crate::gamification::cards::leaderboard_lines;

pub const META: CommandMeta = CommandMeta {
    name: "leaderboard",
    desc: "Show the profiles with the most XP.",
    category: "profile",
    usage: "dinary leaderboard [limit]",
};

const DEFAULT_LIMIT: u32 = 10;

pub async fn leaderboard(data: &Data, limit: Option<u32>) -> Result<String, Error> {
    let limit = clamp_leaderboard_limit(limit.unwrap_or(DEFAULT_LIMIT));
    let profiles = top_profiles(&data.db, limit).await?;

    let mut entries = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let info = profile.level_info(&data.curve)?;
        entries.push((profile, info));
    }

    Ok(format!(
        "Top {} by XP\n{}",
        limit,
        leaderboard_lines(&entries)
    ))
}
