use anyhow::Context as _;
use dinary_core::{Data, Error, Session};
use dinary_database::impls::profiles::get_or_create_profile;
use uuid::Uuid;

use crate::CommandMeta;
use crate::gamification::cards::profile_card;
use crate::utility::embeds::permission_denied_message;

pub const META: CommandMeta = CommandMeta {
    name: "profile",
    desc: "Show a gamification profile (defaults to your own).",
    category: "profile",
    usage: "dinary profile [user_id]",
};

pub async fn profile(data: &Data, session: &Session, user: Option<Uuid>) -> Result<String, Error> {
    let user_id = user.unwrap_or(session.user_id);
    if !session.can_view(user_id) {
        return Ok(permission_denied_message().to_owned());
    }

    let profile = get_or_create_profile(&data.db, user_id).await?;
    let info = profile.level_info(&data.curve)?;
    let total_xp = u64::try_from(profile.total_xp).context("total_xp out of u64 range")?;

    Ok(profile_card(user_id, &info, total_xp))
}
