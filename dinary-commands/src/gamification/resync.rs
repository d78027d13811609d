use dinary_core::{Data, Error, Session};
use dinary_database::impls::profiles::resync_profile;
use uuid::Uuid;

use crate::CommandMeta;
use crate::utility::embeds::permission_denied_message;

pub const META: CommandMeta = CommandMeta {
    name: "resync",
    desc: "Recompute a profile's stored level from its XP total (admin only).",
    category: "admin",
    usage: "dinary resync <user_id>",
};

pub async fn resync(data: &Data, session: &Session, user_id: Uuid) -> Result<String, Error> {
    if session.require_admin().is_err() {
        return Ok(permission_denied_message().to_owned());
    }

    let reply = match resync_profile(&data.db, &data.curve, user_id).await? {
        Some(profile) => format!(
            "Profile {} is at level {} with {} XP into the level.",
            user_id, profile.level, profile.xp
        ),
        None => format!("No profile found for {}.", user_id),
    };

    Ok(reply)
}
