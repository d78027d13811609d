use dinary_core::{Data, Error, Session};
use dinary_database::impls::xp_events::{list_recent_xp_events, xp_totals_by_source};
use dinary_progression::formatting::format_xp;
use uuid::Uuid;

use crate::CommandMeta;
use crate::gamification::cards::history_lines;
use crate::utility::embeds::permission_denied_message;

pub const META: CommandMeta = CommandMeta {
    name: "history",
    desc: "Show recent XP events (defaults to your own).",
    category: "profile",
    usage: "dinary history [user_id] [limit]",
};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub async fn history(
    data: &Data,
    session: &Session,
    user: Option<Uuid>,
    limit: Option<u32>,
    now: i64,
) -> Result<String, Error> {
    let user_id = user.unwrap_or(session.user_id);
    if !session.can_view(user_id) {
        return Ok(permission_denied_message().to_owned());
    }

    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let events = list_recent_xp_events(&data.db, user_id, limit).await?;
    let totals = xp_totals_by_source(&data.db, user_id).await?;

    let mut out = format!("XP history for {}\n{}", user_id, history_lines(&events, now));
    if !totals.is_empty() {
        let breakdown = totals
            .iter()
            .map(|(source, total)| {
                format!("{} {}", source, format_xp(u64::try_from(*total).unwrap_or(0)))
            })
            .collect::<Vec<_>>()
            .join(" · ");
        out.push_str(&format!("\n\nLifetime: {}", breakdown));
    }

    Ok(out)
}
