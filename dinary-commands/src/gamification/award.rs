use anyhow::Context as _;
use dinary_core::{Data, Error, Session};
use dinary_database::impls::profiles::award_xp;
use dinary_database::model::gamification::XpSource;
use tracing::{info, warn};
use uuid::Uuid;

use crate::CommandMeta;
use crate::gamification::cards::award_message;
use crate::utility::embeds::{permission_denied_message, usage_message};

pub const META: CommandMeta = CommandMeta {
    name: "award",
    desc: "Award XP to a user (admin only).",
    category: "admin",
    usage: "dinary award <user_id> <amount> <payment|referral|challenge|manual> [reference]",
};

pub async fn award(
    data: &Data,
    session: &Session,
    user_id: Uuid,
    amount: i64,
    source: XpSource,
    reference: Option<&str>,
) -> Result<String, Error> {
    if session.require_admin().is_err() {
        warn!(caller = %session.user_id, role = %session.role, "xp award denied");
        return Ok(permission_denied_message().to_owned());
    }

    if amount <= 0 {
        return Ok(format!(
            "Amount must be positive.\n{}",
            usage_message(META.usage)
        ));
    }

    let reference = reference.map(str::trim).filter(|value| !value.is_empty());
    let award = award_xp(&data.db, &data.curve, user_id, amount, source, reference).await?;

    info!(
        caller = %session.user_id,
        %user_id,
        amount,
        source = %source,
        "xp awarded by admin"
    );

    let amount = u64::try_from(amount).context("amount out of u64 range")?;
    let total_xp = u64::try_from(award.profile.total_xp).context("total_xp out of u64 range")?;
    Ok(award_message(&award, amount, total_xp))
}
