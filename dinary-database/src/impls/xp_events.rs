use anyhow::Context as _;
use uuid::Uuid;

use crate::database::Database;
use crate::model::gamification::{XpEvent, XpSource};

#[derive(sqlx::FromRow)]
struct XpEventRow {
    id: i64,
    user_id: Uuid,
    amount: i64,
    source: String,
    reference: Option<String>,
    created_at: i64,
}

impl TryFrom<XpEventRow> for XpEvent {
    type Error = anyhow::Error;

    fn try_from(row: XpEventRow) -> Result<Self, Self::Error> {
        let source = row
            .source
            .parse::<XpSource>()
            .with_context(|| format!("xp event {} has an unknown source", row.id))?;

        Ok(XpEvent {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            source,
            reference: row.reference,
            created_at: row.created_at,
        })
    }
}

/// Most recent XP events for a user, newest first.
pub async fn list_recent_xp_events(
    db: &Database,
    user_id: Uuid,
    limit: u32,
) -> anyhow::Result<Vec<XpEvent>> {
    let rows: Vec<XpEventRow> = sqlx::query_as(
        "SELECT id, user_id, amount, source, reference, created_at
         FROM xp_events
         WHERE user_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2",
    )
    .bind(user_id)
    .bind(i64::from(limit.max(1)))
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(XpEvent::try_from).collect()
}

/// Lifetime XP per source for a user, largest first.
pub async fn xp_totals_by_source(
    db: &Database,
    user_id: Uuid,
) -> anyhow::Result<Vec<(XpSource, i64)>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT source, SUM(amount)::BIGINT AS total
         FROM xp_events
         WHERE user_id = $1
         GROUP BY source
         ORDER BY total DESC, source ASC",
    )
    .bind(user_id)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter()
        .map(|(source, total)| -> anyhow::Result<(XpSource, i64)> {
            Ok((source.parse()?, total))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::XpEventRow;
    use crate::model::gamification::{XpEvent, XpSource};

    fn row(source: &str) -> XpEventRow {
        XpEventRow {
            id: 7,
            user_id: Uuid::nil(),
            amount: 25,
            source: source.to_owned(),
            reference: Some("pay_123".to_owned()),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn rows_convert_to_events() {
        let event = XpEvent::try_from(row("referral")).unwrap();
        assert_eq!(event.source, XpSource::Referral);
        assert_eq!(event.amount, 25);
        assert_eq!(event.reference.as_deref(), Some("pay_123"));
    }

    #[test]
    fn unknown_sources_are_errors() {
        let err = XpEvent::try_from(row("lottery")).unwrap_err();
        assert!(err.to_string().contains("xp event 7"));
    }
}
