use std::fmt;
use std::str::FromStr;

use dinary_progression::{LevelInfo, ProgressionError, XpCurve};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted gamification state for one user. `level` and `xp` are derived
/// from `total_xp` and rewritten on every change.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct GamificationProfile {
    pub user_id: Uuid,
    pub total_xp: i64,
    pub level: i32,
    pub xp: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl GamificationProfile {
    /// Re-derive the level presentation from `total_xp`.
    pub fn level_info(&self, curve: &XpCurve) -> Result<LevelInfo, ProgressionError> {
        curve.level_info(self.total_xp)
    }
}

/// Where an XP award came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpSource {
    Payment,
    Referral,
    Challenge,
    Manual,
}

impl XpSource {
    pub const ALL: [XpSource; 4] = [
        XpSource::Payment,
        XpSource::Referral,
        XpSource::Challenge,
        XpSource::Manual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            XpSource::Payment => "payment",
            XpSource::Referral => "referral",
            XpSource::Challenge => "challenge",
            XpSource::Manual => "manual",
        }
    }
}

impl fmt::Display for XpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for XpSource {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        XpSource::ALL
            .into_iter()
            .find(|source| source.as_str() == normalized)
            .ok_or_else(|| anyhow::anyhow!("unknown xp source `{}`", raw.trim()))
    }
}

/// One entry of the append-only XP ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpEvent {
    pub id: i64,
    pub user_id: Uuid,
    pub amount: i64,
    pub source: XpSource,
    pub reference: Option<String>,
    pub created_at: i64,
}

/// Result of awarding XP to a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpAward {
    pub profile: GamificationProfile,
    pub previous_level: u32,
    pub new_level: u32,
    pub unlocked_rewards: Vec<String>,
}

impl XpAward {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}
