use serde::{Deserialize, Serialize};

use crate::curve::{LevelProgress, XpCurve};
use crate::error::ProgressionError;
use crate::rewards::rewards_for;
use crate::tiers::tier_for;

/// Everything a profile view needs to display a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u32,
    pub xp_in_current_level: u64,
    pub xp_to_next_level: u64,
    pub title: String,
    pub emoji: String,
    pub rewards: Vec<String>,
}

impl From<LevelProgress> for LevelInfo {
    fn from(progress: LevelProgress) -> Self {
        let tier = tier_for(progress.level);
        Self {
            level: progress.level,
            xp_in_current_level: progress.xp_in_current_level,
            xp_to_next_level: progress.xp_to_next_level,
            title: tier.title.to_owned(),
            emoji: tier.emoji.to_owned(),
            rewards: rewards_for(progress.level),
        }
    }
}

impl LevelInfo {
    pub fn progress(&self) -> LevelProgress {
        LevelProgress {
            level: self.level,
            xp_in_current_level: self.xp_in_current_level,
            xp_to_next_level: self.xp_to_next_level,
        }
    }
}

impl XpCurve {
    pub fn level_info(&self, total_xp: i64) -> Result<LevelInfo, ProgressionError> {
        self.resolve_level(total_xp).map(LevelInfo::from)
    }
}

/// Full level presentation for `total_xp` on the canonical curve.
pub fn level_info(total_xp: i64) -> Result<LevelInfo, ProgressionError> {
    XpCurve::default().level_info(total_xp)
}
