//! Level progression for Dinary gamification profiles.
//!
//! Every function here is a pure re-derivation from a cumulative XP total or
//! a level; nothing is cached between calls.

/// XP curve and level resolution.
pub mod curve;
/// Error type for out-of-domain inputs.
pub mod error;
/// Display helpers (XP amounts, progress bars, summary lines).
pub mod formatting;
/// Combined level presentation.
pub mod info;
/// Reward unlock tables.
pub mod rewards;
/// Title and emoji tables.
pub mod tiers;

pub use curve::{
    BASE_XP, GROWTH_RATE, LevelProgress, XpCurve, cumulative_xp_for_level, resolve_level,
    xp_required_for_level,
};
pub use error::ProgressionError;
pub use info::{LevelInfo, level_info};
pub use rewards::{rewards_for, rewards_unlocked_between};
pub use tiers::{Tier, emoji_for, tier_for, title_for};
