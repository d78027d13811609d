use dinary_progression::XpCurve;

use crate::CommandMeta;
use crate::gamification::cards::level_card;

pub const META: CommandMeta = CommandMeta {
    name: "level",
    desc: "Show the level, title and rewards for an XP total.",
    category: "progression",
    usage: "dinary level <total_xp>",
};

pub fn level(curve: &XpCurve, total_xp: i64) -> String {
    match curve.level_info(total_xp) {
        // Resolution only succeeds for non-negative totals.
        Ok(info) => level_card(&info, total_xp.unsigned_abs()),
        Err(err) => format!("Invalid input: {}", err),
    }
}
