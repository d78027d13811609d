use dinary_progression::XpCurve;
use dinary_progression::formatting::format_xp;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "curve",
    desc: "Print the XP needed per level.",
    category: "progression",
    usage: "dinary curve [from] [count]",
};

pub const DEFAULT_ROWS: u32 = 10;
pub const MAX_ROWS: u32 = 50;

pub fn curve(curve: &XpCurve, from: Option<u32>, count: Option<u32>) -> String {
    let from = from.unwrap_or(1).max(1);
    let count = count.unwrap_or(DEFAULT_ROWS).clamp(1, MAX_ROWS);

    let mut lines = vec![format!(
        "XP curve: floor({} * level ^ {})",
        curve.base_xp(),
        curve.growth_rate()
    )];

    let mut reached = curve.cumulative_xp_for_level(from);
    for level in (from..).take(count as usize) {
        let step = curve.xp_required_for_level(level);
        lines.push(format!(
            "Level {:>4} -> {:>4}: {:>12}  (reached at {})",
            level,
            level.saturating_add(1),
            format_xp(step),
            format_xp(reached)
        ));
        reached = reached.saturating_add(step);
    }

    lines.join("\n")
}
