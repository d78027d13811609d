use dinary_progression::rewards::{next_reward, rewards_for};
use dinary_progression::tiers::tier_for;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "rewards",
    desc: "List the rewards unlocked at a level.",
    category: "progression",
    usage: "dinary rewards <level>",
};

pub fn rewards(level: u32) -> String {
    let level = level.max(1);
    let tier = tier_for(level);

    let mut out = format!("{} Level {} · {}\n", tier.emoji, level, tier.title);
    for reward in rewards_for(level) {
        out.push_str(&format!("  - {}\n", reward));
    }

    match next_reward(level) {
        Some((threshold, reward)) => {
            out.push_str(&format!("Next reward at level {}: {}", threshold, reward));
        }
        None => out.push_str("Every reward is unlocked."),
    }

    out
}
