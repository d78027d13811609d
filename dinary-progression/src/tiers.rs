/// Title and emoji shown for a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    pub title: &'static str,
    pub emoji: &'static str,
}

/// A level band: applies to every level below `below`, or to all remaining
/// levels when `below` is `None`.
struct Band {
    below: Option<u32>,
    tier: Tier,
}

pub const LEGENDARY: Tier = Tier {
    title: "Legendary Dinar",
    emoji: "👑",
};

/// Explicit overrides, checked before the bands.
const MILESTONES: &[(u32, Tier)] = &[
    (1, Tier { title: "Novice Saver", emoji: "🐣" }),
    (2, Tier { title: "Penny Collector", emoji: "🪙" }),
    (3, Tier { title: "Budget Builder", emoji: "🧱" }),
    (4, Tier { title: "Smart Spender", emoji: "💡" }),
    (5, Tier { title: "Coin Keeper", emoji: "💰" }),
    (10, Tier { title: "Wallet Warrior", emoji: "⚔️" }),
    (20, Tier { title: "Finance Pro", emoji: "📈" }),
    (30, Tier { title: "Money Master", emoji: "🏦" }),
    (50, Tier { title: "Wealth Wizard", emoji: "🧙" }),
    (100, LEGENDARY),
];

// Ascending; the last band is open-ended.
const BANDS: &[Band] = &[
    Band {
        below: Some(10),
        tier: Tier { title: "Apprentice Saver", emoji: "🌱" },
    },
    Band {
        below: Some(20),
        tier: Tier { title: "Rising Saver", emoji: "🌿" },
    },
    Band {
        below: Some(30),
        tier: Tier { title: "Savvy Investor", emoji: "📊" },
    },
    Band {
        below: Some(50),
        tier: Tier { title: "Elite Investor", emoji: "💎" },
    },
    Band {
        below: Some(100),
        tier: Tier { title: "Grand Treasurer", emoji: "🏆" },
    },
    Band {
        below: None,
        tier: LEGENDARY,
    },
];

/// Tier for `level`: a milestone match wins, otherwise the first band whose
/// upper bound exceeds `level`. Level 0 is treated as level 1.
pub fn tier_for(level: u32) -> Tier {
    let level = level.max(1);

    if let Some((_, tier)) = MILESTONES.iter().find(|(milestone, _)| *milestone == level) {
        return *tier;
    }

    BANDS
        .iter()
        .find(|band| band.below.is_none_or(|below| level < below))
        .map_or(LEGENDARY, |band| band.tier)
}

pub fn title_for(level: u32) -> &'static str {
    tier_for(level).title
}

pub fn emoji_for(level: u32) -> &'static str {
    tier_for(level).emoji
}

/// Levels that carry an explicit milestone tier, ascending.
pub fn milestone_levels() -> impl Iterator<Item = u32> {
    MILESTONES.iter().map(|(level, _)| *level)
}

#[cfg(test)]
mod tests {
    use super::{BANDS, LEGENDARY, emoji_for, milestone_levels, tier_for, title_for};

    #[test]
    fn milestones_override_bands() {
        assert_eq!(title_for(1), "Novice Saver");
        assert_eq!(emoji_for(1), "🐣");
        assert_eq!(title_for(5), "Coin Keeper");
        assert_eq!(title_for(10), "Wallet Warrior");
        assert_eq!(title_for(50), "Wealth Wizard");
    }

    #[test]
    fn falls_back_to_bands_between_milestones() {
        assert_eq!(title_for(6), "Apprentice Saver");
        assert_eq!(title_for(9), "Apprentice Saver");
        assert_eq!(title_for(11), "Rising Saver");
        assert_eq!(title_for(19), "Rising Saver");
        assert_eq!(emoji_for(25), "📊");
        assert_eq!(title_for(42), "Elite Investor");
        assert_eq!(title_for(99), "Grand Treasurer");
    }

    #[test]
    fn top_tier_is_open_ended() {
        assert_eq!(tier_for(100), LEGENDARY);
        assert_eq!(tier_for(101), LEGENDARY);
        assert_eq!(tier_for(u32::MAX), LEGENDARY);
        assert_eq!(title_for(100), "Legendary Dinar");
        assert_eq!(emoji_for(100), "👑");
    }

    #[test]
    fn level_zero_reads_as_novice() {
        assert_eq!(tier_for(0), tier_for(1));
    }

    #[test]
    fn tables_are_ascending() {
        let milestones = milestone_levels().collect::<Vec<_>>();
        assert!(milestones.windows(2).all(|pair| pair[0] < pair[1]));

        let bounds = BANDS.iter().map(|band| band.below).collect::<Vec<_>>();
        assert_eq!(bounds.last(), Some(&None));
        assert!(
            bounds
                .iter()
                .flatten()
                .collect::<Vec<_>>()
                .windows(2)
                .all(|pair| pair[0] < pair[1])
        );
    }
}
