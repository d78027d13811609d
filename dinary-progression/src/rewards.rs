/// Rewards every profile has from level 1.
pub const BASE_REWARDS: &[&str] = &["Welcome badge", "Daily check-in bonus"];

/// One reward per threshold, ascending. Once reached, a reward stays unlocked.
pub const REWARD_UNLOCKS: &[(u32, &str)] = &[
    (2, "1% cashback on wallet top-ups"),
    (3, "Weekly challenges"),
    (4, "Custom wallet themes"),
    (5, "Referral bonus boost"),
    (10, "2% cashback at partner merchants"),
    (20, "Priority support"),
    (30, "Fee-free transfers"),
    (50, "Exclusive merchant offers"),
    (100, "Legendary profile frame"),
];

/// All rewards unlocked at or below `level`, base set first.
pub fn rewards_for(level: u32) -> Vec<String> {
    BASE_REWARDS
        .iter()
        .copied()
        .chain(
            REWARD_UNLOCKS
                .iter()
                .take_while(|(threshold, _)| *threshold <= level)
                .map(|(_, reward)| *reward),
        )
        .map(str::to_owned)
        .collect()
}

/// Rewards gained by moving from level `from` to level `to`.
pub fn rewards_unlocked_between(from: u32, to: u32) -> Vec<String> {
    REWARD_UNLOCKS
        .iter()
        .filter(|(threshold, _)| *threshold > from && *threshold <= to)
        .map(|(_, reward)| (*reward).to_owned())
        .collect()
}

/// The next reward still locked at `level`, if any.
pub fn next_reward(level: u32) -> Option<(u32, &'static str)> {
    REWARD_UNLOCKS
        .iter()
        .find(|(threshold, _)| *threshold > level)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::{BASE_REWARDS, REWARD_UNLOCKS, next_reward, rewards_for, rewards_unlocked_between};

    #[test]
    fn level_one_has_only_base_rewards() {
        assert_eq!(rewards_for(1), vec!["Welcome badge", "Daily check-in bonus"]);
        assert_eq!(rewards_for(0), rewards_for(1));
    }

    #[test]
    fn level_five_includes_each_lower_unlock_in_order() {
        assert_eq!(
            rewards_for(5),
            vec![
                "Welcome badge",
                "Daily check-in bonus",
                "1% cashback on wallet top-ups",
                "Weekly challenges",
                "Custom wallet themes",
                "Referral bonus boost",
            ]
        );
    }

    #[test]
    fn rewards_are_append_only() {
        for level in 1..150 {
            let lower = rewards_for(level);
            let higher = rewards_for(level + 1);
            assert!(higher.starts_with(&lower), "level {level} lost a reward");
        }
    }

    #[test]
    fn top_level_unlocks_everything() {
        assert_eq!(
            rewards_for(100).len(),
            BASE_REWARDS.len() + REWARD_UNLOCKS.len()
        );
        assert_eq!(rewards_for(100).last().map(String::as_str), Some("Legendary profile frame"));
    }

    #[test]
    fn level_up_reports_only_new_rewards() {
        assert_eq!(
            rewards_unlocked_between(1, 3),
            vec!["1% cashback on wallet top-ups", "Weekly challenges"]
        );
        assert_eq!(rewards_unlocked_between(5, 9), Vec::<String>::new());
        assert_eq!(rewards_unlocked_between(9, 10), vec!["2% cashback at partner merchants"]);
        assert!(rewards_unlocked_between(10, 4).is_empty());
    }

    #[test]
    fn next_reward_lookup() {
        assert_eq!(next_reward(1), Some((2, "1% cashback on wallet top-ups")));
        assert_eq!(next_reward(12), Some((20, "Priority support")));
        assert_eq!(next_reward(100), None);
    }
}
