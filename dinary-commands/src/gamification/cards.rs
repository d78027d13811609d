use dinary_database::model::gamification::{GamificationProfile, XpAward, XpEvent};
use dinary_progression::LevelInfo;
use dinary_progression::formatting::{
    format_thousands, format_xp, level_summary, progress_bar, progress_percent,
};
use dinary_progression::rewards::next_reward;
use dinary_progression::tiers::title_for;
use uuid::Uuid;

pub const PROGRESS_BAR_WIDTH: usize = 20;

/// Multi-line level view: summary, progress bar, totals and rewards.
pub fn level_card(info: &LevelInfo, total_xp: u64) -> String {
    let progress = info.progress();
    let mut lines = vec![
        level_summary(info),
        format!(
            "{} {}%",
            progress_bar(&progress, PROGRESS_BAR_WIDTH),
            progress_percent(&progress)
        ),
        format!(
            "Total: {} · {} to next level",
            format_xp(total_xp),
            format_xp(progress.xp_remaining())
        ),
        String::new(),
        "Rewards:".to_owned(),
    ];

    lines.extend(info.rewards.iter().map(|reward| format!("  - {}", reward)));

    if let Some((threshold, reward)) = next_reward(info.level) {
        lines.push(format!("Next reward at level {}: {}", threshold, reward));
    }

    lines.join("\n")
}

pub fn profile_card(user_id: Uuid, info: &LevelInfo, total_xp: u64) -> String {
    format!("Profile {}\n{}", user_id, level_card(info, total_xp))
}

pub fn award_message(award: &XpAward, amount: u64, total_xp: u64) -> String {
    let mut out = format!(
        "Awarded {} to {}. Total: {}.",
        format_xp(amount),
        award.profile.user_id,
        format_xp(total_xp)
    );

    if award.leveled_up() {
        out.push_str(&format!(
            "\nLevel up! {} -> {} ({})",
            award.previous_level,
            award.new_level,
            title_for(award.new_level)
        ));
        for reward in &award.unlocked_rewards {
            out.push_str(&format!("\nUnlocked: {}", reward));
        }
    }

    out
}

pub fn leaderboard_lines(entries: &[(GamificationProfile, LevelInfo)]) -> String {
    if entries.is_empty() {
        return "No profiles yet.".to_owned();
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, (profile, info))| {
            format!(
                "#{:<3} {} Lv {:<4} {:<18} {:>14}  {}",
                idx + 1,
                info.emoji,
                info.level,
                info.title,
                format_xp(u64::try_from(profile.total_xp).unwrap_or(0)),
                profile.user_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn history_lines(events: &[XpEvent], now: i64) -> String {
    if events.is_empty() {
        return "No XP events recorded.".to_owned();
    }

    events
        .iter()
        .map(|event| {
            let reference = event
                .reference
                .as_deref()
                .map(|reference| format!(" ({})", reference))
                .unwrap_or_default();
            format!(
                "+{} XP  {}{}  {}",
                format_thousands(u64::try_from(event.amount).unwrap_or(0)),
                event.source,
                reference,
                format_age(now.saturating_sub(event.created_at))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compact relative age such as `45s ago`, `3m ago`, `2h ago` or `5d ago`.
pub fn format_age(elapsed_seconds: i64) -> String {
    let elapsed = elapsed_seconds.max(0);
    match elapsed {
        0..60 => format!("{}s ago", elapsed),
        60..3_600 => format!("{}m ago", elapsed / 60),
        3_600..86_400 => format!("{}h ago", elapsed / 3_600),
        _ => format!("{}d ago", elapsed / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use dinary_database::model::gamification::{GamificationProfile, XpAward, XpEvent, XpSource};
    use dinary_progression::level_info;
    use uuid::Uuid;

    use super::{award_message, format_age, history_lines, leaderboard_lines, level_card};

    fn profile(total_xp: i64) -> GamificationProfile {
        GamificationProfile {
            user_id: Uuid::nil(),
            total_xp,
            level: 1,
            xp: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn level_card_for_new_profile() {
        let card = level_card(&level_info(0).unwrap(), 0);
        let lines = card.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "🐣 Level 1 · Novice Saver (0/100 XP)");
        assert_eq!(lines[1], format!("{} 0%", "░".repeat(20)));
        assert_eq!(lines[2], "Total: 0 XP · 100 XP to next level");
        assert!(card.contains("  - Welcome badge"));
        assert!(card.ends_with("Next reward at level 2: 1% cashback on wallet top-ups"));
    }

    #[test]
    fn level_card_at_top_has_no_next_reward() {
        let card = level_card(&level_info(10_000_000).unwrap(), 10_000_000);
        assert!(card.contains("Legendary profile frame"));
        assert!(!card.contains("Next reward"));
    }

    #[test]
    fn award_message_reports_level_up() {
        let award = XpAward {
            profile: profile(400),
            previous_level: 1,
            new_level: 3,
            unlocked_rewards: vec![
                "1% cashback on wallet top-ups".to_owned(),
                "Weekly challenges".to_owned(),
            ],
        };

        let message = award_message(&award, 300, 400);
        assert!(message.starts_with("Awarded 300 XP to 00000000-0000-0000-0000-000000000000. Total: 400 XP."));
        assert!(message.contains("Level up! 1 -> 3 (Budget Builder)"));
        assert!(message.ends_with("Unlocked: Weekly challenges"));
    }

    #[test]
    fn award_message_without_level_up_is_one_line() {
        let award = XpAward {
            profile: profile(50),
            previous_level: 1,
            new_level: 1,
            unlocked_rewards: Vec::new(),
        };

        assert_eq!(award_message(&award, 50, 50).lines().count(), 1);
    }

    #[test]
    fn leaderboard_ranks_in_order() {
        let entries = vec![
            (profile(5_000), level_info(5_000).unwrap()),
            (profile(100), level_info(100).unwrap()),
        ];
        let text = leaderboard_lines(&entries);
        let lines = text.lines().collect::<Vec<_>>();

        assert!(lines[0].starts_with("#1 "));
        assert!(lines[0].contains("5,000 XP"));
        assert!(lines[1].starts_with("#2 "));
        assert_eq!(leaderboard_lines(&[]), "No profiles yet.");
    }

    #[test]
    fn history_shows_source_reference_and_age() {
        let events = vec![XpEvent {
            id: 1,
            user_id: Uuid::nil(),
            amount: 1_500,
            source: XpSource::Payment,
            reference: Some("pay_42".to_owned()),
            created_at: 1_000,
        }];

        assert_eq!(history_lines(&events, 1_300), "+1,500 XP  payment (pay_42)  5m ago");
        assert_eq!(history_lines(&[], 0), "No XP events recorded.");
    }

    #[test]
    fn ages_are_compact() {
        assert_eq!(format_age(-3), "0s ago");
        assert_eq!(format_age(59), "59s ago");
        assert_eq!(format_age(60), "1m ago");
        assert_eq!(format_age(7_200), "2h ago");
        assert_eq!(format_age(200_000), "2d ago");
    }
}
