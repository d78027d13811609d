use crate::curve::LevelProgress;
use crate::info::LevelInfo;

const BAR_FILLED: char = '█';
const BAR_EMPTY: char = '░';

/// Format a number with comma thousands separators (e.g. 1234567 -> "1,234,567").
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Format an XP amount for display (e.g. "1,234 XP").
pub fn format_xp(value: u64) -> String {
    format!("{} XP", format_thousands(value))
}

/// Whole-number percentage of the current level already earned.
pub fn progress_percent(progress: &LevelProgress) -> u64 {
    progress
        .xp_in_current_level
        .saturating_mul(100)
        .checked_div(progress.xp_to_next_level)
        .unwrap_or(0)
        .min(100)
}

/// Render a fixed-width progress bar such as `████░░░░░░`.
pub fn progress_bar(progress: &LevelProgress, width: usize) -> String {
    let width = width.max(1);
    let filled = if progress.xp_to_next_level == 0 {
        0
    } else {
        let ratio = progress.xp_in_current_level.min(progress.xp_to_next_level) as u128
            * width as u128
            / progress.xp_to_next_level as u128;
        ratio as usize
    };

    let mut bar = String::with_capacity(width * BAR_FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(BAR_FILLED, filled));
    bar.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    bar
}

/// One-line summary, e.g. "🐣 Level 1 · Novice Saver (0/100 XP)".
pub fn level_summary(info: &LevelInfo) -> String {
    format!(
        "{} Level {} · {} ({}/{})",
        info.emoji,
        info.level,
        info.title,
        format_thousands(info.xp_in_current_level),
        format_xp(info.xp_to_next_level)
    )
}
