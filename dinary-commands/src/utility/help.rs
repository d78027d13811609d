use crate::utility::embeds::{grouped_help_description, unknown_category_message};
use crate::{COMMANDS, CommandMeta};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "dinary help [category]",
};

pub fn help(category: Option<&str>) -> String {
    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    let category = category.map(str::trim).filter(|raw| !raw.is_empty());
    if let Some(wanted) = category
        && !categories.contains(&wanted)
    {
        return unknown_category_message(wanted, &categories);
    }

    let commands = sorted_commands(category);
    format!("Available Commands\n\n{}", grouped_help_description(&commands))
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| category.is_none_or(|wanted| cmd.category == wanted))
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::{help, sorted_commands};

    #[test]
    fn lists_every_command() {
        let text = help(None);
        for name in ["award", "curve", "help", "history", "leaderboard", "level", "profile", "rewards"] {
            assert!(text.contains(name), "missing {name}");
        }
    }

    #[test]
    fn filters_by_category() {
        let names = sorted_commands(Some("progression"))
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["curve", "level", "rewards"]);
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(help(Some("moderation")).starts_with("Unknown category: Moderation"));
    }
}
