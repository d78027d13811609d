use crate::CommandMeta;

pub fn unknown_category_message(wanted_category: &str, valid_categories: &[&str]) -> String {
    let valid = valid_categories
        .iter()
        .map(|category| display_category(category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Unknown category: {}\nValid categories: {}",
        display_category(wanted_category),
        valid
    )
}

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{}`", usage)
}

pub fn permission_denied_message() -> &'static str {
    "You do not have permission to do that."
}

/// Commands grouped under a heading per category, in the given order.
pub fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("  {:<12} {}\n", command.name, command.desc));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{grouped_help_description, unknown_category_message, usage_message};
    use crate::CommandMeta;

    const A: CommandMeta = CommandMeta {
        name: "alpha",
        desc: "First.",
        category: "one",
        usage: "dinary alpha",
    };
    const B: CommandMeta = CommandMeta {
        name: "beta",
        desc: "Second.",
        category: "two",
        usage: "dinary beta",
    };

    #[test]
    fn groups_by_category() {
        assert_eq!(
            grouped_help_description(&[&A, &B]),
            "One\n  alpha        First.\n\nTwo\n  beta         Second."
        );
        assert_eq!(grouped_help_description(&[]), "No commands available.");
    }

    #[test]
    fn messages() {
        assert_eq!(
            unknown_category_message("misc", &["admin", "profile"]),
            "Unknown category: Misc\nValid categories: Admin, Profile"
        );
        assert_eq!(usage_message("dinary level <total_xp>"), "Usage: `dinary level <total_xp>`");
    }
}
