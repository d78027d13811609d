pub mod gamification;
pub mod utility;

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    gamification::level::META,
    gamification::rewards::META,
    gamification::curve::META,
    gamification::profile::META,
    gamification::award::META,
    gamification::leaderboard::META,
    gamification::history::META,
    gamification::resync::META,
];

/// Look up a command by name.
pub fn command_meta(name: &str) -> Option<&'static CommandMeta> {
    COMMANDS.iter().find(|command| command.name == name)
}
