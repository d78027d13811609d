use clap::{Parser, Subcommand};
use dinary_core::{Role, Session};
use dinary_database::model::gamification::XpSource;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(
    name = "dinary",
    version,
    about = "Dinary gamification tools",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Identity the command runs as.
    #[arg(long, global = true)]
    pub user: Option<Uuid>,

    /// Role of the calling identity.
    #[arg(long, global = true, default_value_t = Role::User)]
    pub role: Role,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available commands.
    Help { category: Option<String> },
    /// Show the level, title and rewards for an XP total.
    Level {
        #[arg(allow_negative_numbers = true)]
        total_xp: i64,
    },
    /// List the rewards unlocked at a level.
    Rewards { level: u32 },
    /// Print the XP needed per level.
    Curve { from: Option<u32>, count: Option<u32> },
    /// Show a gamification profile.
    Profile { user_id: Option<Uuid> },
    /// Award XP to a user.
    Award {
        user_id: Uuid,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        source: XpSource,
        reference: Option<String>,
    },
    /// Show the profiles with the most XP.
    Leaderboard { limit: Option<u32> },
    /// Show recent XP events.
    History {
        user_id: Option<Uuid>,
        limit: Option<u32>,
    },
    /// Recompute a profile's stored level from its XP total.
    Resync { user_id: Uuid },
    /// Apply pending database migrations.
    Migrate,
}

impl Cli {
    /// Session for the caller. Without `--user`, only admins get one
    /// (as the nil identity) since they never act on their own profile.
    pub fn session(&self) -> Option<Session> {
        match (self.user, self.role) {
            (Some(user_id), role) => Some(Session::new(user_id, role)),
            (None, Role::Admin) => Some(Session::new(Uuid::nil(), Role::Admin)),
            (None, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use dinary_core::Role;
    use dinary_database::model::gamification::XpSource;
    use uuid::Uuid;

    use super::{Cli, Command};

    const USER: &str = "6f1c2b1e-6a4e-4b8e-9a36-0c4f5d2f7a11";

    #[test]
    fn parses_level_with_negative_total() {
        let cli = Cli::try_parse_from(["dinary", "level", "-5"]).unwrap();
        assert!(matches!(cli.command, Command::Level { total_xp: -5 }));
    }

    #[test]
    fn parses_award() {
        let cli = Cli::try_parse_from([
            "dinary", "--role", "admin", "award", USER, "250", "Payment", "pay_1",
        ])
        .unwrap();

        assert_eq!(cli.role, Role::Admin);
        match cli.command {
            Command::Award {
                user_id,
                amount,
                source,
                reference,
            } => {
                assert_eq!(user_id, USER.parse::<Uuid>().unwrap());
                assert_eq!(amount, 250);
                assert_eq!(source, XpSource::Payment);
                assert_eq!(reference.as_deref(), Some("pay_1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_source() {
        assert!(Cli::try_parse_from(["dinary", "award", USER, "10", "lottery"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dinary", "profile", "--user", USER]).unwrap();
        let session = cli.session().unwrap();
        assert_eq!(session.user_id, USER.parse::<Uuid>().unwrap());
        assert_eq!(session.role, Role::User);
    }

    #[test]
    fn sessions_need_identity_unless_admin() {
        let anonymous = Cli::try_parse_from(["dinary", "leaderboard"]).unwrap();
        assert!(anonymous.session().is_none());

        let admin = Cli::try_parse_from(["dinary", "--role", "admin", "leaderboard", "5"]).unwrap();
        assert_eq!(admin.session().map(|s| s.role), Some(Role::Admin));
    }

    #[test]
    fn parses_history_with_positional_limit() {
        let cli = Cli::try_parse_from(["dinary", "history", USER, "5"]).unwrap();
        match cli.command {
            Command::History { user_id, limit } => {
                assert_eq!(user_id, Some(USER.parse::<Uuid>().unwrap()));
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_role_names_case_insensitively() {
        let cli = Cli::try_parse_from(["dinary", "--role", "Merchant", "leaderboard"]).unwrap();
        assert_eq!(cli.role, Role::Merchant);
        assert!(Cli::try_parse_from(["dinary", "--role", "guest", "leaderboard"]).is_err());
    }

    #[test]
    fn help_is_a_regular_subcommand() {
        let cli = Cli::try_parse_from(["dinary", "help", "admin"]).unwrap();
        assert!(matches!(cli.command, Command::Help { category: Some(ref c) } if c == "admin"));
    }
}
