use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Merchant,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Merchant, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Merchant => "merchant",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| {
                anyhow::anyhow!("unknown role `{}` (expected user, merchant or admin)", raw.trim())
            })
    }
}

/// An authenticated caller. Built once at the edge and passed explicitly to
/// whatever needs to make access decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners can see their own data; admins can see everyone's.
    pub fn can_view(&self, user_id: Uuid) -> bool {
        self.is_admin() || self.user_id == user_id
    }

    pub fn require_admin(&self) -> anyhow::Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            anyhow::bail!("{} role cannot perform admin actions", self.role)
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{Role, Session};

    #[test]
    fn owners_and_admins_can_view() {
        let owner = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);

        assert!(Session::new(owner, Role::User).can_view(owner));
        assert!(!Session::new(owner, Role::User).can_view(other));
        assert!(!Session::new(owner, Role::Merchant).can_view(other));
        assert!(Session::new(owner, Role::Admin).can_view(other));
    }

    #[test]
    fn roles_parse_from_names() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Merchant ".parse::<Role>().unwrap(), Role::Merchant);
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }

        let err = "guest".parse::<Role>().unwrap_err();
        assert!(err.to_string().starts_with("unknown role `guest`"));
    }

    #[test]
    fn only_admins_pass_admin_check() {
        let user_id = Uuid::from_u128(1);

        assert!(Session::new(user_id, Role::Admin).require_admin().is_ok());
        let err = Session::new(user_id, Role::Merchant)
            .require_admin()
            .unwrap_err();
        assert_eq!(err.to_string(), "merchant role cannot perform admin actions");
    }
}
