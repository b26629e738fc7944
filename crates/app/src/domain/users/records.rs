//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Marketplace role attached to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProjectOwner,
    Supplier,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectOwner => "project_owner",
            Self::Supplier => "supplier",
            Self::Admin => "admin",
        }
    }

    /// Whether accounts with this role start active without admin review.
    #[must_use]
    pub const fn active_by_default(self) -> bool {
        !matches!(self, Self::Supplier)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role value is unknown.
#[derive(Debug, thiserror::Error)]
#[error("unknown role value")]
pub struct UnknownRole;

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "project_owner" => Ok(Self::ProjectOwner),
            "supplier" => Ok(Self::Supplier),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole),
        }
    }
}

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppliers_start_inactive_other_roles_start_active() {
        assert!(!Role::Supplier.active_by_default());
        assert!(Role::ProjectOwner.active_by_default());
        assert!(Role::Admin.active_by_default());
    }

    #[test]
    fn role_round_trips_through_storage_representation() {
        for role in [Role::ProjectOwner, Role::Supplier, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("buyer".parse::<Role>().is_err());
    }
}
