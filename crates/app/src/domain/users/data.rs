//! Users Data

use crate::domain::users::records::{Role, UserUuid};

/// Registration payload accepted from the outside world. The password is
/// still plain text here; the service hashes it before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
}

/// New user persistence payload with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

/// Admin listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub active: Option<bool>,
    /// Case-insensitive match against name, email, or company.
    pub search: Option<String>,
    pub limit: Option<i64>,
}
