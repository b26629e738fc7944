//! Auth response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::users::records::UserRecord;

/// Public view of a user account. Never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    /// Login email address
    pub email: String,

    /// Marketplace role (project_owner, supplier, admin)
    pub role: String,

    /// Display name
    pub name: String,

    /// Company name, if provided
    pub company: Option<String>,

    /// Contact phone, if provided
    pub phone: Option<String>,

    /// Whether the account may act on the marketplace
    pub active: bool,

    /// The date and time the account was created
    pub created_at: String,

    /// The date and time the account was last updated
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            email: user.email,
            role: user.role.to_string(),
            name: user.name,
            company: user.company,
            phone: user.phone,
            active: user.active,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}
