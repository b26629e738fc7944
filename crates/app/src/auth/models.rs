//! Auth data models.

use jiff::Timestamp;

use crate::{
    auth::SessionTokenVersion,
    domain::users::records::{Role, UserRecord, UserUuid},
    uuids::TypedUuid,
};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionRecord>;

/// Login payload. The password is plain text here and never stored.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub struct NewSessionRecord {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Session data used during bearer authentication, joined with the
/// owning user so the caller identity can be built in one lookup.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub session_uuid: SessionUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub user_uuid: UserUuid,
    pub role: Role,
    pub active: bool,
}

/// Login result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session: SessionRecord,
    pub user: UserRecord,
}
