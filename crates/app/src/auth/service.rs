//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::{
        AuthServiceError, SessionTokenVersion, build_verifier_input, format_session_token,
        generate_session_token_secret,
        models::{Credentials, IssuedSession, NewSessionRecord, SessionUuid},
        parse_session_token,
        password::verify_password,
        repository::{AuthRepository, PgAuthRepository},
    },
    domain::{
        access::Actor,
        users::{PgUsersRepository, UsersRepository},
    },
};

/// How long an issued session stays valid.
const SESSION_TTL: SignedDuration = SignedDuration::from_hours(30 * 24);

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and issue a session token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the acting user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError>;

    /// Revoke the session behind a bearer token. Returns `true` if the
    /// session was still active.
    async fn revoke_bearer(&self, bearer_token: &str) -> Result<bool, AuthServiceError>;
}

pub struct PgAuthService {
    sessions: Arc<dyn AuthRepository>,
    users: Arc<dyn UsersRepository>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            sessions: Arc::new(PgAuthRepository::new(pool.clone())),
            users: Arc::new(PgUsersRepository::new(pool)),
        }
    }

    #[must_use]
    pub fn with_repositories(
        sessions: Arc<dyn AuthRepository>,
        users: Arc<dyn UsersRepository>,
    ) -> Self {
        Self { sessions, users }
    }
}

fn hashes_match(stored_hex: &str, computed: &blake3::Hash) -> bool {
    // Hash equality is constant time, so decode the stored side first.
    blake3::Hash::from_hex(stored_hex).is_ok_and(|stored| stored == *computed)
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let user = self
            .users
            .find_by_email(credentials.email.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !user.active {
            return Err(AuthServiceError::AccountInactive);
        }

        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_token_secret();
        let token = format_session_token(session_uuid.into_uuid(), version, &secret);

        let verifier_input = build_verifier_input(&session_uuid.into_uuid(), version, &secret);
        let token_hash = blake3::hash(&verifier_input).to_hex().to_string();

        let session = self
            .sessions
            .insert_session(NewSessionRecord {
                uuid: session_uuid,
                user_uuid: user.uuid,
                version,
                token_hash,
                expires_at: Timestamp::now() + SESSION_TTL,
            })
            .await?;

        Ok(IssuedSession {
            token,
            session,
            user,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Actor, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let session = self
            .sessions
            .find_active_session(SessionUuid::from_uuid(parsed.session_uuid))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if session.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier_input =
            build_verifier_input(&parsed.session_uuid, parsed.version, &parsed.secret);
        let computed = blake3::hash(&verifier_input);

        if !hashes_match(&session.token_hash, &computed) {
            return Err(AuthServiceError::NotFound);
        }

        if !session.active {
            return Err(AuthServiceError::AccountInactive);
        }

        Ok(Actor {
            uuid: session.user_uuid,
            role: session.role,
            active: session.active,
        })
    }

    async fn revoke_bearer(&self, bearer_token: &str) -> Result<bool, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        Ok(self
            .sessions
            .revoke_session(SessionUuid::from_uuid(parsed.session_uuid))
            .await?)
    }
}
