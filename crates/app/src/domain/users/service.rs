//! Users Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::password::hash_password,
    domain::{
        access::Actor,
        users::{
            data::{NewUserRecord, Registration, UserFilter},
            errors::UsersServiceError,
            records::{Role, UserRecord, UserUuid},
            repository::{PgUsersRepository, UsersRepository},
        },
    },
};

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new project owner or supplier account.
    async fn register(&self, registration: Registration) -> Result<UserRecord, UsersServiceError>;

    /// Fetch a single user. Users may read themselves, admins anyone.
    async fn get_user(
        &self,
        actor: &Actor,
        user: UserUuid,
    ) -> Result<UserRecord, UsersServiceError>;

    /// List users matching a filter. Admin only.
    async fn list_users(
        &self,
        actor: &Actor,
        filter: UserFilter,
    ) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Activate or deactivate an account. Admin only.
    async fn set_user_active(
        &self,
        actor: &Actor,
        user: UserUuid,
        active: bool,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Public directory of approved suppliers.
    async fn list_suppliers(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Public profile of one approved supplier. Anything that is not
    /// an active supplier account reads as not found.
    async fn get_supplier(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Per-role account totals for the admin dashboard. Admin only.
    async fn user_counts(&self, actor: &Actor) -> Result<Vec<(Role, i64)>, UsersServiceError>;
}

pub struct PgUsersService {
    users: Arc<dyn UsersRepository>,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUsersRepository::new(pool)),
        }
    }

    #[must_use]
    pub fn with_repository(users: Arc<dyn UsersRepository>) -> Self {
        Self { users }
    }
}

fn validate_registration(registration: &Registration) -> Result<(), UsersServiceError> {
    if matches!(registration.role, Role::Admin) {
        // Admin accounts are provisioned from the CLI, never self-service.
        return Err(UsersServiceError::Validation(
            "admin accounts cannot be self-registered",
        ));
    }

    let email = registration.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(UsersServiceError::Validation("a valid email is required"));
    }

    if registration.password.len() < 8 {
        return Err(UsersServiceError::Validation(
            "password must be at least 8 characters",
        ));
    }

    if registration.name.trim().is_empty() {
        return Err(UsersServiceError::Validation("a name is required"));
    }

    if matches!(registration.role, Role::Supplier)
        && registration
            .company
            .as_deref()
            .map_or(true, |company| company.trim().is_empty())
    {
        return Err(UsersServiceError::Validation(
            "a company name is required for suppliers",
        ));
    }

    Ok(())
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, registration: Registration) -> Result<UserRecord, UsersServiceError> {
        validate_registration(&registration)?;

        let password_hash =
            hash_password(&registration.password).map_err(|_| UsersServiceError::PasswordHash)?;

        let user = NewUserRecord {
            uuid: UserUuid::new(),
            email: registration.email.trim().to_string(),
            password_hash,
            role: registration.role,
            name: registration.name.trim().to_string(),
            company: registration.company,
            phone: registration.phone,
            active: registration.role.active_by_default(),
        };

        Ok(self.users.insert_user(user).await?)
    }

    async fn get_user(
        &self,
        actor: &Actor,
        user: UserUuid,
    ) -> Result<UserRecord, UsersServiceError> {
        if !actor.is_admin() && actor.uuid != user {
            return Err(UsersServiceError::Forbidden);
        }

        self.users
            .find_by_uuid(user)
            .await?
            .ok_or(UsersServiceError::NotFound)
    }

    async fn list_users(
        &self,
        actor: &Actor,
        filter: UserFilter,
    ) -> Result<Vec<UserRecord>, UsersServiceError> {
        if !actor.is_admin() {
            return Err(UsersServiceError::Forbidden);
        }

        Ok(self.users.list_users(filter).await?)
    }

    async fn set_user_active(
        &self,
        actor: &Actor,
        user: UserUuid,
        active: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        if !actor.is_admin() {
            return Err(UsersServiceError::Forbidden);
        }

        self.users
            .set_active(user, active)
            .await?
            .ok_or(UsersServiceError::NotFound)
    }

    async fn list_suppliers(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        Ok(self.users.list_active_suppliers().await?)
    }

    async fn get_supplier(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        self.users
            .find_by_uuid(user)
            .await?
            .filter(|found| found.role == Role::Supplier && found.active)
            .ok_or(UsersServiceError::NotFound)
    }

    async fn user_counts(&self, actor: &Actor) -> Result<Vec<(Role, i64)>, UsersServiceError> {
        if !actor.is_admin() {
            return Err(UsersServiceError::Forbidden);
        }

        Ok(self.users.count_by_role().await?)
    }
}
