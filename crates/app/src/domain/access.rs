//! Authorization predicates shared by every service.
//!
//! These are pure functions over the acting user and the owning identity
//! of a resource. They fail closed: a missing actor denies everything
//! except reads of publicly visible resources, which each domain decides
//! for itself (see the product visibility gate).

use crate::domain::users::records::{Role, UserUuid};

/// The authenticated caller of an operation, threaded explicitly into
/// every service call. There is no ambient session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub uuid: UserUuid,
    pub role: Role,
    pub active: bool,
}

impl Actor {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    #[must_use]
    pub const fn has_role(&self, role: Role) -> bool {
        // Admin rights are explicit, never implied by another role check.
        matches!((self.role, role), (Role::ProjectOwner, Role::ProjectOwner))
            || matches!((self.role, role), (Role::Supplier, Role::Supplier))
            || matches!((self.role, role), (Role::Admin, Role::Admin))
    }
}

/// Admins may mutate anything; everyone else only what they own.
#[must_use]
pub fn can_manage(actor: Option<&Actor>, owner: UserUuid) -> bool {
    match actor {
        Some(actor) => actor.is_admin() || actor.uuid == owner,
        None => false,
    }
}

/// Identity match without the admin override, for operations that are
/// owner-exclusive even for admins (e.g. responding to a quote).
#[must_use]
pub fn is_owner(actor: Option<&Actor>, owner: UserUuid) -> bool {
    actor.is_some_and(|actor| actor.uuid == owner)
}
