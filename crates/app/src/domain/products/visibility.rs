//! The product visibility gate.
//!
//! A product is visible when it is active, when the viewer is an admin,
//! or when the viewer is the supplier who listed it. [`ListingScope`]
//! is the same rule in a form the listing SQL can apply to a whole
//! result set, so single reads and listings can never disagree about
//! what a viewer may see.

use crate::domain::{
    access::Actor,
    users::records::{Role, UserUuid},
};

/// Whether `viewer` may see a product in the given state.
#[must_use]
pub fn visible_to(active: bool, supplier: UserUuid, viewer: Option<&Actor>) -> bool {
    if active {
        return true;
    }

    match viewer {
        Some(viewer) => viewer.is_admin() || viewer.uuid == supplier,
        None => false,
    }
}

/// The set of products a viewer is allowed to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// Admins see everything.
    All,
    /// Suppliers see active products plus their own inactive ones.
    ActiveOrOwned(UserUuid),
    /// Everyone else sees only active products.
    ActiveOnly,
}

impl ListingScope {
    #[must_use]
    pub fn for_viewer(viewer: Option<&Actor>) -> Self {
        match viewer {
            Some(viewer) if viewer.is_admin() => Self::All,
            Some(viewer) if viewer.has_role(Role::Supplier) => Self::ActiveOrOwned(viewer.uuid),
            _ => Self::ActiveOnly,
        }
    }

    /// Whether a product in the given state falls inside this scope.
    #[must_use]
    pub fn permits(self, active: bool, supplier: UserUuid) -> bool {
        match self {
            Self::All => true,
            Self::ActiveOrOwned(owner) => active || supplier == owner,
            Self::ActiveOnly => active,
        }
    }

    /// Whether this scope includes every inactive product.
    #[must_use]
    pub const fn includes_all_inactive(self) -> bool {
        matches!(self, Self::All)
    }

    /// The supplier whose inactive products are additionally included,
    /// if any.
    #[must_use]
    pub const fn owned_by(self) -> Option<UserUuid> {
        match self {
            Self::ActiveOrOwned(owner) => Some(owner),
            Self::All | Self::ActiveOnly => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> Actor {
        Actor {
            uuid: UserUuid::new(),
            role,
            active: true,
        }
    }

    #[test]
    fn active_products_are_visible_to_everyone() {
        let supplier = UserUuid::new();

        assert!(visible_to(true, supplier, None));
        assert!(visible_to(true, supplier, Some(&actor(Role::ProjectOwner))));
    }

    #[test]
    fn inactive_products_are_hidden_from_the_public() {
        let supplier = UserUuid::new();

        assert!(!visible_to(false, supplier, None));
        assert!(!visible_to(false, supplier, Some(&actor(Role::ProjectOwner))));
    }

    #[test]
    fn supplier_sees_own_inactive_products_only() {
        let owner = actor(Role::Supplier);
        let other = actor(Role::Supplier);

        assert!(visible_to(false, owner.uuid, Some(&owner)));
        assert!(!visible_to(false, owner.uuid, Some(&other)));
    }

    #[test]
    fn admin_sees_everything() {
        assert!(visible_to(false, UserUuid::new(), Some(&actor(Role::Admin))));
    }

    #[test]
    fn listing_scope_agrees_with_single_product_visibility() {
        let supplier = actor(Role::Supplier);
        let viewers = [
            None,
            Some(actor(Role::ProjectOwner)),
            Some(supplier),
            Some(actor(Role::Supplier)),
            Some(actor(Role::Admin)),
        ];

        for viewer in &viewers {
            let scope = ListingScope::for_viewer(viewer.as_ref());

            for active in [true, false] {
                for owner in [supplier.uuid, UserUuid::new()] {
                    assert_eq!(
                        scope.permits(active, owner),
                        visible_to(active, owner, viewer.as_ref()),
                        "scope and gate must agree for viewer {viewer:?}"
                    );
                }
            }
        }
    }
}
