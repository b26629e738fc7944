//! Quote lifecycle rules.
//!
//! Pure predicates over a quote and the acting user. Responding is an
//! identity-exclusive right of the addressed supplier; closing belongs
//! to the requester or an admin. Closed quotes accept no writes, and
//! closing is idempotent.

use crate::domain::{
    access::{Actor, is_owner},
    quotes::records::{QuoteRecord, QuoteStatus},
};

/// Why a lifecycle operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteRuleViolation {
    /// The actor has no right to perform the operation on this quote.
    Forbidden,
    /// The quote is closed and admits no further writes.
    Closed,
}

/// Who may read a quote: the requester, the addressed supplier, or an
/// admin.
#[must_use]
pub fn can_view(actor: &Actor, quote: &QuoteRecord) -> bool {
    actor.is_admin() || actor.uuid == quote.requester_uuid || actor.uuid == quote.supplier_uuid
}

/// Responding is reserved for the addressed supplier themselves, and
/// only while the quote is still open: a second answer overwrites the
/// first, but a closed quote accepts none. Admins cannot answer on a
/// supplier's behalf.
pub fn ensure_can_respond(actor: &Actor, quote: &QuoteRecord) -> Result<(), QuoteRuleViolation> {
    if !is_owner(Some(actor), quote.supplier_uuid) {
        return Err(QuoteRuleViolation::Forbidden);
    }

    match quote.status {
        QuoteStatus::Pending | QuoteStatus::Responded => Ok(()),
        QuoteStatus::Closed => Err(QuoteRuleViolation::Closed),
    }
}

/// Closing belongs to the requester or an admin, from any state.
/// Closing an already closed quote is a no-op, not an error.
pub fn ensure_can_close(actor: &Actor, quote: &QuoteRecord) -> Result<(), QuoteRuleViolation> {
    if !actor.is_admin() && actor.uuid != quote.requester_uuid {
        return Err(QuoteRuleViolation::Forbidden);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::domain::{
        products::records::ProductUuid,
        quotes::records::QuoteUuid,
        users::records::{Role, UserUuid},
    };

    fn actor(role: Role) -> Actor {
        Actor {
            uuid: UserUuid::new(),
            role,
            active: true,
        }
    }

    fn quote(requester: UserUuid, supplier: UserUuid, status: QuoteStatus) -> QuoteRecord {
        QuoteRecord {
            uuid: QuoteUuid::new(),
            product_uuid: ProductUuid::new(),
            requester_uuid: requester,
            supplier_uuid: supplier,
            message: "Do you deliver to site?".to_string(),
            quantity: Some(40),
            status,
            response: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn only_the_parties_and_admins_can_view() {
        let requester = actor(Role::ProjectOwner);
        let supplier = actor(Role::Supplier);
        let quote = quote(requester.uuid, supplier.uuid, QuoteStatus::Pending);

        assert!(can_view(&requester, &quote));
        assert!(can_view(&supplier, &quote));
        assert!(can_view(&actor(Role::Admin), &quote));
        assert!(!can_view(&actor(Role::ProjectOwner), &quote));
        assert!(!can_view(&actor(Role::Supplier), &quote));
    }

    #[test]
    fn only_the_addressed_supplier_responds() {
        let supplier = actor(Role::Supplier);
        let quote = quote(UserUuid::new(), supplier.uuid, QuoteStatus::Pending);

        assert_eq!(ensure_can_respond(&supplier, &quote), Ok(()));
        assert_eq!(
            ensure_can_respond(&actor(Role::Supplier), &quote),
            Err(QuoteRuleViolation::Forbidden)
        );
    }

    #[test]
    fn admins_cannot_respond_for_a_supplier() {
        let quote = quote(UserUuid::new(), UserUuid::new(), QuoteStatus::Pending);

        assert_eq!(
            ensure_can_respond(&actor(Role::Admin), &quote),
            Err(QuoteRuleViolation::Forbidden)
        );
    }

    #[test]
    fn responding_again_is_allowed_while_open() {
        let supplier = actor(Role::Supplier);
        let quote = quote(UserUuid::new(), supplier.uuid, QuoteStatus::Responded);

        assert_eq!(ensure_can_respond(&supplier, &quote), Ok(()));
    }

    #[test]
    fn responding_to_a_closed_quote_is_refused() {
        let supplier = actor(Role::Supplier);
        let quote = quote(UserUuid::new(), supplier.uuid, QuoteStatus::Closed);

        assert_eq!(
            ensure_can_respond(&supplier, &quote),
            Err(QuoteRuleViolation::Closed)
        );
    }

    #[test]
    fn requester_and_admin_can_close_but_supplier_cannot() {
        let requester = actor(Role::ProjectOwner);
        let supplier = actor(Role::Supplier);
        let quote = quote(requester.uuid, supplier.uuid, QuoteStatus::Responded);

        assert_eq!(ensure_can_close(&requester, &quote), Ok(()));
        assert_eq!(ensure_can_close(&actor(Role::Admin), &quote), Ok(()));
        assert_eq!(
            ensure_can_close(&supplier, &quote),
            Err(QuoteRuleViolation::Forbidden)
        );
    }

    #[test]
    fn closing_is_allowed_from_every_state() {
        let requester = actor(Role::ProjectOwner);

        for status in [
            QuoteStatus::Pending,
            QuoteStatus::Responded,
            QuoteStatus::Closed,
        ] {
            let quote = quote(requester.uuid, UserUuid::new(), status);

            assert_eq!(ensure_can_close(&requester, &quote), Ok(()));
        }
    }
}
