//! Favorite Records

use jiff::Timestamp;

use crate::domain::{products::records::ProductUuid, users::records::UserUuid};

/// Favorite Record
///
/// The (user, product) pair is unique in storage; a user favorites a
/// product at most once.
#[derive(Debug, Clone)]
pub struct FavoriteRecord {
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub created_at: Timestamp,
}
