//! Product response models.

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::products::records::ProductRecord;

/// Public view of a catalog listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The supplier who listed it
    pub supplier_uuid: Uuid,

    /// The category it is listed under
    pub category_uuid: Uuid,

    /// Listing title
    pub name: String,

    /// Listing description
    pub description: String,

    /// The price in minor currency units
    pub price_minor: i64,

    /// Pricing unit, if any (e.g. pallet, tonne)
    pub unit: Option<String>,

    /// Pickup or delivery location, if given
    pub location: Option<String>,

    /// Image URLs
    pub images: Vec<String>,

    /// Attribute values keyed by the category's attribute keys
    pub attributes: BTreeMap<String, serde_json::Value>,

    /// Whether the listing is on the public catalog
    pub active: bool,

    /// Version counter for optimistic concurrency; echo it back on edits
    pub version: i64,

    /// Whether the caller has favorited this listing. Only present on
    /// single-listing fetches by project owners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,

    /// The date and time the listing was created
    pub created_at: String,

    /// The date and time the listing was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            supplier_uuid: product.supplier_uuid.into(),
            category_uuid: product.category_uuid.into(),
            name: product.name,
            description: product.description,
            price_minor: product.price_minor,
            unit: product.unit,
            location: product.location,
            images: product.images,
            attributes: product.attributes,
            active: product.active,
            version: product.version,
            is_favorite: None,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
