//! Product Records

use std::collections::BTreeMap;

use jiff::Timestamp;

use crate::{
    domain::{categories::records::CategoryUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Attribute values keyed by the attribute key declared on the
/// product's category.
pub type AttributeValues = BTreeMap<String, serde_json::Value>;

/// Product Record
///
/// Prices are stored in minor currency units. The `version` counter
/// increments on every write and backs optimistic concurrency control
/// for edits and status changes.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub supplier_uuid: UserUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub price_minor: i64,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub attributes: AttributeValues,
    pub active: bool,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
