//! Category Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Value shape of a product attribute declared by a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Free-form text.
    Text,
    /// Whole number.
    Integer,
    /// Yes or no.
    Flag,
    /// One of a fixed set of options.
    Select,
}

/// One attribute a category requires or allows on its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    pub key: String,
    pub kind: AttributeKind,
    /// Allowed values for [`AttributeKind::Select`], empty otherwise.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub attributes: Vec<AttributeSpec>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Derive a URL slug from a category name.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_string()
}
