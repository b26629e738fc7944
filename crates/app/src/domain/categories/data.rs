//! Categories Data

use crate::domain::categories::records::AttributeSpec;

/// New category payload.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub attributes: Vec<AttributeSpec>,
}

/// Full-replace update payload. The slug is derived from the name and
/// follows it on rename.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub attributes: Vec<AttributeSpec>,
}
