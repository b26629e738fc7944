//! Category request and response models.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quarry_app::domain::categories::records::{AttributeKind, AttributeSpec, CategoryRecord};

/// One attribute a category requires or allows on its products.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AttributeSpecBody {
    /// Attribute key products fill in
    pub key: String,

    /// Value shape: text, integer, flag, or select
    pub kind: String,

    /// Allowed values for select attributes
    #[serde(default)]
    pub options: Vec<String>,

    /// Whether products must provide this attribute
    #[serde(default)]
    pub required: bool,
}

impl AttributeSpecBody {
    pub(crate) fn into_spec(self) -> Result<AttributeSpec, StatusError> {
        let kind = match self.kind.as_str() {
            "text" => AttributeKind::Text,
            "integer" => AttributeKind::Integer,
            "flag" => AttributeKind::Flag,
            "select" => AttributeKind::Select,
            _ => {
                return Err(StatusError::bad_request()
                    .brief("unknown attribute kind, expected text, integer, flag, or select"));
            }
        };

        Ok(AttributeSpec {
            key: self.key,
            kind,
            options: self.options,
            required: self.required,
        })
    }
}

impl From<AttributeSpec> for AttributeSpecBody {
    fn from(spec: AttributeSpec) -> Self {
        let kind = match spec.kind {
            AttributeKind::Text => "text",
            AttributeKind::Integer => "integer",
            AttributeKind::Flag => "flag",
            AttributeKind::Select => "select",
        };

        AttributeSpecBody {
            key: spec.key,
            kind: kind.to_string(),
            options: spec.options,
            required: spec.required,
        }
    }
}

pub(crate) fn into_specs(
    attributes: Vec<AttributeSpecBody>,
) -> Result<Vec<AttributeSpec>, StatusError> {
    attributes
        .into_iter()
        .map(AttributeSpecBody::into_spec)
        .collect()
}

/// Public view of a category.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The unique identifier of the category
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// URL slug derived from the name
    pub slug: String,

    /// Optional description
    pub description: Option<String>,

    /// Attribute schema for products in this category
    pub attributes: Vec<AttributeSpecBody>,

    /// The date and time the category was created
    pub created_at: String,

    /// The date and time the category was last updated
    pub updated_at: String,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        CategoryResponse {
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            description: category.description,
            attributes: category.attributes.into_iter().map(Into::into).collect(),
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}
