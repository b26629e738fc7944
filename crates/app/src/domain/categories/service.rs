//! Categories Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::{
    access::Actor,
    categories::{
        data::{CategoryUpdate, NewCategory},
        errors::CategoriesServiceError,
        records::{AttributeKind, AttributeSpec, CategoryRecord, CategoryUuid, slugify},
        repository::{CategoriesRepository, PgCategoriesRepository},
    },
};

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Public category listing.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    async fn get_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Create a category. Admin only.
    async fn create_category(
        &self,
        actor: &Actor,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Replace a category's name, description, and attribute set. Admin only.
    async fn update_category(
        &self,
        actor: &Actor,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Delete a category. Admin only, and refused while products still
    /// reference it.
    async fn delete_category(
        &self,
        actor: &Actor,
        category: CategoryUuid,
    ) -> Result<(), CategoriesServiceError>;

    /// Category total for the admin dashboard. Admin only.
    async fn category_count(&self, actor: &Actor) -> Result<i64, CategoriesServiceError>;
}

pub struct PgCategoriesService {
    categories: Arc<dyn CategoriesRepository>,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            categories: Arc::new(PgCategoriesRepository::new(pool)),
        }
    }

    #[must_use]
    pub fn with_repository(categories: Arc<dyn CategoriesRepository>) -> Self {
        Self { categories }
    }
}

fn validate_definition(
    name: &str,
    attributes: &[AttributeSpec],
) -> Result<String, CategoriesServiceError> {
    if name.trim().is_empty() {
        return Err(CategoriesServiceError::Validation("a name is required"));
    }

    let slug = slugify(name);
    if slug.is_empty() {
        return Err(CategoriesServiceError::Validation(
            "name must contain at least one letter or digit",
        ));
    }

    for (index, spec) in attributes.iter().enumerate() {
        if spec.key.trim().is_empty() {
            return Err(CategoriesServiceError::Validation(
                "attribute keys must not be empty",
            ));
        }

        if attributes[..index].iter().any(|other| other.key == spec.key) {
            return Err(CategoriesServiceError::Validation(
                "attribute keys must be unique",
            ));
        }

        match spec.kind {
            AttributeKind::Select if spec.options.is_empty() => {
                return Err(CategoriesServiceError::Validation(
                    "select attributes need at least one option",
                ));
            }
            AttributeKind::Select => {}
            _ if !spec.options.is_empty() => {
                return Err(CategoriesServiceError::Validation(
                    "only select attributes take options",
                ));
            }
            _ => {}
        }
    }

    Ok(slug)
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        Ok(self.categories.list_categories().await?)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        self.categories
            .find_by_uuid(category)
            .await?
            .ok_or(CategoriesServiceError::NotFound)
    }

    async fn get_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        self.categories
            .find_by_slug(slug)
            .await?
            .ok_or(CategoriesServiceError::NotFound)
    }

    async fn create_category(
        &self,
        actor: &Actor,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if !actor.is_admin() {
            return Err(CategoriesServiceError::Forbidden);
        }

        let slug = validate_definition(&category.name, &category.attributes)?;

        Ok(self
            .categories
            .insert_category(
                CategoryUuid::new(),
                category.name.trim(),
                &slug,
                category.description.as_deref(),
                &category.attributes,
            )
            .await?)
    }

    async fn update_category(
        &self,
        actor: &Actor,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if !actor.is_admin() {
            return Err(CategoriesServiceError::Forbidden);
        }

        let slug = validate_definition(&update.name, &update.attributes)?;

        self.categories
            .update_category(
                category,
                update.name.trim(),
                &slug,
                update.description.as_deref(),
                &update.attributes,
            )
            .await?
            .ok_or(CategoriesServiceError::NotFound)
    }

    async fn delete_category(
        &self,
        actor: &Actor,
        category: CategoryUuid,
    ) -> Result<(), CategoriesServiceError> {
        if !actor.is_admin() {
            return Err(CategoriesServiceError::Forbidden);
        }

        if self.categories.count_products(category).await? > 0 {
            return Err(CategoriesServiceError::InUse);
        }

        if !self.categories.delete_category(category).await? {
            return Err(CategoriesServiceError::NotFound);
        }

        Ok(())
    }

    async fn category_count(&self, actor: &Actor) -> Result<i64, CategoriesServiceError> {
        if !actor.is_admin() {
            return Err(CategoriesServiceError::Forbidden);
        }

        Ok(self.categories.count_categories().await?)
    }
}
