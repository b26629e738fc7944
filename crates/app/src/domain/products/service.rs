//! Products Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::domain::{
    access::{Actor, can_manage},
    categories::{
        CategoriesRepository, PgCategoriesRepository,
    },
    products::{
        attributes::validate_attributes,
        data::{
            NewProduct, NewProductRecord, ProductChanges, ProductCounts, ProductFilter,
            ProductPage, ProductUpdate, StatusChange,
        },
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::{PgProductsRepository, ProductsRepository},
        visibility::{ListingScope, visible_to},
    },
    revalidate::{LogRevalidator, Revalidator},
    users::records::Role,
};

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// One page of the catalog, scoped to what the viewer may see.
    async fn list_products<'a>(
        &self,
        viewer: Option<&'a Actor>,
        filter: ProductFilter,
    ) -> Result<ProductPage, ProductsServiceError>;

    /// Single product read behind the same visibility gate as listings.
    async fn get_product<'a>(
        &self,
        viewer: Option<&'a Actor>,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// List a product. Active suppliers only; the listing starts
    /// inactive until an admin approves it.
    async fn create_product(
        &self,
        actor: &Actor,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Edit a product. The owning supplier or an admin. A supplier edit
    /// takes the product off the public catalog until re-approval.
    async fn update_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Approve or suspend a listing. Admin only.
    async fn set_product_active(
        &self,
        actor: &Actor,
        change: StatusChange,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Remove a listing. The owning supplier or an admin.
    async fn delete_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    /// Dashboard totals. Admin only.
    async fn product_counts(&self, actor: &Actor) -> Result<ProductCounts, ProductsServiceError>;
}

pub struct PgProductsService {
    products: Arc<dyn ProductsRepository>,
    categories: Arc<dyn CategoriesRepository>,
    revalidator: Arc<dyn Revalidator>,
}

impl PgProductsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            products: Arc::new(PgProductsRepository::new(pool.clone())),
            categories: Arc::new(PgCategoriesRepository::new(pool)),
            revalidator: Arc::new(LogRevalidator),
        }
    }

    #[must_use]
    pub fn with_dependencies(
        products: Arc<dyn ProductsRepository>,
        categories: Arc<dyn CategoriesRepository>,
        revalidator: Arc<dyn Revalidator>,
    ) -> Self {
        Self {
            products,
            categories,
            revalidator,
        }
    }

    async fn validate(
        &self,
        product: &NewProduct,
    ) -> Result<(), ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::Validation("a name is required"));
        }

        if product.price_minor < 0 {
            return Err(ProductsServiceError::Validation(
                "price must not be negative",
            ));
        }

        let category = self
            .categories
            .find_by_uuid(product.category_uuid)
            .await
            .map_err(ProductsServiceError::Sql)?
            .ok_or(ProductsServiceError::Validation("unknown category"))?;

        validate_attributes(&category.attributes, &product.attributes)
            .map_err(ProductsServiceError::Validation)
    }

    /// Decide between a missing row and a lost version race after a
    /// versioned write matched nothing.
    async fn stale_or_missing(
        &self,
        product: ProductUuid,
    ) -> Result<ProductsServiceError, ProductsServiceError> {
        match self.products.find_by_uuid(product).await {
            Ok(Some(_)) => Ok(ProductsServiceError::Conflict),
            Ok(None) => Ok(ProductsServiceError::NotFound),
            Err(error) => Err(error.into()),
        }
    }

    fn revalidate_catalog(&self, product: ProductUuid) {
        self.revalidator.revalidate("/products");
        self.revalidator.revalidate(&format!("/products/{product}"));
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products<'a>(
        &self,
        viewer: Option<&'a Actor>,
        filter: ProductFilter,
    ) -> Result<ProductPage, ProductsServiceError> {
        let filter = filter.normalized();
        let scope = ListingScope::for_viewer(viewer);

        let products = self.products.list_products(scope, filter.clone()).await?;
        let total = self.products.count_products(scope, filter.clone()).await?;

        Ok(ProductPage {
            products,
            total,
            page: filter.page,
            limit: filter.limit,
        })
    }

    async fn get_product<'a>(
        &self,
        viewer: Option<&'a Actor>,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let record = self
            .products
            .find_by_uuid(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        // Hidden products are indistinguishable from missing ones.
        if !visible_to(record.active, record.supplier_uuid, viewer) {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(record)
    }

    async fn create_product(
        &self,
        actor: &Actor,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if !actor.has_role(Role::Supplier) || !actor.active {
            return Err(ProductsServiceError::Forbidden);
        }

        self.validate(&product).await?;

        let record = self
            .products
            .insert_product(NewProductRecord {
                uuid: ProductUuid::new(),
                supplier_uuid: actor.uuid,
                category_uuid: product.category_uuid,
                name: product.name.trim().to_string(),
                description: product.description,
                price_minor: product.price_minor,
                unit: product.unit,
                location: product.location,
                images: product.images,
                attributes: product.attributes,
                active: false,
            })
            .await?;

        info!(product = %record.uuid, supplier = %record.supplier_uuid, "product listed");
        self.revalidate_catalog(record.uuid);

        Ok(record)
    }

    async fn update_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let existing = self
            .products
            .find_by_uuid(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if !can_manage(Some(actor), existing.supplier_uuid) {
            return Err(ProductsServiceError::Forbidden);
        }

        self.validate(&NewProduct {
            category_uuid: update.category_uuid,
            name: update.name.clone(),
            description: update.description.clone(),
            price_minor: update.price_minor,
            unit: update.unit.clone(),
            location: update.location.clone(),
            images: update.images.clone(),
            attributes: update.attributes.clone(),
        })
        .await?;

        // A supplier edit goes back into the approval queue; an admin
        // edit leaves the published state alone.
        let active = if actor.is_admin() {
            existing.active
        } else {
            false
        };

        let changes = ProductChanges {
            category_uuid: update.category_uuid,
            name: update.name.trim().to_string(),
            description: update.description,
            price_minor: update.price_minor,
            unit: update.unit,
            location: update.location,
            images: update.images,
            attributes: update.attributes,
            active,
        };

        match self
            .products
            .update_product(product, update.expected_version, changes)
            .await?
        {
            Some(record) => {
                self.revalidate_catalog(record.uuid);
                Ok(record)
            }
            None => Err(self.stale_or_missing(product).await?),
        }
    }

    async fn set_product_active(
        &self,
        actor: &Actor,
        change: StatusChange,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        match self
            .products
            .set_active(change.product, change.expected_version, change.active)
            .await?
        {
            Some(record) => {
                info!(product = %record.uuid, active = record.active, "product status changed");
                self.revalidate_catalog(record.uuid);
                Ok(record)
            }
            None => Err(self.stale_or_missing(change.product).await?),
        }
    }

    async fn delete_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let existing = self
            .products
            .find_by_uuid(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        if !can_manage(Some(actor), existing.supplier_uuid) {
            return Err(ProductsServiceError::Forbidden);
        }

        if !self.products.delete_product(product).await? {
            return Err(ProductsServiceError::NotFound);
        }

        self.revalidate_catalog(product);

        Ok(())
    }

    async fn product_counts(&self, actor: &Actor) -> Result<ProductCounts, ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        Ok(self.products.count_totals().await?)
    }
}
