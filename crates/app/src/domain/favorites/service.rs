//! Favorites Service

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, error::ErrorKind};
use tracing::debug;

use crate::domain::{
    access::Actor,
    favorites::{
        errors::FavoritesServiceError,
        repository::{FavoritesRepository, PgFavoritesRepository},
    },
    products::{
        PgProductsRepository, ProductsRepository,
        records::{ProductRecord, ProductUuid},
        visibility::visible_to,
    },
    revalidate::{LogRevalidator, Revalidator},
    users::records::Role,
};

#[automock]
#[async_trait]
pub trait FavoritesService: Send + Sync {
    /// Flip the favorite state of a product for the acting user.
    /// Project owners only. Returns the new state: `true` when the
    /// product is now favorited.
    async fn toggle_favorite(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError>;

    async fn is_favorited(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError>;

    /// The actor's favorited products, filtered to what they may
    /// currently see. Project owners only.
    async fn list_favorites(
        &self,
        actor: &Actor,
    ) -> Result<Vec<ProductRecord>, FavoritesServiceError>;
}

pub struct PgFavoritesService {
    favorites: Arc<dyn FavoritesRepository>,
    products: Arc<dyn ProductsRepository>,
    revalidator: Arc<dyn Revalidator>,
}

impl PgFavoritesService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            favorites: Arc::new(PgFavoritesRepository::new(pool.clone())),
            products: Arc::new(PgProductsRepository::new(pool)),
            revalidator: Arc::new(LogRevalidator),
        }
    }

    #[must_use]
    pub fn with_dependencies(
        favorites: Arc<dyn FavoritesRepository>,
        products: Arc<dyn ProductsRepository>,
        revalidator: Arc<dyn Revalidator>,
    ) -> Self {
        Self {
            favorites,
            products,
            revalidator,
        }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| db.kind() == ErrorKind::UniqueViolation)
}

#[async_trait]
impl FavoritesService for PgFavoritesService {
    async fn toggle_favorite(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError> {
        if !actor.has_role(Role::ProjectOwner) {
            return Err(FavoritesServiceError::Forbidden);
        }

        let record = self
            .products
            .find_by_uuid(product)
            .await?
            .ok_or(FavoritesServiceError::ProductNotFound)?;

        if !visible_to(record.active, record.supplier_uuid, Some(actor)) {
            return Err(FavoritesServiceError::ProductNotFound);
        }

        let favorited = if self.favorites.favorite_exists(actor.uuid, product).await? {
            self.favorites.delete_favorite(actor.uuid, product).await?;
            false
        } else {
            match self.favorites.insert_favorite(actor.uuid, product).await {
                Ok(()) => true,
                // Two toggles raced; the other one won the insert, so
                // the product is favorited either way.
                Err(error) if is_unique_violation(&error) => {
                    debug!(user = %actor.uuid, product = %product, "favorite insert raced");
                    true
                }
                Err(error) => return Err(error.into()),
            }
        };

        self.revalidator.revalidate("/favorites");

        Ok(favorited)
    }

    async fn is_favorited(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<bool, FavoritesServiceError> {
        Ok(self.favorites.favorite_exists(actor.uuid, product).await?)
    }

    async fn list_favorites(
        &self,
        actor: &Actor,
    ) -> Result<Vec<ProductRecord>, FavoritesServiceError> {
        if !actor.has_role(Role::ProjectOwner) {
            return Err(FavoritesServiceError::Forbidden);
        }

        let products = self.favorites.list_favorite_products(actor.uuid).await?;

        // Favorited products that have since been hidden stay stored
        // but drop out of the listing.
        Ok(products
            .into_iter()
            .filter(|product| visible_to(product.active, product.supplier_uuid, Some(actor)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jiff::Timestamp;
    use testresult::TestResult;

    use super::*;
    use crate::domain::{
        favorites::repository::MockFavoritesRepository,
        products::MockProductsRepository,
        revalidate::NoopRevalidator,
        users::records::{Role, UserUuid},
    };

    fn actor(role: Role) -> Actor {
        Actor {
            uuid: UserUuid::new(),
            role,
            active: true,
        }
    }

    fn product(active: bool) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            supplier_uuid: UserUuid::new(),
            category_uuid: crate::domain::categories::records::CategoryUuid::new(),
            name: "Reclaimed bricks".to_string(),
            description: String::new(),
            price_minor: 25_000,
            unit: None,
            location: None,
            images: vec![],
            attributes: BTreeMap::new(),
            active,
            version: 1,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn products_with(record: ProductRecord) -> MockProductsRepository {
        let mut products = MockProductsRepository::new();
        products
            .expect_find_by_uuid()
            .returning(move |_| Ok(Some(record.clone())));
        products
    }

    fn service(
        favorites: MockFavoritesRepository,
        products: MockProductsRepository,
    ) -> PgFavoritesService {
        PgFavoritesService::with_dependencies(
            Arc::new(favorites),
            Arc::new(products),
            Arc::new(NoopRevalidator),
        )
    }

    #[tokio::test]
    async fn toggling_an_unfavorited_product_favorites_it() -> TestResult {
        let record = product(true);
        let uuid = record.uuid;

        let mut favorites = MockFavoritesRepository::new();
        favorites.expect_favorite_exists().returning(|_, _| Ok(false));
        favorites.expect_insert_favorite().returning(|_, _| Ok(()));

        let service = service(favorites, products_with(record));
        let favorited = service
            .toggle_favorite(&actor(Role::ProjectOwner), uuid)
            .await?;

        assert!(favorited);

        Ok(())
    }

    #[tokio::test]
    async fn toggling_a_favorited_product_unfavorites_it() -> TestResult {
        let record = product(true);
        let uuid = record.uuid;

        let mut favorites = MockFavoritesRepository::new();
        favorites.expect_favorite_exists().returning(|_, _| Ok(true));
        favorites.expect_delete_favorite().returning(|_, _| Ok(true));

        let service = service(favorites, products_with(record));
        let favorited = service
            .toggle_favorite(&actor(Role::ProjectOwner), uuid)
            .await?;

        assert!(!favorited);

        Ok(())
    }

    #[tokio::test]
    async fn non_unique_insert_failures_propagate() {
        let record = product(true);
        let uuid = record.uuid;

        let mut favorites = MockFavoritesRepository::new();
        favorites.expect_favorite_exists().returning(|_, _| Ok(false));
        favorites
            .expect_insert_favorite()
            .returning(|_, _| Err(sqlx::Error::PoolClosed));

        // Only the unique violation from a racing toggle is absorbed;
        // anything else fails the call.
        let service = service(favorites, products_with(record));
        let result = service.toggle_favorite(&actor(Role::ProjectOwner), uuid).await;

        assert!(matches!(result, Err(FavoritesServiceError::Sql(_))));
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
    }

    #[tokio::test]
    async fn only_project_owners_keep_favorites() {
        let service = service(
            MockFavoritesRepository::new(),
            MockProductsRepository::new(),
        );

        for caller in [actor(Role::Supplier), actor(Role::Admin)] {
            let toggle = service.toggle_favorite(&caller, ProductUuid::new()).await;
            let list = service.list_favorites(&caller).await;

            assert!(matches!(toggle, Err(FavoritesServiceError::Forbidden)));
            assert!(matches!(list, Err(FavoritesServiceError::Forbidden)));
        }
    }

    #[tokio::test]
    async fn hidden_products_cannot_be_favorited() {
        let record = product(false);
        let uuid = record.uuid;

        let service = service(MockFavoritesRepository::new(), products_with(record));
        let result = service.toggle_favorite(&actor(Role::ProjectOwner), uuid).await;

        assert!(matches!(
            result,
            Err(FavoritesServiceError::ProductNotFound)
        ));
    }

    #[tokio::test]
    async fn favorite_listing_hides_products_that_went_inactive() -> TestResult {
        let visible = product(true);
        let hidden = product(false);
        let visible_uuid = visible.uuid;

        let mut favorites = MockFavoritesRepository::new();
        favorites
            .expect_list_favorite_products()
            .returning(move |_| Ok(vec![visible.clone(), hidden.clone()]));

        let service = service(favorites, MockProductsRepository::new());
        let listed = service.list_favorites(&actor(Role::ProjectOwner)).await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].uuid, visible_uuid);

        Ok(())
    }
}
