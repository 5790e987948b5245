//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::products::{
        data::ProductUpdate,
        errors::ProductsServiceError,
        records::{Product, ProductUuid},
        repository::MongoProductsRepository,
    },
    schemas::ProductIn,
};

#[derive(Debug, Clone)]
pub struct MongoProductsService {
    repository: MongoProductsRepository,
}

impl MongoProductsService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            repository: MongoProductsRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductsService for MongoProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        self.repository.list_products().await
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        self.repository
            .get_product(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: ProductIn) -> Result<Product, ProductsServiceError> {
        let created = self.repository.create_product(product).await?;

        debug!(product_id = %created.meta.id, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if update.is_empty() {
            return Err(ProductsServiceError::InvalidData);
        }

        self.repository
            .update_product(product, &update, Timestamp::now())
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let deleted = self.repository.delete_product(product).await?;

        if deleted == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        debug!(product_id = %product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, oldest first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Stores a validated product.
    async fn create_product(&self, product: ProductIn) -> Result<Product, ProductsServiceError>;

    /// Applies the present fields of `update` and refreshes `updated_at`.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
