use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::{new_id, next_timestamp, ProductRepository};
use crate::database::{Collection, DocumentStore, StoreError};
use crate::filter::params::CREATED_AT;
use crate::filter::{Filter, Page, ProductFilter, SortDirection};
use crate::models::Product;

pub const PRODUCTS: &str = "products";

pub struct StoreProductRepository {
    products: Collection<Product>,
}

impl StoreProductRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            products: Collection::new(PRODUCTS, store),
        }
    }

    async fn list_where(&self, field: &str, value: &str) -> Result<Vec<Product>, StoreError> {
        let predicates = Filter::new()
            .where_eq(field, value)
            .order_by(CREATED_AT, SortDirection::Desc)
            .build();
        self.products.query(&predicates).await
    }
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn create(&self, mut product: Product) -> Result<Product, StoreError> {
        if product.id.is_empty() {
            product.id = new_id();
        }
        let now = Utc::now();
        product.created_at = now;
        product.updated_at = now;

        self.products.create(&product.id, &product).await?;
        tracing::info!("Created product {} for cause {}", product.id, product.cause_id);
        Ok(product)
    }

    async fn get_by_id(&self, id: &str) -> Result<Product, StoreError> {
        self.products.get(id).await
    }

    async fn list_by_cause(&self, cause_id: &str) -> Result<Vec<Product>, StoreError> {
        self.list_where("causeId", cause_id).await
    }

    async fn list_by_guiver(&self, guiver_id: &str) -> Result<Vec<Product>, StoreError> {
        self.list_where("guiverId", guiver_id).await
    }

    async fn update(&self, mut product: Product) -> Result<Product, StoreError> {
        product.updated_at = next_timestamp(product.updated_at);
        self.products.update(&product.id, &product).await?;
        Ok(product)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.products.delete(id).await?;
        tracing::info!("Deleted product {}", id);
        Ok(())
    }

    async fn list(&self, filter: &ProductFilter) -> Result<Page<Product>, StoreError> {
        let predicates = filter.to_predicates();
        tracing::debug!("Listing products with {:?}", predicates);
        let items = self.products.query(&predicates).await?;
        let total = self.products.count(&predicates).await?;
        Ok(Page { items, total })
    }
}
