//! Entity repositories: collection names, identifiers, timestamps and the
//! cause-specific nested operations, over a shared `DocumentStore`.

pub mod cause;
pub mod guiver;
pub mod product;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::database::StoreError;
use crate::filter::{CauseFilter, Page, Pagination, ProductFilter};
use crate::models::{Cause, Comment, Guiver, Product, Update};

pub use cause::StoreCauseRepository;
pub use guiver::StoreGuiverRepository;
pub use product::StoreProductRepository;

#[async_trait]
pub trait GuiverRepository: Send + Sync {
    /// Assigns an id when the guiver has none and stamps both timestamps.
    async fn create(&self, guiver: Guiver) -> Result<Guiver, StoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Guiver, StoreError>;
    /// Re-stamps `updatedAt` and overwrites the stored document.
    async fn update(&self, guiver: Guiver) -> Result<Guiver, StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CauseRepository: Send + Sync {
    /// Assigns an id when missing, stamps timestamps and resets likes to 0.
    async fn create(&self, cause: Cause) -> Result<Cause, StoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Cause, StoreError>;
    async fn list_by_guiver(&self, guiver_id: &str) -> Result<Vec<Cause>, StoreError>;
    async fn update(&self, cause: Cause) -> Result<Cause, StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
    async fn list(&self, filter: &CauseFilter) -> Result<Page<Cause>, StoreError>;
    /// Appends to the embedded update list.
    async fn add_update(&self, cause_id: &str, update: Update) -> Result<Update, StoreError>;
    /// Inserts into the cause's comment sub-collection without reading the cause.
    async fn add_comment(&self, cause_id: &str, comment: Comment) -> Result<Comment, StoreError>;
    async fn list_comments(&self, cause_id: &str, pagination: Pagination) -> Result<Page<Comment>, StoreError>;
    /// Adds or removes one like and returns the new count, which never drops below 0.
    async fn update_likes(&self, cause_id: &str, increment: bool) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> Result<Product, StoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Product, StoreError>;
    async fn list_by_cause(&self, cause_id: &str) -> Result<Vec<Product>, StoreError>;
    async fn list_by_guiver(&self, guiver_id: &str) -> Result<Vec<Product>, StoreError>;
    async fn update(&self, product: Product) -> Result<Product, StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
    async fn list(&self, filter: &ProductFilter) -> Result<Page<Product>, StoreError>;
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Now, or one microsecond past `previous` if the clock has not moved on.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_timestamp_is_strictly_later() {
        let future = Utc::now() + Duration::hours(1);
        assert!(next_timestamp(future) > future);
        let past = Utc::now() - Duration::hours(1);
        assert!(next_timestamp(past) > past);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
