//! Document store adapter.
//!
//! Repositories talk to a `DocumentStore` trait object: create, get,
//! overwrite, delete and query JSON documents by collection name, plus
//! counting and single-document atomic mutation. `MemoryStore` is the
//! bundled backend; `Collection<T>` layers typed (de)serialization on top.

pub mod collection;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::filter::{Mutation, Predicate};

pub use collection::Collection;
pub use memory::MemoryStore;

/// Errors from a `DocumentStore`
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Document already exists: {collection}/{id}")]
    AlreadyExists { collection: String, id: String },

    #[error("Invalid mutation on '{field}': {reason}")]
    InvalidMutation { field: String, reason: String },

    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Document database seam. Documents are JSON objects keyed by id within a
/// collection; sub-collections use `parent/<id>/child` collection paths.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `document` under a fresh `id`. Fails with `AlreadyExists` when
    /// the id is taken; the check and the insert are one step.
    async fn create(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    /// Full overwrite (upsert), never a field merge.
    async fn update(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError>;

    /// Deleting a missing document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn query(&self, collection: &str, predicates: &[Predicate]) -> Result<Vec<Value>, StoreError>;

    /// Number of documents matching the filter predicates; order, limit and
    /// offset are ignored.
    async fn count(&self, collection: &str, predicates: &[Predicate]) -> Result<u64, StoreError>;

    /// Applies `mutations` to one existing document as a single atomic step
    /// and returns the document as written.
    async fn mutate(&self, collection: &str, id: &str, mutations: &[Mutation]) -> Result<Value, StoreError>;
}

/// Path of a sub-collection owned by one parent document.
pub fn child_collection(parent: &str, parent_id: &str, child: &str) -> String {
    format!("{}/{}/{}", parent, parent_id, child)
}
