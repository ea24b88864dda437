use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{child_collection, DocumentStore, StoreError};
use crate::filter::{Mutation, Predicate};

/// Typed view of one collection in a `DocumentStore`.
pub struct Collection<T> {
    name: String,
    store: Arc<dyn DocumentStore>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            store: self.store.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(name: impl Into<String>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            name: name.into(),
            store,
            _phantom: PhantomData,
        }
    }

    /// The `child` sub-collection under document `parent_id` of this collection.
    pub fn child<U>(&self, parent_id: &str, child: &str) -> Collection<U>
    where
        U: Serialize + DeserializeOwned + Send + Sync,
    {
        Collection::new(child_collection(&self.name, parent_id, child), self.store.clone())
    }

    pub async fn create(&self, id: &str, document: &T) -> Result<(), StoreError> {
        self.store.create(&self.name, id, serde_json::to_value(document)?).await
    }

    pub async fn get(&self, id: &str) -> Result<T, StoreError> {
        Self::decode(self.store.get(&self.name, id).await?)
    }

    pub async fn update(&self, id: &str, document: &T) -> Result<(), StoreError> {
        self.store.update(&self.name, id, serde_json::to_value(document)?).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(&self.name, id).await
    }

    pub async fn query(&self, predicates: &[Predicate]) -> Result<Vec<T>, StoreError> {
        self.store
            .query(&self.name, predicates)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    pub async fn count(&self, predicates: &[Predicate]) -> Result<u64, StoreError> {
        self.store.count(&self.name, predicates).await
    }

    pub async fn mutate(&self, id: &str, mutations: &[Mutation]) -> Result<T, StoreError> {
        Self::decode(self.store.mutate(&self.name, id, mutations).await?)
    }

    fn decode(value: Value) -> Result<T, StoreError> {
        Ok(serde_json::from_value(value)?)
    }
}
