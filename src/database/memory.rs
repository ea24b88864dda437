use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

use super::{DocumentStore, StoreError};
use crate::filter::{FilterOp, Mutation, Predicate, SortDirection};

/// In-process document store.
///
/// Every mutation holds the write lock for its whole read-modify-write, so
/// `mutate` is atomic with respect to every other call.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(doc: &Value, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::Where { field, op, value } => {
                let Some(actual) = field_value(doc, field) else {
                    return false;
                };
                match (op, compare_values(actual, value)) {
                    (FilterOp::Eq, Some(Ordering::Equal)) => true,
                    (FilterOp::Gte, Some(Ordering::Greater | Ordering::Equal)) => true,
                    (FilterOp::Lte, Some(Ordering::Less | Ordering::Equal)) => true,
                    _ => false,
                }
            }
            Predicate::Search { fields, text } => {
                let needle = text.to_lowercase();
                fields.iter().any(|f| {
                    field_value(doc, f)
                        .and_then(Value::as_str)
                        .map_or(false, |s| s.to_lowercase().contains(&needle))
                })
            }
            _ => true,
        }
    }

    fn filtered<'a>(docs: impl Iterator<Item = &'a Value>, predicates: &[Predicate]) -> Vec<&'a Value> {
        docs.filter(|doc| {
            predicates
                .iter()
                .filter(|p| p.is_filter())
                .all(|p| Self::matches(doc, p))
        })
        .collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        docs.insert(id.to_string(), document);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn update(&self, collection: &str, id: &str, document: Value) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn query(&self, collection: &str, predicates: &[Predicate]) -> Result<Vec<Value>, StoreError> {
        debug!("Query {} with {} predicates", collection, predicates.len());
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(vec![]);
        };

        let mut matched = Self::filtered(docs.values(), predicates);

        let mut limit = None;
        let mut offset = 0;
        for predicate in predicates {
            match predicate {
                Predicate::OrderBy { field, direction } => {
                    matched.sort_by(|a, b| {
                        let ord = match (field_value(a, field), field_value(b, field)) {
                            (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
                            (Some(_), None) => Ordering::Greater,
                            (None, Some(_)) => Ordering::Less,
                            (None, None) => Ordering::Equal,
                        };
                        match direction {
                            SortDirection::Asc => ord,
                            SortDirection::Desc => ord.reverse(),
                        }
                    });
                }
                Predicate::Limit(n) => limit = Some(*n),
                Predicate::Offset(n) => offset = *n,
                _ => {}
            }
        }

        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self, collection: &str, predicates: &[Predicate]) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map_or(0, |docs| Self::filtered(docs.values(), predicates).len() as u64))
    }

    async fn mutate(&self, collection: &str, id: &str, mutations: &[Mutation]) -> Result<Value, StoreError> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        // Apply to a copy so a failing mutation leaves the stored document untouched
        let mut next = doc.clone();
        let object = next.as_object_mut().ok_or_else(|| StoreError::InvalidMutation {
            field: String::new(),
            reason: "document is not an object".to_string(),
        })?;
        for mutation in mutations {
            apply_mutation(object, mutation)?;
        }
        *doc = next.clone();
        Ok(next)
    }
}

fn apply_mutation(object: &mut Map<String, Value>, mutation: &Mutation) -> Result<(), StoreError> {
    match mutation {
        Mutation::Set { field, value } => {
            object.insert(field.clone(), value.clone());
        }
        Mutation::Increment { field, delta, floor } => {
            let current = match object.get(field) {
                None | Some(Value::Null) => 0,
                Some(v) => v.as_i64().ok_or_else(|| StoreError::InvalidMutation {
                    field: field.clone(),
                    reason: "not an integer".to_string(),
                })?,
            };
            let mut next = current.saturating_add(*delta);
            if let Some(floor) = floor {
                next = next.max(*floor);
            }
            object.insert(field.clone(), Value::from(next));
        }
        Mutation::Append { field, value } => match object.get_mut(field) {
            Some(Value::Array(items)) => items.push(value.clone()),
            None | Some(Value::Null) => {
                object.insert(field.clone(), Value::Array(vec![value.clone()]));
            }
            Some(_) => {
                return Err(StoreError::InvalidMutation {
                    field: field.clone(),
                    reason: "not an array".to_string(),
                })
            }
        },
    }
    Ok(())
}

/// Looks up a possibly dotted field path (`contactInfo.email`).
fn field_value<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |v, key| v.get(key))
}

/// Orders numbers numerically and RFC 3339 timestamps chronologically;
/// other strings compare lexically. Mixed kinds do not compare.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => match (parse_timestamp(x), parse_timestamp(y)) {
            (Some(tx), Some(ty)) => Some(tx.cmp(&ty)),
            _ => Some(x.cmp(y)),
        },
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}
