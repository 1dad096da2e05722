use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{
    ports::{Deleter, DocumentStore, Inserter, Reader, Updater},
    DomainError,
};

type Key = (String, String);

pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<Key, Value>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
impl InMemoryDocumentStore {
    fn len(&self) -> usize {
        self.documents.read().unwrap().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn key(index: &str, id: &str) -> Key {
    (index.to_string(), id.to_string())
}

/// Recursive object merge, matching the store's partial-update semantics:
/// objects merge key by key, anything else is replaced.
fn merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (k, v) in patch {
                match target.get_mut(k) {
                    Some(existing) if existing.is_object() && v.is_object() => merge(existing, v),
                    Some(existing) => *existing = v.clone(),
                    None => {
                        target.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

#[async_trait]
impl Inserter for InMemoryDocumentStore {
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), DomainError> {
        let mut store = self
            .documents
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        store.insert(key(index, id), document.clone());
        Ok(())
    }
}

#[async_trait]
impl Reader for InMemoryDocumentStore {
    async fn get_document(&self, index: &str, id: &str) -> Result<Option<Value>, DomainError> {
        let store = self
            .documents
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(store.get(&key(index, id)).cloned())
    }
}

#[async_trait]
impl Deleter for InMemoryDocumentStore {
    async fn delete_document(&self, index: &str, id: &str) -> Result<bool, DomainError> {
        let mut store = self
            .documents
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(store.remove(&key(index, id)).is_some())
    }
}

#[async_trait]
impl Updater for InMemoryDocumentStore {
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        partial: &Value,
    ) -> Result<Value, DomainError> {
        let mut store = self
            .documents
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let existing = store
            .get_mut(&key(index, id))
            .ok_or_else(|| DomainError::not_found(format!("{index}/{id}")))?;

        merge(existing, partial);
        Ok(existing.clone())
    }
}

impl DocumentStore for InMemoryDocumentStore {}
