//! Capability traits over a document store addressed by `(index, id)`.
//!
//! Documents cross these traits as raw JSON; typing happens in the
//! application layer.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainError;

#[async_trait]
pub trait Inserter: Send + Sync {
    /// Stores `document` under `(index, id)`, replacing any existing one.
    async fn index_document(&self, index: &str, id: &str, document: &Value)
        -> Result<(), DomainError>;
}

#[async_trait]
pub trait Reader: Send + Sync {
    /// Returns the stored source, or `None` when the document or its index
    /// does not exist.
    async fn get_document(&self, index: &str, id: &str) -> Result<Option<Value>, DomainError>;
}

#[async_trait]
pub trait Deleter: Send + Sync {
    /// Returns `false` when there was nothing to delete.
    async fn delete_document(&self, index: &str, id: &str) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait Updater: Send + Sync {
    /// Merges `partial` into the stored document and returns the result.
    /// Fails with [`DomainError::NotFound`] when the document is missing.
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        partial: &Value,
    ) -> Result<Value, DomainError>;
}

#[async_trait]
pub trait DocumentStore: Inserter + Reader + Deleter + Updater {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
