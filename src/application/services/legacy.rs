//! Backward-compatible facade for callers written against the old contract:
//! writes report nothing back, and a missing document reads as a fixed
//! string.

use serde::Serialize;
use std::sync::Arc;

use crate::application::services::DocumentService;

pub const NOT_FOUND_SENTINEL: &str = "Document was not found";

pub struct LegacyDocumentOperations {
    service: Arc<DocumentService>,
}

impl LegacyDocumentOperations {
    pub fn new(service: Arc<DocumentService>) -> Self {
        Self { service }
    }

    pub async fn insert<T: Serialize + ?Sized>(&self, object: &T, index: &str, id: &str) {
        if let Err(e) = self.service.insert(object, index, id).await {
            tracing::error!(error = %e, index, id, "insert failed");
        }
    }

    /// Raw JSON of the stored document, or [`NOT_FOUND_SENTINEL`] when it is
    /// absent or could not be read.
    pub async fn get_by_id(&self, index: &str, id: &str) -> String {
        match self.service.get_source_by_id(index, id).await {
            Ok(Some(source)) => source,
            Ok(None) => NOT_FOUND_SENTINEL.to_string(),
            Err(e) => {
                tracing::error!(error = %e, index, id, "get failed");
                NOT_FOUND_SENTINEL.to_string()
            }
        }
    }

    pub async fn delete_by_id(&self, index: &str, id: &str) {
        if let Err(e) = self.service.delete_by_id(index, id).await {
            tracing::error!(error = %e, index, id, "delete failed");
        }
    }

    pub async fn update_by_id<T: Serialize + ?Sized>(&self, object: &T, index: &str, id: &str) {
        if let Err(e) = self.service.update_by_id(object, index, id).await {
            tracing::error!(error = %e, index, id, "update failed");
        }
    }
}
