use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::{ports::DocumentStore, strip_nulls, DomainError, FileRecord};

/// Typed CRUD over a [`DocumentStore`], addressed by `(index, id)`.
///
/// Every outcome is returned to the caller; nothing is logged and dropped
/// here.
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Stores `object` under `(index, id)`, replacing whatever was there.
    #[instrument(skip(self, object))]
    pub async fn insert<T: Serialize + ?Sized>(
        &self,
        object: &T,
        index: &str,
        id: &str,
    ) -> Result<(), DomainError> {
        let document = serde_json::to_value(object)?;
        self.store.index_document(index, id, &document).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<T>, DomainError> {
        match self.store.get_document(index, id).await? {
            Some(source) => Ok(Some(serde_json::from_value(source)?)),
            None => Ok(None),
        }
    }

    /// Stored document as a JSON string, members in stored order.
    #[instrument(skip(self))]
    pub async fn get_source_by_id(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<String>, DomainError> {
        match self.store.get_document(index, id).await? {
            Some(source) => Ok(Some(serde_json::to_string(&source)?)),
            None => Ok(None),
        }
    }

    /// Returns `false` if nothing was stored at the address.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, index: &str, id: &str) -> Result<bool, DomainError> {
        self.store.delete_document(index, id).await
    }

    /// Partial update. Top-level `null` members are dropped before sending,
    /// so only the fields `object` actually sets are overwritten.
    #[instrument(skip(self, object))]
    pub async fn update_by_id<T: Serialize + ?Sized>(
        &self,
        object: &T,
        index: &str,
        id: &str,
    ) -> Result<Value, DomainError> {
        let partial = strip_nulls(serde_json::to_value(object)?);
        if !partial.is_object() {
            return Err(DomainError::validation(
                "partial update must serialize to a JSON object",
            ));
        }
        self.store.update_document(index, id, &partial).await
    }

    #[instrument(skip(self, record), fields(record_id = %record.id))]
    pub async fn update_record_by_id(
        &self,
        record: &FileRecord,
        index: &str,
        id: &str,
    ) -> Result<FileRecord, DomainError> {
        let partial = record.to_partial_document()?;
        let merged = self.store.update_document(index, id, &partial).await?;
        Ok(serde_json::from_value(merged)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryDocumentStore;
    use chrono::NaiveDate;

    fn service() -> DocumentService {
        DocumentService::new(Arc::new(InMemoryDocumentStore::new()))
    }

    fn sample() -> FileRecord {
        FileRecord::with_id(
            "abc123",
            "ftp1",
            "host.example",
            "hello",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_then_get_source() {
        let service = service();
        service.insert(&sample(), "files", "abc123").await.unwrap();

        let source = service
            .get_source_by_id("files", "abc123")
            .await
            .unwrap()
            .unwrap();

        assert!(source.contains(r#""text":"hello""#));
        let back: FileRecord = serde_json::from_str(&source).unwrap();
        assert_eq!(back, sample());
    }

    #[tokio::test]
    async fn test_get_source_keeps_stored_text() {
        let service = service();
        let stored = r#"{"id":"abc123","source":"ftp1","type":"FILE","server":"host.example","text":"hello","modificationDate":"2024-01-15","size":42}"#;
        let document: Value = serde_json::from_str(stored).unwrap();
        service.insert(&document, "files", "abc123").await.unwrap();

        let source = service.get_source_by_id("files", "abc123").await.unwrap();
        assert_eq!(source.as_deref(), Some(stored));
    }

    #[tokio::test]
    async fn test_get_typed_round_trip() {
        let service = service();
        service.insert(&sample(), "files", "abc123").await.unwrap();

        let record: Option<FileRecord> = service.get_by_id("files", "abc123").await.unwrap();
        assert_eq!(record, Some(sample()));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let service = service();

        let record: Option<FileRecord> = service.get_by_id("files", "nope").await.unwrap();
        assert!(record.is_none());
        assert!(service
            .get_source_by_id("files", "nope")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let service = service();
        service.insert(&sample(), "files", "abc123").await.unwrap();

        assert!(service.delete_by_id("files", "abc123").await.unwrap());
        assert!(service
            .get_source_by_id("files", "abc123")
            .await
            .unwrap()
            .is_none());
        assert!(!service.delete_by_id("files", "abc123").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let service = service();
        service.insert(&sample(), "files", "abc123").await.unwrap();

        let mut patch = FileRecord::new().with_text("bye");
        patch.id = "abc123".into();

        let merged = service
            .update_record_by_id(&patch, "files", "abc123")
            .await
            .unwrap();

        assert_eq!(merged.text.as_deref(), Some("bye"));
        assert_eq!(merged.source.as_deref(), Some("ftp1"));
        assert_eq!(merged.server.as_deref(), Some("host.example"));
        assert_eq!(merged.modification_date, sample().modification_date);
    }

    #[tokio::test]
    async fn test_update_with_arbitrary_object() {
        let service = service();
        service.insert(&sample(), "files", "abc123").await.unwrap();

        let merged = service
            .update_by_id(
                &serde_json::json!({ "server": "mirror.example", "text": null }),
                "files",
                "abc123",
            )
            .await
            .unwrap();

        assert_eq!(merged["server"], "mirror.example");
        assert_eq!(merged["text"], "hello");
    }

    #[tokio::test]
    async fn test_update_rejects_non_objects() {
        let service = service();

        let err = service.update_by_id("text", "files", "abc123").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service();

        let err = service
            .update_record_by_id(&sample(), "files", "abc123")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
