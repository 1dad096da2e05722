use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag stored in the `type` field of every indexed record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ModelType {
    #[default]
    File,
}

/// Metadata and extracted text of one ingested file.
///
/// Serializes to `{id, source, type, server, text, modificationDate}`.
/// Nothing is validated: empty strings and unset fields are stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub source: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ModelType,
    pub server: Option<String>,
    pub text: Option<String>,
    pub modification_date: Option<NaiveDate>,
}

impl FileRecord {
    /// Creates an empty record with a random id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            source: None,
            kind: ModelType::File,
            server: None,
            text: None,
            modification_date: None,
        }
    }

    pub fn with_content(
        source: impl Into<String>,
        server: impl Into<String>,
        text: impl Into<String>,
        modification_date: NaiveDate,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            source,
            server,
            text,
            modification_date,
        )
    }

    pub fn with_id(
        id: impl Into<String>,
        source: impl Into<String>,
        server: impl Into<String>,
        text: impl Into<String>,
        modification_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            source: Some(source.into()),
            kind: ModelType::File,
            server: Some(server.into()),
            text: Some(text.into()),
            modification_date: Some(modification_date),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_modification_date(mut self, date: NaiveDate) -> Self {
        self.modification_date = Some(date);
        self
    }

    /// JSON object of this record with unset fields left out, suitable for a
    /// partial update that must not clear stored values.
    pub fn to_partial_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self).map(strip_nulls)
    }
}

impl Default for FileRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops `null` members from a top-level JSON object.
pub fn strip_nulls(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            serde_json::Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect())
        }
        other => other,
    }
}
