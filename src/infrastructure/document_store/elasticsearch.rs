use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::{
    ports::{Deleter, DocumentStore, Inserter, Reader, Updater},
    DomainError,
};
use crate::infrastructure::config::ElasticsearchConfig;

/// Document store backed by the Elasticsearch REST API.
///
/// Each operation is a single request; retries, versioning and refresh
/// policy are left to the cluster.
pub struct ElasticsearchDocumentStore {
    client: Client,
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    get: Option<GetResponse>,
}

impl ElasticsearchDocumentStore {
    pub fn new(config: &ElasticsearchConfig) -> Result<Self, DomainError> {
        let base_url = Url::parse(&config.url).map_err(|e| {
            DomainError::validation(format!("invalid Elasticsearch url '{}': {e}", config.url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::validation(format!(
                "Elasticsearch url '{}' cannot be used as a base",
                config.url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        debug!(url = %base_url, "Elasticsearch client initialized");

        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Builds `{base}/{index}/{endpoint}/{id}`.
    ///
    /// URL parsing folds `.` and `..` segments (including `%2E` forms), so
    /// such names cannot be addressed by path and are rejected up front.
    fn document_url(&self, index: &str, endpoint: &str, id: &str) -> Result<Url, DomainError> {
        check_segment("index", index)?;
        check_segment("id", id)?;
        self.url(&[index, endpoint, id])
    }

    fn url(&self, segments: &[&str]) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::internal("Elasticsearch url cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.username {
            Some(username) => builder.basic_auth(username, self.password.as_ref()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, DomainError> {
        builder
            .send()
            .await
            .map_err(|e| DomainError::external(e.to_string()))
    }
}

fn check_segment(name: &str, value: &str) -> Result<(), DomainError> {
    match value {
        "" => Err(DomainError::validation(format!("{name} must not be empty"))),
        "." | ".." => Err(DomainError::validation(format!(
            "{name} '{value}' cannot be addressed in a request path"
        ))),
        _ => Ok(()),
    }
}

/// Turns a failed response into an error carrying the store's own
/// `error.type` and `error.reason` when present.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    describe_error(status, &body)
}

fn describe_error(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |pointer: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.pointer(pointer))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    match (field("/error/type"), field("/error/reason")) {
        (Some(kind), Some(reason)) => format!("{status}: {kind}: {reason}"),
        (Some(kind), None) => format!("{status}: {kind}"),
        _ if body.is_empty() => status.to_string(),
        _ => format!("{status}: {body}"),
    }
}

#[async_trait]
impl Inserter for ElasticsearchDocumentStore {
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), DomainError> {
        let url = self.document_url(index, "_doc", id)?;
        let response = self.send(self.request(Method::PUT, url).json(document)).await?;

        if !response.status().is_success() {
            return Err(DomainError::external(error_message(response).await));
        }

        debug!(index, id, "document indexed");
        Ok(())
    }
}

#[async_trait]
impl Reader for ElasticsearchDocumentStore {
    async fn get_document(&self, index: &str, id: &str) -> Result<Option<Value>, DomainError> {
        let url = self.document_url(index, "_doc", id)?;
        let response = self.send(self.request(Method::GET, url)).await?;

        // Both a missing document and a missing index come back as 404.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(DomainError::external(error_message(response).await));
        }

        let body: GetResponse = response
            .json()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(if body.found { body.source } else { None })
    }
}

#[async_trait]
impl Deleter for ElasticsearchDocumentStore {
    async fn delete_document(&self, index: &str, id: &str) -> Result<bool, DomainError> {
        let url = self.document_url(index, "_doc", id)?;
        let response = self.send(self.request(Method::DELETE, url)).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(DomainError::external(error_message(response).await)),
        }
    }
}

#[async_trait]
impl Updater for ElasticsearchDocumentStore {
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        partial: &Value,
    ) -> Result<Value, DomainError> {
        let url = self.document_url(index, "_update", id)?;
        let body = json!({ "doc": partial, "_source": true });
        let response = self.send(self.request(Method::POST, url).json(&body)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::not_found(error_message(response).await));
        }
        if !response.status().is_success() {
            return Err(DomainError::external(error_message(response).await));
        }

        let body: UpdateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        match body.get.and_then(|g| g.source) {
            Some(source) => Ok(source),
            None => self
                .get_document(index, id)
                .await?
                .ok_or_else(|| DomainError::not_found(format!("{index}/{id}"))),
        }
    }
}

#[async_trait]
impl DocumentStore for ElasticsearchDocumentStore {
    async fn ping(&self) -> Result<(), DomainError> {
        let response = self
            .send(self.request(Method::GET, self.base_url.clone()))
            .await?;

        if !response.status().is_success() {
            return Err(DomainError::external(error_message(response).await));
        }
        Ok(())
    }
}
