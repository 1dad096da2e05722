use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::domain::{DomainError, FileRecord};

/// Body for create, replace and partial update. Unset fields are left out of
/// a partial update.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRequest {
    #[serde(skip_serializing)]
    pub id: Option<String>,
    pub source: Option<String>,
    pub server: Option<String>,
    pub text: Option<String>,
    pub modification_date: Option<NaiveDate>,
}

impl FileRequest {
    fn into_record(self, id: Option<String>) -> FileRecord {
        let mut record = FileRecord::new();
        if let Some(id) = id.or(self.id) {
            record.id = id;
        }
        record.source = self.source;
        record.server = self.server;
        record.text = self.text;
        record.modification_date = self.modification_date;
        record
    }
}

type RawJson = ([(HeaderName, &'static str); 1], String);

fn error_status(e: &DomainError) -> StatusCode {
    match e {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        DomainError::Serialization(_) | DomainError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn fail(action: &str, index: &str, id: &str, e: DomainError) -> StatusCode {
    let status = error_status(&e);
    if status.is_server_error() {
        tracing::error!(error = %e, index, id, "Failed to {action} file");
    } else {
        tracing::warn!(error = %e, index, id, "Rejected {action} of file");
    }
    status
}

async fn create(
    state: &AppState,
    index: &str,
    request: FileRequest,
) -> Result<(StatusCode, Json<FileRecord>), StatusCode> {
    let record = request.into_record(None);

    state
        .document_service
        .insert(&record, index, &record.id)
        .await
        .map_err(|e| fail("create", index, &record.id, e))?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn put(
    state: &AppState,
    index: &str,
    id: String,
    request: FileRequest,
) -> Result<Json<FileRecord>, StatusCode> {
    let record = request.into_record(Some(id));

    state
        .document_service
        .insert(&record, index, &record.id)
        .await
        .map_err(|e| fail("store", index, &record.id, e))?;

    Ok(Json(record))
}

async fn get(state: &AppState, index: &str, id: &str) -> Result<Json<FileRecord>, StatusCode> {
    match state.document_service.get_by_id(index, id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(fail("get", index, id, e)),
    }
}

async fn get_source(state: &AppState, index: &str, id: &str) -> Result<RawJson, StatusCode> {
    match state.document_service.get_source_by_id(index, id).await {
        Ok(Some(source)) => Ok(([(header::CONTENT_TYPE, "application/json")], source)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(fail("get", index, id, e)),
    }
}

async fn patch(
    state: &AppState,
    index: &str,
    id: &str,
    request: FileRequest,
) -> Result<Json<FileRecord>, StatusCode> {
    let merged = state
        .document_service
        .update_by_id(&request, index, id)
        .await
        .map_err(|e| fail("update", index, id, e))?;

    serde_json::from_value(merged)
        .map(Json)
        .map_err(|e| fail("decode", index, id, e.into()))
}

async fn delete(state: &AppState, index: &str, id: &str) -> StatusCode {
    match state.document_service.delete_by_id(index, id).await {
        Ok(true) => StatusCode::NO_CONTENT,
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => fail("delete", index, id, e),
    }
}

// Routes under an explicit index.

pub async fn create_file(
    State(state): State<AppState>,
    Path(index): Path<String>,
    Json(request): Json<FileRequest>,
) -> Result<(StatusCode, Json<FileRecord>), StatusCode> {
    create(&state, &index, request).await
}

pub async fn put_file(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
    Json(request): Json<FileRequest>,
) -> Result<Json<FileRecord>, StatusCode> {
    put(&state, &index, id, request).await
}

pub async fn get_file(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
) -> Result<Json<FileRecord>, StatusCode> {
    get(&state, &index, &id).await
}

pub async fn get_file_source(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
) -> Result<RawJson, StatusCode> {
    get_source(&state, &index, &id).await
}

pub async fn patch_file(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
    Json(request): Json<FileRequest>,
) -> Result<Json<FileRecord>, StatusCode> {
    patch(&state, &index, &id, request).await
}

pub async fn delete_file(
    State(state): State<AppState>,
    Path((index, id)): Path<(String, String)>,
) -> StatusCode {
    delete(&state, &index, &id).await
}

// Routes against the configured default index.

pub async fn create_default_file(
    State(state): State<AppState>,
    Json(request): Json<FileRequest>,
) -> Result<(StatusCode, Json<FileRecord>), StatusCode> {
    create(&state, &state.config.default_index, request).await
}

pub async fn put_default_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<FileRequest>,
) -> Result<Json<FileRecord>, StatusCode> {
    put(&state, &state.config.default_index, id, request).await
}

pub async fn get_default_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FileRecord>, StatusCode> {
    get(&state, &state.config.default_index, &id).await
}

pub async fn get_default_file_source(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<RawJson, StatusCode> {
    get_source(&state, &state.config.default_index, &id).await
}

pub async fn patch_default_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<FileRequest>,
) -> Result<Json<FileRecord>, StatusCode> {
    patch(&state, &state.config.default_index, &id, request).await
}

pub async fn delete_default_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    delete(&state, &state.config.default_index, &id).await
}
