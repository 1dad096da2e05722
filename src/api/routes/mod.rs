pub mod files;
pub mod health;

use axum::{middleware, routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::api::{middleware::request_logger, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/v1", api_v1_routes())
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/indices/{index}/files", post(files::create_file))
        .route(
            "/indices/{index}/files/{id}",
            get(files::get_file)
                .put(files::put_file)
                .patch(files::patch_file)
                .delete(files::delete_file),
        )
        .route("/indices/{index}/files/{id}/source", get(files::get_file_source))
        .route("/files", post(files::create_default_file))
        .route(
            "/files/{id}",
            get(files::get_default_file)
                .put(files::put_default_file)
                .patch(files::patch_default_file)
                .delete(files::delete_default_file),
        )
        .route("/files/{id}/source", get(files::get_default_file_source))
}
