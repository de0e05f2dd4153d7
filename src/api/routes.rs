use crate::AppState;
use crate::api::ApiDoc;
use axum::{
    Json, Router,
    routing::{get, post},
};
use utoipa::OpenApi;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(crate::api::handlers::chat::chat))
        .route(
            "/api/chat/history",
            get(crate::api::handlers::chat::chat_history),
        )
        .route("/api/health", get(crate::api::handlers::health::health))
        .route("/api-docs/openapi.json", get(openapi_document))
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
