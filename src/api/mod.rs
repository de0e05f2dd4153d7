//! HTTP API Handlers and Routes
//!
//! The thin upward surface of the pipeline, built on the Axum web
//! framework.
//!
//! # API Endpoints
//!
//! ## Chat (`/api/chat`)
//! - `POST /api/chat` - Send a message and receive the generated reply
//! - `GET /api/chat/history` - A user's recorded exchanges, oldest first
//!
//! ## Health (`/api/health`)
//! - `GET /api/health` - Health check endpoint
//!
//! # Identity
//!
//! Authentication happens in the fronting gateway; requests arrive with
//! an already-resolved `user_id`.
//!
//! # OpenAPI Documentation
//!
//! The OpenAPI document is served at `/api-docs/openapi.json`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::OpenApi;

/// OpenAPI document for the exposed endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::chat::chat,
        handlers::chat::chat_history,
        handlers::health::health,
    ),
    components(schemas(
        crate::types::ChatRequest,
        crate::types::ChatReply,
        crate::types::ReplyKind,
        crate::types::Exchange,
    )),
    tags(
        (name = "chat", description = "Memory-augmented chat"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
