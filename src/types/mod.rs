use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Caller identity, supplied by the fronting gateway.
    pub user_id: String,
    pub message: String,
}

/// Reply returned to the request-handling layer: `{type, text, media}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    pub text: String,
    pub media: Option<Vec<String>>,
}

impl ChatReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            text: text.into(),
            media: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    Text,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct HistoryQuery {
    pub user_id: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

// ============= Exchange Types =============

/// One recorded user message + generated reply pair.
///
/// Owned by the relational log; immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Exchange {
    pub id: String,
    pub user_id: String,
    /// The other party's message, as received.
    pub incoming_text: String,
    /// The generated reply.
    pub outgoing_text: String,
    pub created_at: DateTime<Utc>,
}

// ============= Semantic Index Types =============

/// A similarity match returned by the semantic index.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticMatch {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Semantic index error: {0}")]
    Index(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Database(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Index(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Generation(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Configuration(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_reply_serializes_with_type_tag() {
        let reply = ChatReply::text("hello");
        let json = serde_json::to_value(&reply).unwrap();

        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hello");
        assert!(json["media"].is_null());
    }

    #[test]
    fn test_exchange_round_trips_through_serde() {
        let exchange = Exchange {
            id: "ex-1".to_string(),
            user_id: "user-1".to_string(),
            incoming_text: "hi".to_string(),
            outgoing_text: "hello there".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&exchange).unwrap();
        let back: Exchange = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "ex-1");
        assert_eq!(back.incoming_text, "hi");
    }
}
