use crate::{
    AppState,
    types::{AppError, ChatReply, ChatRequest, Exchange, HistoryQuery, Result},
};
use axum::{
    Json,
    extract::{Query, State},
};

/// Upper bound on history page size.
const MAX_HISTORY_LIMIT: usize = 100;
const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Chat with the assistant
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated reply", body = ChatReply),
        (status = 400, description = "Invalid input"),
        (status = 500, description = "Service error")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>> {
    if payload.user_id.is_empty() {
        return Err(AppError::InvalidInput("user_id must not be empty".to_string()));
    }
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput("message must not be empty".to_string()));
    }

    let reply = state
        .chat
        .process_message(&payload.user_id, &payload.message)
        .await?;

    Ok(Json(reply))
}

/// Get a user's chat history, oldest first
#[utoipa::path(
    get,
    path = "/api/chat/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Recorded exchanges", body = [Exchange]),
        (status = 500, description = "Service error")
    ),
    tag = "chat"
)]
pub async fn chat_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Exchange>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);

    let exchanges = state.chat.history(&query.user_id, limit).await?;

    Ok(Json(exchanges))
}
