use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kaiwa_chat::SendError;
use kaiwa_persist::Message;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct SendMessageRequest {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub user_message: Message,
    pub assistant_message: Message,
}

/// GET /threads/:thread_id/messages — in creation order.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<MessagesResponse>> {
    if state.store.get_thread(&thread_id).await?.is_none() {
        return Err(ApiError::ThreadNotFound);
    }

    let messages = state.store.list_messages(&thread_id).await?;
    Ok(Json(MessagesResponse { messages }))
}

/// POST /threads/:thread_id/messages — persist the user turn, generate and
/// persist the assistant reply.
///
/// When generation fails the response is still a 500, but it carries the
/// already-persisted user message so clients can show it was saved.
pub async fn send_message(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
    body: Option<Json<SendMessageRequest>>,
) -> ApiResult<Response> {
    let content = body.and_then(|Json(req)| req.content).unwrap_or_default();

    match state.chat.send(&thread_id, &content).await {
        Ok(exchange) => Ok((
            StatusCode::CREATED,
            Json(SendMessageResponse {
                user_message: exchange.user_message,
                assistant_message: exchange.assistant_message,
            }),
        )
            .into_response()),
        Err(SendError::ThreadNotFound(_)) => Err(ApiError::ThreadNotFound),
        Err(SendError::EmptyContent) => {
            Err(ApiError::BadRequest("Content cannot be empty".to_string()))
        }
        Err(SendError::Generation { user_message, cause }) => {
            let body = json!({
                "error": "Failed to generate AI response",
                "details": cause.to_string(),
                "user_message": *user_message,
            });
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
        Err(SendError::Store(e)) => Err(ApiError::Persist(e)),
    }
}

/// DELETE /messages/:message_id
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.store.delete_message(&message_id).await? {
        return Err(ApiError::MessageNotFound);
    }

    Ok(Json(json!({ "message": "Message deleted successfully" })))
}
