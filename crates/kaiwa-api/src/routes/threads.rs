use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use kaiwa_persist::Thread;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct CreateThreadRequest {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateThreadRequest {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ThreadsResponse {
    pub threads: Vec<Thread>,
}

#[derive(Debug, Serialize)]
pub struct DeleteThreadResponse {
    pub message: &'static str,
    pub deleted_messages: u64,
}

/// GET /threads — all threads, most recently updated first.
pub async fn list_threads(State(state): State<AppState>) -> ApiResult<Json<ThreadsResponse>> {
    let threads = state.store.list_threads().await?;
    Ok(Json(ThreadsResponse { threads }))
}

/// POST /threads — create a thread; the body and its title are optional.
pub async fn create_thread(
    State(state): State<AppState>,
    body: Option<Json<CreateThreadRequest>>,
) -> ApiResult<(StatusCode, Json<Thread>)> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let thread = state.store.create_thread(req.title).await?;
    Ok((StatusCode::CREATED, Json(thread)))
}

/// GET /threads/:thread_id
pub async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<Thread>> {
    let thread = state
        .store
        .get_thread(&thread_id)
        .await?
        .ok_or(ApiError::ThreadNotFound)?;

    Ok(Json(thread))
}

/// PUT /threads/:thread_id — rename; the title field is required.
///
/// A blank title keeps the stored one and only bumps `updated_at`, the
/// same truthy rule the create path applies.
pub async fn update_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
    body: Option<Json<UpdateThreadRequest>>,
) -> ApiResult<Json<Thread>> {
    let title = body
        .and_then(|Json(req)| req.title)
        .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))?;

    let title = title.trim();
    let thread = if title.is_empty() {
        state.store.touch_thread(&thread_id).await?
    } else {
        state.store.rename_thread(&thread_id, title).await?
    };

    thread.map(Json).ok_or(ApiError::ThreadNotFound)
}

/// DELETE /threads/:thread_id — cascades to the thread's messages.
pub async fn delete_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<DeleteThreadResponse>> {
    // Messages go first so a half-failed delete never leaves orphans
    // behind a live thread.
    let deleted_messages = state.store.delete_messages_by_thread(&thread_id).await?;

    if !state.store.delete_thread(&thread_id).await? {
        return Err(ApiError::ThreadNotFound);
    }

    tracing::info!(%thread_id, deleted_messages, "thread deleted");

    Ok(Json(DeleteThreadResponse {
        message: "Thread deleted successfully",
        deleted_messages,
    }))
}
