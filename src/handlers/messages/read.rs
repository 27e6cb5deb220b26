use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::database::models::Message;
use crate::error::ApiError;
use crate::handlers::guard;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// PUT /messages/:id - acknowledge a message as read.
/// Only a participant who is not the sender flips the flag; the sender
/// acknowledging their own message gets it back unchanged.
pub async fn put(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Message> {
    let message = state
        .messages
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    guard::require_participant(&state.threads, message.thread_id, auth.user_id).await?;

    if message.sender_id == auth.user_id {
        return Ok(ApiResponse::success(message));
    }

    let message = state.messages.mark_read(message.id).await?;
    Ok(ApiResponse::success(message))
}
