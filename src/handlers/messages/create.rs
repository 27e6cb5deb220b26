use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::message::MAX_BODY_LENGTH;
use crate::database::models::Message;
use crate::error::ApiError;
use crate::handlers::guard;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageCreateRequest {
    #[serde(default)]
    pub body: String,
}

/// POST /messages/:thread_id - create a message in a thread.
/// The sender always comes from the token, never from the payload.
pub async fn post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(thread_id): Path<Uuid>,
    Json(payload): Json<MessageCreateRequest>,
) -> ApiResult<Message> {
    guard::require_participant(&state.threads, thread_id, auth.user_id).await?;

    let body = validate_body(&payload.body)?;
    let message = state.messages.create(thread_id, auth.user_id, body).await?;

    Ok(ApiResponse::created(message))
}

fn validate_body(body: &str) -> Result<&str, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::field_error("body", "message body must not be empty"));
    }
    if body.chars().count() > MAX_BODY_LENGTH {
        return Err(ApiError::field_error(
            "body",
            format!("message body must be at most {} characters", MAX_BODY_LENGTH),
        ));
    }
    Ok(body)
}
