use axum::extract::State;
use axum::Extension;
use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread_message_count: i64,
}

/// GET /messages/unread - count of unread messages addressed to the caller
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<UnreadCount> {
    let unread_message_count = state.messages.unread_count_for(auth.user_id).await?;

    Ok(ApiResponse::success(UnreadCount { unread_message_count }))
}
