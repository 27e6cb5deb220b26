use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::database::models::ThreadDetail;
use crate::handlers::guard;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /threads/:id - thread with its full message history, oldest first
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<ThreadDetail> {
    let thread = guard::require_participant(&state.threads, id, auth.user_id).await?;
    let messages = state.messages.list_all_for_thread(id).await?;

    Ok(ApiResponse::success(ThreadDetail::new(&thread, messages)))
}
