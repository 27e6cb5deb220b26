use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::handlers::guard;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// DELETE /threads/:id - delete a thread and, by cascade, its messages
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    guard::require_participant(&state.threads, id, auth.user_id).await?;
    state.threads.delete(id).await?;

    Ok(ApiResponse::<()>::no_content())
}
