use axum::extract::{OriginalUri, Path, Query, State};
use axum::Extension;
use uuid::Uuid;

use crate::database::models::Message;
use crate::handlers::guard;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::pagination::{Page, PageQuery};
use crate::state::AppState;

/// GET /messages/threads/:id - page of a thread's messages, oldest first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    Path(thread_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Page<Message>> {
    guard::require_participant(&state.threads, thread_id, auth.user_id).await?;

    let (limit, offset) = page.resolve();

    let count = state.messages.count_for_thread(thread_id).await?;
    let results = state.messages.list_for_thread(thread_id, limit, offset).await?;

    Ok(ApiResponse::success(Page::new(
        uri.path(),
        limit,
        offset,
        count,
        results,
    )))
}
