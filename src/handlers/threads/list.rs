use axum::extract::{OriginalUri, Query, State};
use axum::Extension;

use crate::database::models::ThreadSummary;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::pagination::{Page, PageQuery};
use crate::state::AppState;

/// GET /threads - page of the caller's threads, most recent message attached
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    Query(page): Query<PageQuery>,
) -> ApiResult<Page<ThreadSummary>> {
    let (limit, offset) = page.resolve();

    let count = state.threads.count_for_user(auth.user_id).await?;
    let rows = state.threads.list_for_user(auth.user_id, limit, offset).await?;
    let results = rows
        .into_iter()
        .map(|(thread, last_message)| ThreadSummary::new(&thread, last_message))
        .collect();

    Ok(ApiResponse::success(Page::new(
        uri.path(),
        limit,
        offset,
        count,
        results,
    )))
}
