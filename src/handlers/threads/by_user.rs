use axum::extract::{OriginalUri, Path, Query, State};
use axum::Extension;
use uuid::Uuid;

use crate::database::models::ThreadSummary;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::pagination::{Page, PageQuery};
use crate::state::AppState;

/// GET /threads/user/:user_id - page of a given user's threads.
/// Restricted to admin tokens; there is no participant relation between the
/// caller and an arbitrary target user to check against.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    OriginalUri(uri): OriginalUri,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Page<ThreadSummary>> {
    if !auth.is_admin() {
        return Err(ApiError::forbidden(
            "Listing another user's threads requires admin access",
        ));
    }

    let (limit, offset) = page.resolve();

    let count = state.threads.count_for_user(user_id).await?;
    let rows = state.threads.list_for_user(user_id, limit, offset).await?;
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
