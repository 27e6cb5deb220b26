use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::ThreadBody;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ThreadCreateRequest {
    #[serde(default)]
    pub participants: Vec<Uuid>,
}

/// POST /threads - find or create the thread for a participant pair.
/// 201 when a new thread was created, 200 when the pair already had one.
pub async fn post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<ThreadCreateRequest>,
) -> ApiResult<ThreadBody> {
    let (a, b) = validate_participants(&payload.participants, auth.user_id)?;

    let (thread, created) = state.threads.find_or_create(a, b).await?;
    let body = ThreadBody::from(&thread);

    Ok(if created {
        ApiResponse::created(body)
    } else {
        ApiResponse::success(body)
    })
}

fn validate_participants(participants: &[Uuid], caller: Uuid) -> Result<(Uuid, Uuid), ApiError> {
    if participants.len() != 2 {
        return Err(ApiError::field_error(
            "participants",
            "exactly 2 participants are required",
        ));
    }
    if participants[0] == participants[1] {
        return Err(ApiError::field_error(
            "participants",
            "participants must be two distinct users",
        ));
    }
    if !participants.contains(&caller) {
        return Err(ApiError::validation_error(
            "You can't create a thread without yourself as a participant",
            None,
        ));
    }
    Ok((participants[0], participants[1]))
}
