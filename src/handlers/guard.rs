use uuid::Uuid;

use crate::database::models::Thread;
use crate::database::ThreadRepository;
use crate::error::ApiError;

/// The single authorization gate for thread-scoped operations: the thread
/// must exist and the caller must be one of its two participants. Message
/// routes pass the owning thread of the message they act on.
pub async fn require_participant(
    threads: &ThreadRepository,
    thread_id: Uuid,
    user_id: Uuid,
) -> Result<Thread, ApiError> {
    let thread = threads
        .find_by_id(thread_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Thread not found"))?;

    if !thread.has_participant(user_id) {
        return Err(ApiError::forbidden("You are not a participant of this thread"));
    }

    Ok(thread)
}
