use sqlx::PgPool;

use crate::database::{MessageRepository, ThreadRepository};

/// Shared application state injected into handlers
#[derive(Clone)]
pub struct AppState {
    pub threads: ThreadRepository,
    pub messages: MessageRepository,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            threads: ThreadRepository::new(pool.clone()),
            messages: MessageRepository::new(pool),
        }
    }
}
