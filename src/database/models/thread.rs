use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::message::Message;

/// A two-party conversation. The participant pair is stored normalized
/// (user_low < user_high) so a pair maps to at most one row.
#[derive(Debug, Clone, FromRow)]
pub struct Thread {
    pub id: Uuid,
    pub user_low: Uuid,
    pub user_high: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    /// Sort a pair into storage order
    pub fn normalize_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub fn participants(&self) -> [Uuid; 2] {
        [self.user_low, self.user_high]
    }

    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.user_low == user_id || self.user_high == user_id
    }
}

/// API representation: the pair surfaces as a participants array
#[derive(Debug, Serialize)]
pub struct ThreadBody {
    pub id: Uuid,
    pub participants: [Uuid; 2],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Thread> for ThreadBody {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id,
            participants: thread.participants(),
            created_at: thread.created_at,
            updated_at: thread.updated_at,
        }
    }
}

/// Listing entry: thread plus its most recent message, if any
#[derive(Debug, Serialize)]
pub struct ThreadSummary {
    #[serde(flatten)]
    pub thread: ThreadBody,
    pub last_message: Option<Message>,
}

impl ThreadSummary {
    pub fn new(thread: &Thread, last_message: Option<Message>) -> Self {
        Self {
            thread: ThreadBody::from(thread),
            last_message,
        }
    }
}

/// Retrieval shape: thread plus its full message history, oldest first
#[derive(Debug, Serialize)]
pub struct ThreadDetail {
    #[serde(flatten)]
    pub thread: ThreadBody,
    pub messages: Vec<Message>,
}

impl ThreadDetail {
    pub fn new(thread: &Thread, messages: Vec<Message>) -> Self {
        Self {
            thread: ThreadBody::from(thread),
            messages,
        }
    }
}
