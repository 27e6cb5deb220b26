use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Message, Thread};

const THREAD_COLUMNS: &str = "id, user_low, user_high, created_at, updated_at";

/// Store interface for threads. Holds a pool clone; handlers receive it via
/// application state.
#[derive(Clone)]
pub struct ThreadRepository {
    pool: PgPool,
}

impl ThreadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the thread for a participant pair, creating it if absent.
    /// Returns the thread and whether it was created by this call.
    ///
    /// The insert-or-select runs in one transaction against the unique
    /// (user_low, user_high) constraint, so two concurrent calls for the
    /// same pair converge on a single row.
    pub async fn find_or_create(&self, a: Uuid, b: Uuid) -> Result<(Thread, bool), DatabaseError> {
        let (user_low, user_high) = Thread::normalize_pair(a, b);
        let mut tx = self.pool.begin().await?;

        let insert_sql = format!(
            "INSERT INTO threads (user_low, user_high) VALUES ($1, $2) \
             ON CONFLICT (user_low, user_high) DO NOTHING \
             RETURNING {THREAD_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Thread>(&insert_sql)
            .bind(user_low)
            .bind(user_high)
            .fetch_optional(&mut *tx)
            .await?;

        let result = match inserted {
            Some(thread) => (thread, true),
            None => {
                let select_sql = format!(
                    "SELECT {THREAD_COLUMNS} FROM threads WHERE user_low = $1 AND user_high = $2"
                );
                let thread = sqlx::query_as::<_, Thread>(&select_sql)
                    .bind(user_low)
                    .bind(user_high)
                    .fetch_one(&mut *tx)
                    .await?;
                (thread, false)
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Thread>, DatabaseError> {
        let sql = format!("SELECT {THREAD_COLUMNS} FROM threads WHERE id = $1");
        let thread = sqlx::query_as::<_, Thread>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(thread)
    }

    /// Page of a user's threads, each with its most recent message
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<(Thread, Option<Message>)>, DatabaseError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.user_low, t.user_high, t.created_at, t.updated_at,
                   m.id AS message_id, m.sender_id, m.body, m.is_read,
                   m.created_at AS message_created_at
            FROM threads t
            LEFT JOIN LATERAL (
                SELECT id, sender_id, body, is_read, created_at
                FROM messages
                WHERE thread_id = t.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) m ON true
            WHERE t.user_low = $1 OR t.user_high = $1
            ORDER BY t.created_at, t.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<(Thread, Option<Message>), DatabaseError> {
                let thread = Thread {
                    id: row.try_get("id")?,
                    user_low: row.try_get("user_low")?,
                    user_high: row.try_get("user_high")?,
                    created_at: row.try_get("created_at")?,
                    updated_at: row.try_get("updated_at")?,
                };

                let last_message = match row.try_get::<Option<Uuid>, _>("message_id")? {
                    Some(message_id) => Some(Message {
                        id: message_id,
                        thread_id: thread.id,
                        sender_id: row.try_get("sender_id")?,
                        body: row.try_get("body")?,
                        is_read: row.try_get("is_read")?,
                        created_at: row.try_get("message_created_at")?,
                    }),
                    None => None,
                };

                Ok((thread, last_message))
            })
            .collect()
    }

    pub async fn count_for_user(&self, user_id: Uuid) -> Result<i64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM threads WHERE user_low = $1 OR user_high = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Delete a thread; messages cascade at the schema level
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM threads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound("Thread not found".to_string()));
        }
        Ok(())
    }
}
