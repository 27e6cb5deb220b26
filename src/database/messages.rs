use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Message;

const MESSAGE_COLUMNS: &str = "id, thread_id, sender_id, body, is_read, created_at";

/// Store interface for messages
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new (unread) message and touch the parent thread
    pub async fn create(
        &self,
        thread_id: Uuid,
        sender_id: Uuid,
        body: &str,
    ) -> Result<Message, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let insert_sql = format!(
            "INSERT INTO messages (thread_id, sender_id, body) VALUES ($1, $2, $3) \
             RETURNING {MESSAGE_COLUMNS}"
        );
        let message = sqlx::query_as::<_, Message>(&insert_sql)
            .bind(thread_id)
            .bind(sender_id)
            .bind(body)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE threads SET updated_at = now() WHERE id = $1")
            .bind(thread_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(message)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DatabaseError> {
        let sql = format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1");
        let message = sqlx::query_as::<_, Message>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(message)
    }

    /// Page of a thread's messages, oldest first
    pub async fn list_for_thread(
        &self,
        thread_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, DatabaseError> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE thread_id = $1 \
             ORDER BY created_at, id LIMIT $2 OFFSET $3"
        );
        let messages = sqlx::query_as::<_, Message>(&sql)
            .bind(thread_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(messages)
    }

    /// Full message history of a thread, oldest first
    pub async fn list_all_for_thread(&self, thread_id: Uuid) -> Result<Vec<Message>, DatabaseError> {
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE thread_id = $1 ORDER BY created_at, id"
        );
        let messages = sqlx::query_as::<_, Message>(&sql)
            .bind(thread_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(messages)
    }

    pub async fn count_for_thread(&self, thread_id: Uuid) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE thread_id = $1")
            .bind(thread_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Unread messages addressed to a user across all of their threads
    pub async fn unread_count_for(&self, user_id: Uuid) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM messages m
            JOIN threads t ON t.id = m.thread_id
            WHERE (t.user_low = $1 OR t.user_high = $1)
              AND m.is_read = false
              AND m.sender_id <> $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Flip the read flag false -> true. Idempotent: an already-read message
    /// is returned as-is and the parent thread is not touched again.
    pub async fn mark_read(&self, id: Uuid) -> Result<Message, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let update_sql = format!(
            "UPDATE messages SET is_read = true WHERE id = $1 AND is_read = false \
             RETURNING {MESSAGE_COLUMNS}"
        );
        let flipped = sqlx::query_as::<_, Message>(&update_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let message = match flipped {
            Some(message) => {
                sqlx::query("UPDATE threads SET updated_at = now() WHERE id = $1")
                    .bind(message.thread_id)
                    .execute(&mut *tx)
                    .await?;
                message
            }
            None => {
                let select_sql = format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1");
                sqlx::query_as::<_, Message>(&select_sql)
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| DatabaseError::NotFound("Message not found".to_string()))?
            }
        };

        tx.commit().await?;
        Ok(message)
    }
}
