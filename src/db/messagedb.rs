// db/messagedb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::models::messagemodel::*;

const MESSAGE_WITH_USERS_SELECT: &str = r#"
    SELECT m.id, m.sender_id, m.receiver_id, m.content, m.exchange_id, m.is_read, m.created_at,
           s.username AS sender_username, r.username AS receiver_username
    FROM messages m
    JOIN users s ON s.id = m.sender_id
    JOIN users r ON r.id = m.receiver_id
"#;

#[async_trait]
pub trait MessageExt {
    async fn send_message(
        &self,
        sender_id: i32,
        receiver_id: i32,
        content: String,
        exchange_id: Option<i32>,
    ) -> Result<Message, Error>;

    /// Every message between the two users, oldest first. Messages addressed to
    /// `user_id` that were unread are marked read in the same transaction; only
    /// rows returned by this call are touched.
    async fn get_conversation(
        &self,
        user_id: i32,
        other_user_id: i32,
    ) -> Result<Vec<MessageWithUsers>, Error>;

    async fn get_unread_count(&self, user_id: i32) -> Result<i64, Error>;

    /// Every message the user sent or received, oldest first.
    async fn get_user_messages(&self, user_id: i32) -> Result<Vec<MessageWithUsers>, Error>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn send_message(
        &self,
        sender_id: i32,
        receiver_id: i32,
        content: String,
        exchange_id: Option<i32>,
    ) -> Result<Message, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender_id, receiver_id, content, exchange_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender_id, receiver_id, content, exchange_id, is_read, created_at
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(content)
        .bind(exchange_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_conversation(
        &self,
        user_id: i32,
        other_user_id: i32,
    ) -> Result<Vec<MessageWithUsers>, Error> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            {}
            WHERE (m.sender_id = $1 AND m.receiver_id = $2)
               OR (m.sender_id = $2 AND m.receiver_id = $1)
            ORDER BY m.created_at ASC, m.id ASC
            "#,
            MESSAGE_WITH_USERS_SELECT
        );

        let messages = sqlx::query_as::<_, MessageWithUsers>(&query)
            .bind(user_id)
            .bind(other_user_id)
            .fetch_all(&mut *tx)
            .await?;

        let seen: Vec<i32> = messages
            .iter()
            .filter(|m| m.message.receiver_id == user_id && !m.message.is_read)
            .map(|m| m.message.id)
            .collect();

        if !seen.is_empty() {
            sqlx::query(
                r#"
                UPDATE messages
                SET is_read = TRUE
                WHERE id = ANY($1) AND is_read = FALSE
                "#,
            )
            .bind(seen)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(messages)
    }

    async fn get_unread_count(&self, user_id: i32) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE receiver_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_messages(&self, user_id: i32) -> Result<Vec<MessageWithUsers>, Error> {
        let query = format!(
            r#"
            {}
            WHERE m.sender_id = $1 OR m.receiver_id = $1
            ORDER BY m.created_at ASC, m.id ASC
            "#,
            MESSAGE_WITH_USERS_SELECT
        );

        sqlx::query_as::<_, MessageWithUsers>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }
}
