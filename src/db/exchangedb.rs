// db/exchangedb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::models::exchangemodel::*;

const EXCHANGE_COLUMNS: &str = r#"
    id, requester_id, provider_id, requested_skill_id, offered_skill_id, status, message,
    requester_rating, provider_rating, requester_feedback, provider_feedback,
    scheduled_date, completed_date, created_at, updated_at
"#;

const EXCHANGE_DETAILS_SELECT: &str = r#"
    SELECT se.id, se.requester_id, se.provider_id, se.requested_skill_id, se.offered_skill_id,
           se.status, se.message, se.requester_rating, se.provider_rating,
           se.requester_feedback, se.provider_feedback, se.scheduled_date, se.completed_date,
           se.created_at, se.updated_at,
           r.username AS requester_username, r.first_name AS requester_first_name,
           r.last_name AS requester_last_name,
           p.username AS provider_username, p.first_name AS provider_first_name,
           p.last_name AS provider_last_name,
           rs.name AS requested_skill_name, os.name AS offered_skill_name
    FROM skill_exchanges se
    JOIN users r ON r.id = se.requester_id
    JOIN users p ON p.id = se.provider_id
    JOIN skills rs ON rs.id = se.requested_skill_id
    JOIN skills os ON os.id = se.offered_skill_id
"#;

#[async_trait]
pub trait ExchangeExt {
    /// Insert a new `PENDING` exchange. Returns `None` when an identical request
    /// is already pending between the same users.
    async fn create_exchange(
        &self,
        requester_id: i32,
        provider_id: i32,
        requested_skill_id: i32,
        offered_skill_id: i32,
        message: Option<String>,
    ) -> Result<Option<SkillExchange>, Error>;

    async fn get_exchange(&self, exchange_id: i32) -> Result<Option<SkillExchange>, Error>;

    async fn get_exchange_details(
        &self,
        exchange_id: i32,
    ) -> Result<Option<ExchangeDetails>, Error>;

    async fn get_user_exchanges(&self, user_id: i32) -> Result<Vec<ExchangeDetails>, Error>;

    /// Compare-and-set on the status column. Returns `None` when the row no
    /// longer holds `expected`.
    async fn update_exchange_status(
        &self,
        exchange_id: i32,
        expected: ExchangeStatus,
        next: ExchangeStatus,
    ) -> Result<Option<ExchangeStatusUpdate>, Error>;

    /// Writes one side's rating and feedback. Only applies while the exchange
    /// is `COMPLETED`; returns `None` otherwise.
    async fn record_feedback(
        &self,
        exchange_id: i32,
        role: ExchangeRole,
        rating: i32,
        feedback: String,
    ) -> Result<Option<SkillExchange>, Error>;
}

#[async_trait]
impl ExchangeExt for DBClient {
    async fn create_exchange(
        &self,
        requester_id: i32,
        provider_id: i32,
        requested_skill_id: i32,
        offered_skill_id: i32,
        message: Option<String>,
    ) -> Result<Option<SkillExchange>, Error> {
        let query = format!(
            r#"
            INSERT INTO skill_exchanges
                (requester_id, provider_id, requested_skill_id, offered_skill_id, message)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (requester_id, provider_id, requested_skill_id, offered_skill_id)
                WHERE status = 'PENDING'
            DO NOTHING
            RETURNING {}
            "#,
            EXCHANGE_COLUMNS
        );

        sqlx::query_as::<_, SkillExchange>(&query)
            .bind(requester_id)
            .bind(provider_id)
            .bind(requested_skill_id)
            .bind(offered_skill_id)
            .bind(message)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_exchange(&self, exchange_id: i32) -> Result<Option<SkillExchange>, Error> {
        let query = format!(
            "SELECT {} FROM skill_exchanges WHERE id = $1",
            EXCHANGE_COLUMNS
        );

        sqlx::query_as::<_, SkillExchange>(&query)
            .bind(exchange_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_exchange_details(
        &self,
        exchange_id: i32,
    ) -> Result<Option<ExchangeDetails>, Error> {
        let query = format!("{} WHERE se.id = $1", EXCHANGE_DETAILS_SELECT);

        sqlx::query_as::<_, ExchangeDetails>(&query)
            .bind(exchange_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_exchanges(&self, user_id: i32) -> Result<Vec<ExchangeDetails>, Error> {
        let query = format!(
            r#"
            {}
            WHERE se.requester_id = $1 OR se.provider_id = $1
            ORDER BY se.created_at DESC, se.id DESC
            "#,
            EXCHANGE_DETAILS_SELECT
        );

        sqlx::query_as::<_, ExchangeDetails>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn update_exchange_status(
        &self,
        exchange_id: i32,
        expected: ExchangeStatus,
        next: ExchangeStatus,
    ) -> Result<Option<ExchangeStatusUpdate>, Error> {
        sqlx::query_as::<_, ExchangeStatusUpdate>(
            r#"
            UPDATE skill_exchanges
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING id, status, updated_at
            "#,
        )
        .bind(exchange_id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&self.pool)
        .await
    }

    async fn record_feedback(
        &self,
        exchange_id: i32,
        role: ExchangeRole,
        rating: i32,
        feedback: String,
    ) -> Result<Option<SkillExchange>, Error> {
        let assignments = match role {
            ExchangeRole::Requester => "requester_rating = $2, requester_feedback = $3",
            ExchangeRole::Provider => "provider_rating = $2, provider_feedback = $3",
        };

        let query = format!(
            r#"
            UPDATE skill_exchanges
            SET {}, updated_at = NOW()
            WHERE id = $1 AND status = $4
            RETURNING {}
            "#,
            assignments, EXCHANGE_COLUMNS
        );

        sqlx::query_as::<_, SkillExchange>(&query)
            .bind(exchange_id)
            .bind(rating)
            .bind(feedback)
            .bind(ExchangeStatus::Completed)
            .fetch_optional(&self.pool)
            .await
    }
}
