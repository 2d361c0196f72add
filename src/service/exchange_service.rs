// service/exchange_service.rs
use std::sync::Arc;

use crate::{
    db::Store,
    dtos::exchangedtos::{CreateExchangeDto, ExchangeFeedbackDto},
    models::exchangemodel::*,
    service::error::ServiceError,
};

pub const MAX_FEEDBACK_LENGTH: usize = 1000;

#[derive(Debug, Clone)]
pub struct ExchangeService {
    db_client: Arc<dyn Store>,
}

impl ExchangeService {
    pub fn new(db_client: Arc<dyn Store>) -> Self {
        Self { db_client }
    }

    pub async fn create_exchange(
        &self,
        requester_id: i32,
        body: CreateExchangeDto,
    ) -> Result<SkillExchange, ServiceError> {
        if body.provider_id == requester_id {
            return Err(ServiceError::Validation(
                "You cannot request an exchange with yourself".to_string(),
            ));
        }

        if self.db_client.get_user(Some(body.provider_id), None, None).await?.is_none() {
            return Err(ServiceError::Validation(format!(
                "Provider {} does not exist",
                body.provider_id
            )));
        }

        for skill_id in [body.requested_skill_id, body.offered_skill_id] {
            if self.db_client.get_skill(skill_id).await?.is_none() {
                return Err(ServiceError::Validation(format!(
                    "Skill {} does not exist",
                    skill_id
                )));
            }
        }

        let message = body
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let exchange = self
            .db_client
            .create_exchange(
                requester_id,
                body.provider_id,
                body.requested_skill_id,
                body.offered_skill_id,
                message,
            )
            .await?
            .ok_or(ServiceError::DuplicateExchange)?;

        tracing::info!(
            exchange_id = exchange.id,
            requester_id,
            provider_id = exchange.provider_id,
            "Skill exchange requested"
        );

        Ok(exchange)
    }

    pub async fn get_user_exchanges(
        &self,
        caller_id: i32,
        user_id: i32,
    ) -> Result<Vec<ExchangeDetails>, ServiceError> {
        if caller_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only list your own exchanges".to_string(),
            ));
        }

        Ok(self.db_client.get_user_exchanges(user_id).await?)
    }

    pub async fn get_exchange(
        &self,
        caller_id: i32,
        exchange_id: i32,
    ) -> Result<ExchangeDetails, ServiceError> {
        let details = self
            .db_client
            .get_exchange_details(exchange_id)
            .await?
            .ok_or(ServiceError::ExchangeNotFound(exchange_id))?;

        if details.exchange.role_of(caller_id).is_none() {
            return Err(ServiceError::Forbidden(
                "Not authorized to view this exchange".to_string(),
            ));
        }

        Ok(details)
    }

    pub async fn update_status(
        &self,
        caller_id: i32,
        exchange_id: i32,
        next: ExchangeStatus,
    ) -> Result<ExchangeStatusUpdate, ServiceError> {
        let exchange = self.load_exchange(exchange_id).await?;

        if exchange.role_of(caller_id).is_none() {
            return Err(ServiceError::Forbidden(
                "Not authorized to update this exchange".to_string(),
            ));
        }

        if !exchange.status.can_transition_to(next) {
            return Err(ServiceError::InvalidTransition {
                from: exchange.status,
                to: next,
            });
        }

        match self
            .db_client
            .update_exchange_status(exchange_id, exchange.status, next)
            .await?
        {
            Some(update) => {
                tracing::info!(
                    exchange_id,
                    from = %exchange.status,
                    to = %next,
                    terminal = next.is_terminal(),
                    caller_id,
                    "Exchange status changed"
                );
                Ok(update)
            }
            None => {
                // Another request changed the status between our read and write.
                let latest = self.load_exchange(exchange_id).await?;
                tracing::warn!(
                    exchange_id,
                    expected = %exchange.status,
                    found = %latest.status,
                    "Concurrent exchange status change"
                );
                Err(ServiceError::InvalidTransition {
                    from: latest.status,
                    to: next,
                })
            }
        }
    }

    pub async fn submit_feedback(
        &self,
        caller_id: i32,
        exchange_id: i32,
        body: ExchangeFeedbackDto,
    ) -> Result<SkillExchange, ServiceError> {
        if !(1..=5).contains(&body.rating) {
            return Err(ServiceError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        if body.feedback.chars().count() > MAX_FEEDBACK_LENGTH {
            return Err(ServiceError::Validation(format!(
                "Feedback cannot exceed {} characters",
                MAX_FEEDBACK_LENGTH
            )));
        }

        let exchange = self.load_exchange(exchange_id).await?;

        let role = if body.is_requester {
            ExchangeRole::Requester
        } else {
            ExchangeRole::Provider
        };

        if exchange.participant(role) != caller_id {
            return Err(ServiceError::Forbidden(
                "Not authorized to leave feedback in this role".to_string(),
            ));
        }

        if exchange.status != ExchangeStatus::Completed {
            return Err(ServiceError::FeedbackNotAllowed(exchange.status));
        }

        let updated = self
            .db_client
            .record_feedback(exchange_id, role, body.rating, body.feedback)
            .await?;

        match updated {
            Some(exchange) => {
                tracing::info!(exchange_id, caller_id, rating = body.rating, "Exchange feedback recorded");
                Ok(exchange)
            }
            None => {
                let latest = self.load_exchange(exchange_id).await?;
                Err(ServiceError::FeedbackNotAllowed(latest.status))
            }
        }
    }

    async fn load_exchange(&self, exchange_id: i32) -> Result<SkillExchange, ServiceError> {
        self.db_client
            .get_exchange(exchange_id)
            .await?
            .ok_or(ServiceError::ExchangeNotFound(exchange_id))
    }
}
