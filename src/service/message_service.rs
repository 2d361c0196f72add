// service/message_service.rs
use std::{collections::HashMap, sync::Arc};

use crate::{
    db::Store,
    dtos::messagedtos::SendMessageDto,
    models::messagemodel::*,
    service::error::ServiceError,
};

pub const MAX_MESSAGE_LENGTH: usize = 2000;

#[derive(Debug, Clone)]
pub struct MessageService {
    db_client: Arc<dyn Store>,
}

impl MessageService {
    pub fn new(db_client: Arc<dyn Store>) -> Self {
        Self { db_client }
    }

    pub async fn send_message(
        &self,
        sender_id: i32,
        body: SendMessageDto,
    ) -> Result<Message, ServiceError> {
        let content = body.content.trim();
        if content.is_empty() {
            return Err(ServiceError::Validation(
                "Message content cannot be empty".to_string(),
            ));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ServiceError::Validation(format!(
                "Message cannot exceed {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        if body.receiver_id == sender_id {
            return Err(ServiceError::Validation(
                "You cannot send a message to yourself".to_string(),
            ));
        }

        if self.db_client.get_user(Some(body.receiver_id), None, None).await?.is_none() {
            return Err(ServiceError::UserNotFound(body.receiver_id));
        }

        if let Some(exchange_id) = body.exchange_id {
            if self.db_client.get_exchange(exchange_id).await?.is_none() {
                return Err(ServiceError::ExchangeNotFound(exchange_id));
            }
        }

        let message = self
            .db_client
            .send_message(sender_id, body.receiver_id, content.to_string(), body.exchange_id)
            .await?;

        tracing::debug!(
            message_id = message.id,
            sender_id,
            receiver_id = message.receiver_id,
            "Message sent"
        );

        Ok(message)
    }

    pub async fn get_conversation(
        &self,
        user_id: i32,
        other_user_id: i32,
    ) -> Result<Vec<MessageWithUsers>, ServiceError> {
        if user_id == other_user_id {
            return Err(ServiceError::Validation(
                "There is no conversation with yourself".to_string(),
            ));
        }

        if self.db_client.get_user(Some(other_user_id), None, None).await?.is_none() {
            return Err(ServiceError::UserNotFound(other_user_id));
        }

        Ok(self.db_client.get_conversation(user_id, other_user_id).await?)
    }

    pub async fn get_unread_count(&self, user_id: i32) -> Result<i64, ServiceError> {
        Ok(self.db_client.get_unread_count(user_id).await?)
    }

    pub async fn get_conversations(
        &self,
        user_id: i32,
    ) -> Result<Vec<ConversationSummary>, ServiceError> {
        let log = self.db_client.get_user_messages(user_id).await?;
        Ok(summarize_conversations(user_id, &log))
    }
}

/// Folds a user's message log into one summary per partner, most recently
/// active partner first.
pub fn summarize_conversations(user_id: i32, log: &[MessageWithUsers]) -> Vec<ConversationSummary> {
    // partner id -> (summary, id of the latest message)
    let mut partners: HashMap<i32, (ConversationSummary, i32)> = HashMap::new();

    for entry in log {
        let message = &entry.message;
        let (partner_id, partner_username) = if message.sender_id == user_id {
            (message.receiver_id, &entry.receiver_username)
        } else if message.receiver_id == user_id {
            (message.sender_id, &entry.sender_username)
        } else {
            continue;
        };

        let unread = (message.receiver_id == user_id && !message.is_read) as i64;

        let (summary, last_id) = partners.entry(partner_id).or_insert_with(|| {
            (
                ConversationSummary {
                    partner_id,
                    partner_username: partner_username.clone(),
                    last_message: message.content.clone(),
                    last_message_at: message.created_at,
                    unread_count: 0,
                },
                message.id,
            )
        });

        summary.unread_count += unread;
        if (message.created_at, message.id) > (summary.last_message_at, *last_id) {
            summary.last_message = message.content.clone();
            summary.last_message_at = message.created_at;
            *last_id = message.id;
        }
    }

    let mut summaries: Vec<(ConversationSummary, i32)> = partners.into_values().collect();
    summaries.sort_by(|(a, a_id), (b, b_id)| {
        (b.last_message_at, *b_id).cmp(&(a.last_message_at, *a_id))
    });
    summaries.into_iter().map(|(summary, _)| summary).collect()
}
