// models/exchangemodel.rs
use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "exchange_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExchangeStatus {
    Pending,
    Accepted,
    Rejected,
    InProgress,
    Completed,
    Cancelled,
}

impl ExchangeStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ExchangeStatus::Pending => "PENDING",
            ExchangeStatus::Accepted => "ACCEPTED",
            ExchangeStatus::Rejected => "REJECTED",
            ExchangeStatus::InProgress => "IN_PROGRESS",
            ExchangeStatus::Completed => "COMPLETED",
            ExchangeStatus::Cancelled => "CANCELLED",
        }
    }

    /// Statuses reachable in one step from `self`. Terminal statuses have none.
    pub fn allowed_transitions(&self) -> &'static [ExchangeStatus] {
        match self {
            ExchangeStatus::Pending => &[
                ExchangeStatus::Accepted,
                ExchangeStatus::Rejected,
                ExchangeStatus::Cancelled,
            ],
            ExchangeStatus::Accepted => &[ExchangeStatus::InProgress, ExchangeStatus::Cancelled],
            ExchangeStatus::InProgress => &[ExchangeStatus::Completed, ExchangeStatus::Cancelled],
            ExchangeStatus::Rejected | ExchangeStatus::Completed | ExchangeStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, next: ExchangeStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for ExchangeStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ExchangeStatus::Pending),
            "ACCEPTED" => Ok(ExchangeStatus::Accepted),
            "REJECTED" => Ok(ExchangeStatus::Rejected),
            "IN_PROGRESS" => Ok(ExchangeStatus::InProgress),
            "COMPLETED" => Ok(ExchangeStatus::Completed),
            "CANCELLED" => Ok(ExchangeStatus::Cancelled),
            other => Err(format!("Unknown exchange status '{}'", other)),
        }
    }
}

/// Which side of an exchange a participant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeRole {
    Requester,
    Provider,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkillExchange {
    pub id: i32,
    pub requester_id: i32,
    pub provider_id: i32,
    pub requested_skill_id: i32,
    pub offered_skill_id: i32,
    pub status: ExchangeStatus,
    pub message: Option<String>,
    pub requester_rating: Option<i32>,
    pub provider_rating: Option<i32>,
    pub requester_feedback: Option<String>,
    pub provider_feedback: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SkillExchange {
    pub fn role_of(&self, user_id: i32) -> Option<ExchangeRole> {
        if self.requester_id == user_id {
            Some(ExchangeRole::Requester)
        } else if self.provider_id == user_id {
            Some(ExchangeRole::Provider)
        } else {
            None
        }
    }

    pub fn participant(&self, role: ExchangeRole) -> i32 {
        match role {
            ExchangeRole::Requester => self.requester_id,
            ExchangeRole::Provider => self.provider_id,
        }
    }
}

/// An exchange joined with the display fields of its users and skills.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub exchange: SkillExchange,
    pub requester_username: String,
    pub requester_first_name: String,
    pub requester_last_name: String,
    pub provider_username: String,
    pub provider_first_name: String,
    pub provider_last_name: String,
    pub requested_skill_name: String,
    pub offered_skill_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeStatusUpdate {
    pub id: i32,
    pub status: ExchangeStatus,
    pub updated_at: DateTime<Utc>,
}
