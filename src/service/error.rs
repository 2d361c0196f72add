use axum::http::StatusCode;
use thiserror::Error;

use crate::{
    error::{ErrorMessage, HttpError},
    models::exchangemodel::ExchangeStatus,
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Exchange {0} not found")]
    ExchangeNotFound(i32),

    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Cannot move exchange from {from} to {to}")]
    InvalidTransition {
        from: ExchangeStatus,
        to: ExchangeStatus,
    },

    #[error("Feedback can only be left on a completed exchange (current status: {0})")]
    FeedbackNotAllowed(ExchangeStatus),

    #[error("A pending exchange for these skills already exists")]
    DuplicateExchange,

    #[error("{0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_foreign_key_violation() {
                return ServiceError::Validation(
                    "Referenced user, skill or exchange does not exist".to_string(),
                );
            }
            if db_error.is_check_violation() {
                return ServiceError::Validation(db_error.message().to_string());
            }
        }
        ServiceError::Database(error)
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        match error {
            ServiceError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                HttpError::new(ErrorMessage::ServerError.to_string(), status)
            }
            _ => HttpError::new(error.to_string(), status),
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ExchangeNotFound(_) | ServiceError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            ServiceError::InvalidTransition { .. }
            | ServiceError::FeedbackNotAllowed(_)
            | ServiceError::DuplicateExchange => StatusCode::CONFLICT,

            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,

            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
