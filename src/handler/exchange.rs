use std::{str::FromStr, sync::Arc};

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::exchangedtos::{CreateExchangeDto, ExchangeFeedbackDto, UpdateExchangeStatusDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::exchangemodel::ExchangeStatus,
    AppState,
};

pub fn exchange_handler() -> Router {
    Router::new()
        .route("/", post(create_exchange))
        .route("/user/:user_id", get(get_user_exchanges))
        .route("/:exchange_id", get(get_exchange))
        .route("/:exchange_id/status", put(update_exchange_status))
        .route("/:exchange_id/feedback", put(submit_feedback))
}

pub async fn create_exchange(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateExchangeDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let exchange = app_state
        .exchange_service
        .create_exchange(auth.user.id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": exchange
        })),
    ))
}

pub async fn get_user_exchanges(
    Path(user_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let exchanges = app_state
        .exchange_service
        .get_user_exchanges(auth.user.id, user_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": exchanges
    })))
}

pub async fn get_exchange(
    Path(exchange_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let exchange = app_state
        .exchange_service
        .get_exchange(auth.user.id, exchange_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": exchange
    })))
}

pub async fn update_exchange_status(
    Path(exchange_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateExchangeStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let status = ExchangeStatus::from_str(&body.status).map_err(HttpError::bad_request)?;

    let update = app_state
        .exchange_service
        .update_status(auth.user.id, exchange_id, status)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": update
    })))
}

pub async fn submit_feedback(
    Path(exchange_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<ExchangeFeedbackDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let exchange = app_state
        .exchange_service
        .submit_feedback(auth.user.id, exchange_id, body)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": exchange
    })))
}
