use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::messagedtos::{SendMessageDto, UnreadCountDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn message_handler() -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/conversation/:other_user_id", get(get_conversation))
        .route("/unread-count", get(get_unread_count))
        .route("/conversations", get(get_conversations))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let message = app_state
        .message_service
        .send_message(auth.user.id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": message
        })),
    ))
}

pub async fn get_conversation(
    Path(other_user_id): Path<i32>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .message_service
        .get_conversation(auth.user.id, other_user_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": messages
    })))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let unread_count = app_state
        .message_service
        .get_unread_count(auth.user.id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": UnreadCountDto { unread_count }
    })))
}

pub async fn get_conversations(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let conversations = app_state
        .message_service
        .get_conversations(auth.user.id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": conversations
    })))
}
