use std::sync::Arc;

use axum::{
    http::StatusCode, middleware, response::IntoResponse, routing::get, Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, exchange::exchange_handler, message::message_handler,
        skills::skill_handler, userskills::user_skill_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check(Extension(app_state): Extension<Arc<AppState>>) -> impl IntoResponse {
    match app_state.db_client.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "db_error" })),
            )
        }
    }
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/skills", skill_handler())
        .nest("/user-skills", user_skill_handler())
        .nest(
            "/exchanges",
            exchange_handler()
                .layer(middleware::from_fn(auth))
        )
        .nest(
            "/messages",
            message_handler()
                .layer(middleware::from_fn(auth))
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
